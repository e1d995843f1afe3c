//! UI rendering
//!
//! Rendering reads the state and draws; it never changes anything.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{AppState, Row};

/// Width of the text box drawn after input rows
const INPUT_WIDTH: usize = 14;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Balance panel
            Constraint::Min(8),    // Form
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    render_account(frame, chunks[0], state);
    render_form(frame, chunks[1], state);
    render_status_bar(frame, chunks[2], state);

    if state.help_visible {
        render_help_overlay(frame, area, state);
    }

    if let Some(ref error) = state.error {
        render_error_overlay(frame, area, error, state);
    }
}

/// Foreground color, or nothing when colors are off
fn fg(state: &AppState, color: Color) -> Style {
    if state.config.colors_enabled {
        Style::default().fg(color)
    } else {
        Style::default()
    }
}

fn render_account(frame: &mut Frame, area: Rect, state: &AppState) {
    let account = &state.account;

    let (status_text, status_color) = if account.is_active {
        ("open", Color::Green)
    } else {
        ("closed", Color::Red)
    };

    let balance_color = if account.balance.is_sign_negative() && !account.balance.is_zero() {
        Color::Red
    } else {
        Color::White
    };

    let lines = vec![
        Line::from(vec![
            Span::raw("Balance: "),
            Span::styled(account.balance.to_string(), fg(state, balance_color)),
        ]),
        Line::from(vec![
            Span::raw("Loan: "),
            Span::styled(account.loan.to_string(), fg(state, Color::Yellow)),
        ]),
        Line::from(vec![
            Span::raw("Account: "),
            Span::styled(status_text, fg(state, status_color).add_modifier(Modifier::BOLD)),
        ]),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(" Bank Account ")
            .borders(Borders::ALL),
    );

    frame.render_widget(panel, area);
}

fn render_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let lines: Vec<Line> = Row::ALL
        .iter()
        .map(|row| form_line(state, *row))
        .collect();

    let form = Paragraph::new(lines).block(
        Block::default()
            .title(" Actions ")
            .borders(Borders::ALL),
    );

    frame.render_widget(form, area);
}

fn form_line(state: &AppState, row: Row) -> Line<'static> {
    let focused = state.focus == row;
    let enabled = row.enabled(state.account.is_active);

    let mut style = if enabled {
        Style::default()
    } else {
        fg(state, Color::DarkGray)
    };
    if focused {
        style = style.add_modifier(Modifier::BOLD);
        style = if state.config.colors_enabled && enabled {
            style.fg(Color::Cyan)
        } else {
            style.add_modifier(Modifier::REVERSED)
        };
    }

    let marker = if focused { "> " } else { "  " };
    let mut spans = vec![
        Span::raw(marker),
        Span::styled(format!("[ {} ]", row.label()), style),
    ];

    if let Some(text) = state.inputs.get(row) {
        let shown = if text.is_empty() && focused && enabled {
            "_".to_string()
        } else {
            text.to_string()
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("[{:<width$}]", shown, width = INPUT_WIDTH),
            if enabled { Style::default() } else { fg(state, Color::DarkGray) },
        ));
    }

    if !enabled && focused {
        spans.push(Span::styled("  (disabled)", fg(state, Color::DarkGray)));
    }

    Line::from(spans)
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let text = match state.status.message {
        Some(ref message) => message.clone(),
        None => "Tab/Up/Down: Move | Enter: Submit | F1: Help | q: Quit".to_string(),
    };

    let status = Paragraph::new(Line::from(Span::styled(text, fg(state, Color::Gray))))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(status, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup_area = centered_rect(70, 70, area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  Tab / Down  - Next row"),
        Line::from("  Shift+Tab / Up - Previous row"),
        Line::from("  0-9 . -     - Type an amount"),
        Line::from("  Backspace   - Delete last character"),
        Line::from("  Enter       - Submit the focused row"),
        Line::from("  F1          - Toggle help"),
        Line::from("  Esc         - Dismiss overlays"),
        Line::from("  q / Ctrl+C  - Quit"),
        Line::from(""),
        Line::from(format!(
            "Opening credits {}. Close needs zero balance and no loan.",
            state.rules.opening_balance
        )),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(fg(state, Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help, popup_area);
}

fn render_error_overlay(frame: &mut Frame, area: Rect, error: &str, state: &AppState) {
    let popup_area = centered_rect(70, 40, area);

    let error_text = vec![
        Line::from(Span::styled(
            "Error",
            fg(state, Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(error.to_string()),
        Line::from(""),
        Line::from("Press Esc to dismiss"),
    ];

    let error_widget = Paragraph::new(error_text)
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(fg(state, Color::Red)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(error_widget, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
