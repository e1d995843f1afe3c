//! Pure reducer for the form
//!
//! `(AppState, Action) -> AppState`, no I/O. Account transitions are
//! delegated to `libbank::transition`; this layer adds focus, input fields,
//! overlays and the status line around them.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use libbank::{transition, Outcome, TaggedAction};

use super::actions::{Action, Row};
use super::state::{AppState, StatusBarState, MAX_INPUT_LEN};

pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Key(key) => handle_key(state, key),
        Action::Tick => state,
        Action::Resize(_, _) => state, // ratatui redraws at the new size

        // === Navigation ===
        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::FocusNext => AppState {
            focus: state.focus.next(),
            ..state
        },

        Action::FocusPrev => AppState {
            focus: state.focus.prev(),
            ..state
        },

        Action::Focus(row) => AppState {
            focus: row,
            ..state
        },

        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },

        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },

        // === Form ===
        Action::InputChar(c) => {
            if !accepts_char(c) || !state.focus_enabled() {
                return state;
            }
            let mut state = state;
            match state.inputs.get_mut(state.focus) {
                Some(text) if text.len() < MAX_INPUT_LEN => text.push(c),
                _ => {}
            }
            state
        }

        Action::InputBackspace => {
            let mut state = state;
            if let Some(text) = state.inputs.get_mut(state.focus) {
                text.pop();
            }
            state
        }

        Action::Submit => submit(state),

        Action::Account(account_action) => apply_account(state, account_action),

        // === Error Handling ===
        Action::ShowError(error) => AppState {
            error: Some(error),
            ..state
        },

        Action::DismissError => AppState { error: None, ..state },

        // === Status Bar ===
        Action::SetStatus(message) => AppState {
            status: StatusBarState {
                message: Some(message),
            },
            ..state
        },

        Action::ClearStatus => AppState {
            status: StatusBarState { message: None },
            ..state
        },
    }
}

/// Amount fields take what a numeric input would
fn accepts_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '-'
}

/// Turn the focused row into an account action
///
/// The row's input is coerced with the state's policy and cleared once the
/// action is dispatched. A strict-policy rejection keeps the text so it can
/// be corrected.
fn submit(state: AppState) -> AppState {
    let row = state.focus;

    if !row.enabled(state.account.is_active) {
        let message = if state.account.is_active {
            format!("{}: the account is already open", row.label())
        } else {
            format!("{}: open the account first", row.label())
        };
        return reduce(state, Action::SetStatus(message));
    }

    let payload = state.inputs.get(row).map(str::to_string);
    let tagged = TaggedAction::new(row.kind().tag(), payload);

    match tagged.resolve(state.policy) {
        Ok(account_action) => {
            let mut state = state;
            if let Some(text) = state.inputs.get_mut(row) {
                text.clear();
            }
            reduce(state, Action::Account(account_action))
        }
        Err(e) => reduce(state, Action::ShowError(e.to_string())),
    }
}

fn apply_account(state: AppState, action: libbank::Action) -> AppState {
    let t = transition(state.account, action, &state.rules);

    let message = match t.outcome {
        Outcome::Applied => format!("{} applied", action),
        Outcome::Rejected(reason) => format!("{} ignored: {}", action, reason),
    };

    // Opening or closing flips which rows are usable; keep focus on one that is
    let focus = if t.before.is_active != t.after.is_active {
        first_enabled(t.after.is_active)
    } else {
        state.focus
    };

    AppState {
        account: t.after,
        focus,
        status: StatusBarState {
            message: Some(message),
        },
        ..state
    }
}

fn first_enabled(is_active: bool) -> Row {
    Row::ALL
        .into_iter()
        .find(|row| row.enabled(is_active))
        .unwrap_or(Row::OpenAccount)
}

fn handle_key(state: AppState, key: KeyEvent) -> AppState {
    if key.kind == KeyEventKind::Release {
        return state;
    }

    // Global keybindings (work everywhere)
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Char('q'), KeyModifiers::NONE) => {
            return reduce(state, Action::Quit);
        }

        (KeyCode::F(1), _) => {
            let action = if state.help_visible {
                Action::HideHelp
            } else {
                Action::ShowHelp
            };
            return reduce(state, action);
        }

        (KeyCode::Esc, _) if state.error.is_some() => {
            return reduce(state, Action::DismissError);
        }

        (KeyCode::Esc, _) if state.help_visible => {
            return reduce(state, Action::HideHelp);
        }

        _ => {}
    }

    if state.overlay_visible() {
        return state;
    }

    // Form keybindings
    match (key.code, key.modifiers) {
        (KeyCode::Tab, _) | (KeyCode::Down, _) => reduce(state, Action::FocusNext),
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => reduce(state, Action::FocusPrev),
        (KeyCode::Enter, _) => reduce(state, Action::Submit),
        (KeyCode::Backspace, _) => reduce(state, Action::InputBackspace),
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            reduce(state, Action::InputChar(c))
        }
        _ => state,
    }
}
