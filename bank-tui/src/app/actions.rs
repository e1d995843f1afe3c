//! Actions for the form reducer
//!
//! UI-level actions describe what the user did; `Account` wraps a typed
//! account action that is forwarded to the account reducer in `libbank`.

use crossterm::event::KeyEvent;
use libbank::ActionKind;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // === UI Events ===
    Key(KeyEvent),

    /// Periodic tick, no state change
    Tick,

    Resize(u16, u16),

    // === Navigation ===
    Quit,
    FocusNext,
    FocusPrev,
    Focus(Row),
    ShowHelp,
    HideHelp,

    // === Form ===
    /// Type a character into the focused row's input
    InputChar(char),
    InputBackspace,

    /// Activate the focused row
    Submit,

    /// Apply an account action
    Account(libbank::Action),

    // === Error Handling ===
    ShowError(String),
    DismissError,

    // === Status Bar ===
    SetStatus(String),
    ClearStatus,
}

/// One line of the form, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Row {
    OpenAccount,
    Deposit,
    Withdraw,
    RequestLoan,
    PayLoan,
    CloseAccount,
}

impl Row {
    pub const ALL: [Row; 6] = [
        Row::OpenAccount,
        Row::Deposit,
        Row::Withdraw,
        Row::RequestLoan,
        Row::PayLoan,
        Row::CloseAccount,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Row::OpenAccount => "Open account",
            Row::Deposit => "Deposit",
            Row::Withdraw => "Withdraw",
            Row::RequestLoan => "Request a loan of",
            Row::PayLoan => "Pay loan",
            Row::CloseAccount => "Close account",
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Row::OpenAccount => ActionKind::OpenAccount,
            Row::Deposit => ActionKind::Deposit,
            Row::Withdraw => ActionKind::Withdraw,
            Row::RequestLoan => ActionKind::RequestLoan,
            Row::PayLoan => ActionKind::PayLoan,
            Row::CloseAccount => ActionKind::CloseAccount,
        }
    }

    pub fn has_input(&self) -> bool {
        self.kind().takes_payload()
    }

    /// Opening is only offered while closed; everything else only while open
    pub fn enabled(&self, is_active: bool) -> bool {
        match self {
            Row::OpenAccount => !is_active,
            _ => is_active,
        }
    }

    fn index(&self) -> usize {
        Row::ALL.iter().position(|row| row == self).unwrap_or(0)
    }

    /// Next row down, wrapping to the top
    pub fn next(&self) -> Row {
        Row::ALL[(self.index() + 1) % Row::ALL.len()]
    }

    /// Next row up, wrapping to the bottom
    pub fn prev(&self) -> Row {
        Row::ALL[(self.index() + Row::ALL.len() - 1) % Row::ALL.len()]
    }
}
