//! Error types for bank-tui

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TuiError {
    /// Account core error (configuration, input)
    #[error("Bank error: {0}")]
    Bank(#[from] libbank::BankError),

    /// Terminal/IO error
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Application error: {0}")]
    Application(String),
}

impl TuiError {
    pub fn exit_code(&self) -> i32 {
        match self {
            TuiError::Bank(e) => e.exit_code(),
            TuiError::Terminal(_) | TuiError::Application(_) => 1,
        }
    }
}

/// Result type for TUI operations
pub type Result<T> = std::result::Result<T, TuiError>;
