//! Application state
//!
//! Everything the form shows lives here. Transitions happen only through
//! the reducer (see `reducer.rs`).

use libbank::{AccountRules, AccountState, CoercionPolicy, Config};

use super::actions::Row;

/// Longest text accepted in an amount field
pub const MAX_INPUT_LEN: usize = 24;

#[derive(Debug, Clone)]
pub struct AppState {
    pub should_quit: bool,

    /// Current account snapshot
    pub account: AccountState,

    /// Rules handed to the account reducer
    pub rules: AccountRules,

    /// How amount fields are coerced on submit
    pub policy: CoercionPolicy,

    /// Row that receives Enter and typed characters
    pub focus: Row,

    pub inputs: FormInputs,

    pub help_visible: bool,

    pub status: StatusBarState,

    /// Error overlay state
    pub error: Option<String>,

    pub config: UiConfig,
}

/// Raw text of the three amount fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInputs {
    pub deposit: String,
    pub withdraw: String,
    pub loan: String,
}

impl FormInputs {
    pub fn get(&self, row: Row) -> Option<&str> {
        match row {
            Row::Deposit => Some(&self.deposit),
            Row::Withdraw => Some(&self.withdraw),
            Row::RequestLoan => Some(&self.loan),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, row: Row) -> Option<&mut String> {
        match row {
            Row::Deposit => Some(&mut self.deposit),
            Row::Withdraw => Some(&mut self.withdraw),
            Row::RequestLoan => Some(&mut self.loan),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusBarState {
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Use colors?
    pub colors_enabled: bool,

    /// Tick rate in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            should_quit: false,
            account: AccountState::default(),
            rules: AccountRules::default(),
            policy: CoercionPolicy::default(),
            focus: Row::OpenAccount,
            inputs: FormInputs::default(),
            help_visible: false,
            status: StatusBarState::default(),
            error: None,
            config: UiConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::with_tick_rate(100)
    }
}

impl UiConfig {
    /// Environment overrides win over `tick_rate_ms`
    pub fn with_tick_rate(tick_rate_ms: u64) -> Self {
        let colors_enabled = std::env::var("NO_COLOR").is_err()
            && std::env::var("BANK_TUI_NO_COLOR").is_err();

        let tick_rate_ms = std::env::var("BANK_TUI_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(tick_rate_ms);

        Self {
            colors_enabled,
            tick_rate_ms,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            rules: config.rules(),
            policy: config.input.coercion,
            config: UiConfig::with_tick_rate(config.ui.tick_rate_ms),
            ..Self::default()
        }
    }

    /// Is the focused row currently usable?
    pub fn focus_enabled(&self) -> bool {
        self.focus.enabled(self.account.is_active)
    }

    /// Any overlay swallows form keys until dismissed
    pub fn overlay_visible(&self) -> bool {
        self.help_visible || self.error.is_some()
    }
}
