//! libbank - a single bank account driven by a pure reducer
//!
//! The account is a small state machine: every change goes through
//! [`reduce`], which maps `(AccountState, Action)` to a new `AccountState`
//! without touching its input. Front ends hold the snapshot in an
//! [`AccountStore`] (or their own state) and replace it after each dispatch.

pub mod action;
pub mod amount;
pub mod config;
pub mod error;
pub mod logging;
pub mod reducer;
pub mod state;
pub mod store;

// Re-export commonly used types
pub use action::{Action, ActionKind, TaggedAction};
pub use amount::{coerce_amount, Amount, CoercionPolicy};
pub use config::Config;
pub use error::{BankError, ConfigError, Result};
pub use reducer::{
    precondition, reduce, reduce_tagged, reduce_with, transition, AccountRules, Outcome,
    Rejection, Transition,
};
pub use state::AccountState;
pub use store::AccountStore;
