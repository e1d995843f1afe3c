//! Account state snapshot

use serde::{Deserialize, Serialize};

use crate::amount::Amount;

/// The whole account, as one immutable value
///
/// A fresh account is closed with nothing in it. Snapshots are `Copy`;
/// transitions produce new values (see [`crate::reduce`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountState {
    /// Current balance; negative after paying a loan the balance can't cover
    pub balance: Amount,

    /// Outstanding loan, zero when there is none
    pub loan: Amount,

    /// Closed accounts only accept being opened
    pub is_active: bool,
}

impl Default for AccountState {
    fn default() -> Self {
        Self {
            balance: Amount::ZERO,
            loan: Amount::ZERO,
            is_active: false,
        }
    }
}

impl AccountState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_loan(&self) -> bool {
        !self.loan.is_zero()
    }

    /// Closing requires a settled account: no money and no debt
    pub fn can_close(&self) -> bool {
        self.balance.is_zero() && self.loan.is_zero()
    }
}

impl std::fmt::Display for AccountState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "balance: {} | loan: {} | {}",
            self.balance,
            self.loan,
            if self.is_active { "active" } else { "inactive" }
        )
    }
}
