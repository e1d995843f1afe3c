//! Pure reducer for account transitions
//!
//! The reducer is a pure function: `(AccountState, Action) -> AccountState`.
//! It never mutates its input and performs no I/O; logging and ownership of
//! the current snapshot live in [`crate::store`].
//!
//! A transition whose precondition fails is a no-op: the input state comes
//! back unchanged. Failed preconditions are not errors. The only error on
//! this path is an unknown action tag, raised by [`reduce_tagged`] before any
//! transition is attempted.

use serde::{Deserialize, Serialize};

use crate::action::{Action, TaggedAction};
use crate::amount::{Amount, CoercionPolicy};
use crate::error::Result;
use crate::state::AccountState;

/// Balance credited when an account is opened, unless configured otherwise
pub const DEFAULT_OPENING_BALANCE: i64 = 500;

/// Tunable rules the reducer applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRules {
    pub opening_balance: Amount,
}

impl Default for AccountRules {
    fn default() -> Self {
        Self {
            opening_balance: Amount::new(DEFAULT_OPENING_BALANCE, 0),
        }
    }
}

/// Why a transition left the state unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rejection {
    /// Only opening is allowed on a closed account
    Inactive,
    /// A loan is already outstanding
    LoanOutstanding,
    /// Loans must be for a positive amount
    NonPositiveLoan,
    /// Balance or loan is not zero
    Unsettled,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Rejection::Inactive => "account is inactive",
            Rejection::LoanOutstanding => "a loan is already outstanding",
            Rejection::NonPositiveLoan => "loan amount must be positive",
            Rejection::Unsettled => "balance and loan must both be zero to close",
        };
        f.write_str(reason)
    }
}

/// Whether a dispatched action changed anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Applied,
    Rejected(Rejection),
}

/// One dispatched action and the snapshots around it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub action: Action,
    pub before: AccountState,
    pub after: AccountState,
    pub outcome: Outcome,
}

/// Check whether `action` may run against `state`
pub fn precondition(state: &AccountState, action: &Action) -> std::result::Result<(), Rejection> {
    match action {
        Action::OpenAccount => Ok(()),
        _ if !state.is_active => Err(Rejection::Inactive),
        Action::RequestLoan(_) if state.has_loan() => Err(Rejection::LoanOutstanding),
        Action::RequestLoan(amount) if *amount <= Amount::ZERO => Err(Rejection::NonPositiveLoan),
        Action::CloseAccount if !state.can_close() => Err(Rejection::Unsettled),
        _ => Ok(()),
    }
}

/// Apply `action` with the default rules
pub fn reduce(state: AccountState, action: Action) -> AccountState {
    reduce_with(state, action, &AccountRules::default())
}

/// Apply `action` with explicit rules
///
/// Opening an account that is already open credits the opening balance
/// again; front ends disable that control while the account is active.
pub fn reduce_with(state: AccountState, action: Action, rules: &AccountRules) -> AccountState {
    if precondition(&state, &action).is_err() {
        return state;
    }

    match action {
        Action::OpenAccount => AccountState {
            balance: rules.opening_balance,
            is_active: true,
            ..state
        },

        Action::Deposit(amount) => AccountState {
            balance: state.balance.saturating_add(amount),
            ..state
        },

        // No floor: withdrawing past zero leaves a negative balance
        Action::Withdraw(amount) => AccountState {
            balance: state.balance.saturating_sub(amount),
            ..state
        },

        Action::RequestLoan(amount) => AccountState {
            balance: state.balance.saturating_add(amount),
            loan: amount,
            ..state
        },

        Action::PayLoan => AccountState {
            balance: state.balance.saturating_sub(state.loan),
            loan: Amount::ZERO,
            ..state
        },

        // Settled accounts close back to the initial snapshot
        Action::CloseAccount => AccountState::default(),
    }
}

/// Apply `action` and record what happened
pub fn transition(state: AccountState, action: Action, rules: &AccountRules) -> Transition {
    let outcome = match precondition(&state, &action) {
        Ok(()) => Outcome::Applied,
        Err(rejection) => Outcome::Rejected(rejection),
    };

    Transition {
        action,
        before: state,
        after: reduce_with(state, action, rules),
        outcome,
    }
}

/// Resolve a string-tagged action and apply it with the default rules
///
/// Fails with [`crate::BankError::UnknownAction`] for tags outside the six
/// known kinds, whether or not the account is active.
pub fn reduce_tagged(
    state: AccountState,
    action: &TaggedAction,
    policy: CoercionPolicy,
) -> Result<AccountState> {
    let action = action.resolve(policy)?;
    Ok(reduce(state, action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BankError;

    fn amount(value: i64) -> Amount {
        Amount::new(value, 0)
    }

    fn opened() -> AccountState {
        reduce(AccountState::new(), Action::OpenAccount)
    }

    #[test]
    fn test_reducer_is_pure() {
        let state = opened();
        let copy = state;

        let new_state = reduce(state, Action::Deposit(amount(200)));

        assert_eq!(state, copy);
        assert_eq!(new_state.balance, amount(700));
    }

    #[test]
    fn test_open_account() {
        let state = opened();
        assert_eq!(
            state,
            AccountState {
                balance: amount(500),
                loan: Amount::ZERO,
                is_active: true,
            }
        );
    }

    #[test]
    fn test_open_account_with_configured_balance() {
        let rules = AccountRules {
            opening_balance: amount(50),
        };
        let state = reduce_with(AccountState::new(), Action::OpenAccount, &rules);
        assert_eq!(state.balance, amount(50));
        assert!(state.is_active);
    }

    #[test]
    fn test_inactive_account_ignores_everything_but_open() {
        let state = AccountState::new();
        for action in [
            Action::Deposit(amount(200)),
            Action::Withdraw(amount(100)),
            Action::RequestLoan(amount(1000)),
            Action::PayLoan,
            Action::CloseAccount,
        ] {
            assert_eq!(reduce(state, action), state, "{} should be a no-op", action);
            assert_eq!(precondition(&state, &action), Err(Rejection::Inactive));
        }
    }

    #[test]
    fn test_deposit_and_withdraw() {
        let state = reduce(opened(), Action::Deposit(amount(200)));
        assert_eq!(state.balance, amount(700));

        let state = reduce(state, Action::Withdraw(amount(100)));
        assert_eq!(state.balance, amount(600));
    }

    #[test]
    fn test_withdraw_has_no_floor() {
        let state = reduce(opened(), Action::Withdraw(amount(800)));
        assert_eq!(state.balance, amount(-300));
        assert!(state.is_active);
    }

    #[test]
    fn test_request_loan_once() {
        let state = reduce(opened(), Action::RequestLoan(amount(1000)));
        assert_eq!(state.loan, amount(1000));
        assert_eq!(state.balance, amount(1500));

        let again = reduce(state, Action::RequestLoan(amount(300)));
        assert_eq!(again, state);
        assert_eq!(
            precondition(&state, &Action::RequestLoan(amount(300))),
            Err(Rejection::LoanOutstanding)
        );
    }

    #[test]
    fn test_request_loan_must_be_positive() {
        let state = opened();
        assert_eq!(reduce(state, Action::RequestLoan(Amount::ZERO)), state);
        assert_eq!(reduce(state, Action::RequestLoan(amount(-50))), state);
    }

    #[test]
    fn test_pay_loan_can_go_negative() {
        let state = reduce(opened(), Action::RequestLoan(amount(1000)));
        let state = reduce(state, Action::Withdraw(amount(1200)));
        assert_eq!(state.balance, amount(300));

        let state = reduce(state, Action::PayLoan);
        assert_eq!(state.loan, Amount::ZERO);
        assert_eq!(state.balance, amount(-700));
    }

    #[test]
    fn test_pay_loan_without_loan_changes_nothing() {
        let state = opened();
        assert_eq!(reduce(state, Action::PayLoan), state);
    }

    #[test]
    fn test_close_requires_settled_account() {
        let state = opened();
        let still_open = reduce(state, Action::CloseAccount);
        assert!(still_open.is_active);
        assert_eq!(still_open, state);

        let settled = reduce(state, Action::Withdraw(amount(500)));
        let closed = reduce(settled, Action::CloseAccount);
        assert_eq!(closed, AccountState::default());
    }

    #[test]
    fn test_close_with_outstanding_loan_is_rejected() {
        let state = reduce(opened(), Action::RequestLoan(amount(100)));
        let state = reduce(state, Action::Withdraw(amount(600)));
        assert!(state.balance.is_zero());

        assert_eq!(reduce(state, Action::CloseAccount), state);
        assert_eq!(
            precondition(&state, &Action::CloseAccount),
            Err(Rejection::Unsettled)
        );
    }

    #[test]
    fn test_reopening_an_open_account_resets_the_balance() {
        let state = reduce(opened(), Action::Deposit(amount(200)));
        let state = reduce(state, Action::OpenAccount);
        assert_eq!(state.balance, amount(500));
    }

    #[test]
    fn test_transition_records_outcome() {
        let t = transition(AccountState::new(), Action::PayLoan, &AccountRules::default());
        assert_eq!(t.outcome, Outcome::Rejected(Rejection::Inactive));
        assert_eq!(t.before, t.after);

        let t = transition(AccountState::new(), Action::OpenAccount, &AccountRules::default());
        assert_eq!(t.outcome, Outcome::Applied);
        assert!(t.after.is_active);
    }

    #[test]
    fn test_reduce_tagged_unknown_action() {
        let tagged = TaggedAction::new("transfer", Some("10".to_string()));

        let err = reduce_tagged(opened(), &tagged, CoercionPolicy::Lenient).unwrap_err();
        assert!(matches!(err, BankError::UnknownAction(_)));

        // Unknown tags fail even while the account is closed
        let err = reduce_tagged(AccountState::new(), &tagged, CoercionPolicy::Lenient).unwrap_err();
        assert!(matches!(err, BankError::UnknownAction(_)));
    }

    #[test]
    fn test_reduce_tagged_known_action() {
        let tagged = TaggedAction::new("deposit", Some("200".to_string()));
        let state = reduce_tagged(opened(), &tagged, CoercionPolicy::Strict).unwrap();
        assert_eq!(state.balance, amount(700));
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(Rejection::Inactive.to_string(), "account is inactive");
        assert!(Rejection::Unsettled.to_string().contains("zero"));
    }
}
