//! Account state holder
//!
//! `AccountStore` owns the current snapshot and replaces it after every
//! dispatch. It is the only place transitions get logged; the reducer itself
//! stays silent.

use tracing::{debug, info};

use crate::action::{Action, TaggedAction};
use crate::amount::CoercionPolicy;
use crate::config::Config;
use crate::error::Result;
use crate::reducer::{transition, AccountRules, Outcome, Transition};
use crate::state::AccountState;

#[derive(Debug, Clone, Default)]
pub struct AccountStore {
    state: AccountState,
    rules: AccountRules,
    policy: CoercionPolicy,
}

impl AccountStore {
    /// Create a store holding a fresh account with default rules
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: AccountRules, policy: CoercionPolicy) -> Self {
        Self {
            state: AccountState::default(),
            rules,
            policy,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_rules(config.rules(), config.input.coercion)
    }

    pub fn state(&self) -> &AccountState {
        &self.state
    }

    pub fn rules(&self) -> &AccountRules {
        &self.rules
    }

    pub fn policy(&self) -> CoercionPolicy {
        self.policy
    }

    /// Apply `action` and keep the resulting snapshot
    pub fn dispatch(&mut self, action: Action) -> Transition {
        let transition = transition(self.state, action, &self.rules);

        match transition.outcome {
            Outcome::Applied => debug!(
                action = %action,
                balance = %transition.after.balance,
                loan = %transition.after.loan,
                active = transition.after.is_active,
                "Transition applied"
            ),
            Outcome::Rejected(reason) => info!(
                action = %action,
                reason = %reason,
                "Transition rejected, state unchanged"
            ),
        }

        self.state = transition.after;
        transition
    }

    /// Resolve a string-tagged action with the store's coercion policy, then dispatch it
    ///
    /// Unknown kinds and (under the strict policy) malformed amounts fail
    /// before the state is touched.
    pub fn dispatch_tagged(&mut self, action: &TaggedAction) -> Result<Transition> {
        let resolved = action.resolve(self.policy).map_err(|e| {
            debug!(kind = %action.kind, error = %e, "Failed to resolve action");
            e
        })?;
        Ok(self.dispatch(resolved))
    }

    /// Discard the current snapshot and start over with a fresh account
    pub fn reset(&mut self) {
        self.state = AccountState::default();
    }
}
