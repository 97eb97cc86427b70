//! Operation dispatcher
//!
//! This module provides the `Authorizer` that processes operations one at a
//! time by coordinating between the `Validator` and the `AccountState`.
//!
//! For every operation the authorizer:
//! - Evaluates the selected rule list against the current (pre-mutation) state
//! - Commits the operation only when no violation was found
//! - Reports the resulting account summary together with the violations

use crate::core::account_state::AccountState;
use crate::core::validator::Validator;
use crate::types::{AuthorizationResult, AuthorizerError, Operation};
use tracing::{debug, warn};

/// Operation dispatcher for one authorization run
///
/// Owns the run's account state; a new run needs a new `Authorizer`.
#[derive(Debug, Default)]
pub struct Authorizer {
    state: AccountState,
    validator: Validator,
}

impl Authorizer {
    /// Create an authorizer with no account
    pub fn new() -> Self {
        Authorizer {
            state: AccountState::new(),
            validator: Validator::default(),
        }
    }

    /// Process a single operation
    ///
    /// Rejected operations leave the state untouched; the reported account is
    /// then the unmodified prior state.
    pub fn process(&mut self, operation: Operation) -> AuthorizationResult {
        let violations = self.validator.validate(&self.state, &operation);

        if violations.is_empty() {
            if let Err(e) = self.commit(operation) {
                // Only reachable for a mode toggle before the account exists
                warn!("Operation ignored: {}", e);
            }
        } else {
            debug!(?violations, ?operation, "Operation rejected");
        }

        AuthorizationResult {
            account: self.state.summary(),
            violations,
        }
    }

    /// Process a sequence of operations, one result per operation in order
    pub fn process_all<I>(&mut self, operations: I) -> Vec<AuthorizationResult>
    where
        I: IntoIterator<Item = Operation>,
    {
        operations
            .into_iter()
            .map(|operation| self.process(operation))
            .collect()
    }

    /// Read-only access to the run's account state
    pub fn state(&self) -> &AccountState {
        &self.state
    }

    fn commit(&mut self, operation: Operation) -> Result<(), AuthorizerError> {
        match operation {
            Operation::Account(request) => self
                .state
                .create(request.active_card, request.available_limit)
                .map(|_| ()),
            Operation::Transaction(transaction) => self.state.apply_transaction(transaction),
            Operation::AllowList(request) => self.state.set_mode(request.active),
        }
    }
}
