//! Rule evaluation
//!
//! Evaluates an ordered rule list against the pre-mutation account and the
//! incoming payload. Every violated rule is reported in list order, except that
//! a violated terminal rule stops evaluation and is reported alone.

use crate::core::account_state::AccountState;
use crate::core::rules::{Rule, RuleRegistry};
use crate::types::{Account, Operation, Violation};
use std::ops::ControlFlow;

/// Evaluate `rules` in order
///
/// Returns the labels of all violated rules in list order, or only the terminal
/// one if a terminal rule is violated.
pub fn evaluate<P>(rules: &[Rule<P>], account: Option<&Account>, payload: &P) -> Vec<Violation> {
    let outcome = rules.iter().try_fold(Vec::new(), |mut found, rule| {
        if !rule.is_violated(account, payload) {
            return ControlFlow::Continue(found);
        }
        if rule.terminal {
            return ControlFlow::Break(rule.violation);
        }
        found.push(rule.violation);
        ControlFlow::Continue(found)
    });

    match outcome {
        ControlFlow::Continue(found) => found,
        ControlFlow::Break(terminal) => vec![terminal],
    }
}

/// Rule-list selection and evaluation for decoded operations
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    registry: RuleRegistry,
}

impl Validator {
    pub fn new(registry: RuleRegistry) -> Self {
        Validator { registry }
    }

    /// Violations `operation` would cause against the current state
    ///
    /// Side-effect free: the state is only read.
    pub fn validate(&self, state: &AccountState, operation: &Operation) -> Vec<Violation> {
        let account = state.snapshot();

        match operation {
            Operation::Account(request) => {
                evaluate(self.registry.account_rules(), account, request)
            }
            Operation::Transaction(transaction) => evaluate(
                self.registry.transaction_rules(state.allow_mode()),
                account,
                transaction,
            ),
            Operation::AllowList(request) => {
                evaluate(self.registry.allow_list_rules(), account, request)
            }
        }
    }
}
