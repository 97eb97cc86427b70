//! Per-operation authorization result

use super::account::AccountSummary;
use super::violation::Violation;

/// Outcome of processing one operation
///
/// `account` is the state after the operation (or the unchanged prior state when
/// the operation was rejected). It is `None` only while no account exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationResult {
    pub account: Option<AccountSummary>,
    pub violations: Vec<Violation>,
}

impl AuthorizationResult {
    /// Whether the operation passed every rule
    pub fn is_accepted(&self) -> bool {
        self.violations.is_empty()
    }
}
