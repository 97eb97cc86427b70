//! Account-related types for the authorizer
//!
//! This module defines the Account structure and the read-only summary that is
//! reported after every operation.

use super::operation::Transaction;

/// The account state
///
/// There is at most one account per authorization run. It is created once and
/// afterwards only mutated through [`crate::core::AccountState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Whether the card can be used for transactions
    pub active_card: bool,

    /// Remaining limit
    ///
    /// Only ever decreases, and only by the amount of an accepted transaction.
    pub available_limit: i64,

    /// Allow-list mode
    ///
    /// While set, transactions are checked against the relaxed rule set
    /// (card-active and limit checks only).
    pub allow_mode: bool,

    /// Accepted transactions in acceptance order
    pub transactions: Vec<Transaction>,
}

impl Account {
    /// Create a new account with an empty history and allow-list mode off
    pub fn new(active_card: bool, available_limit: i64) -> Self {
        Account {
            active_card,
            available_limit,
            allow_mode: false,
            transactions: Vec::new(),
        }
    }

    /// Summary of the account without its transaction history
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            active_card: self.active_card,
            available_limit: self.available_limit,
            allow_mode: self.allow_mode,
        }
    }
}

/// Point-in-time account fields reported with every authorization result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountSummary {
    pub active_card: bool,
    pub available_limit: i64,
    pub allow_mode: bool,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        account.summary()
    }
}
