//! Operation types for the authorizer
//!
//! This module defines the decoded operations the authorizer accepts and the
//! transaction record that ends up in the account history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A card transaction
///
/// Immutable once accepted into the account history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Merchant name, compared verbatim by the doubled-transaction rule
    pub merchant: String,

    /// Transaction amount (non-negative, same unit as the account limit)
    pub amount: u64,

    /// When the transaction happened
    pub time: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(merchant: impl Into<String>, amount: u64, time: DateTime<Utc>) -> Self {
        Transaction {
            merchant: merchant.into(),
            amount,
            time,
        }
    }

    /// Milliseconds elapsed from `earlier` to this transaction
    ///
    /// Signed: a negative value means `earlier` actually happened after `self`.
    pub fn millis_since(&self, earlier: &Transaction) -> i64 {
        (self.time - earlier.time).num_milliseconds()
    }
}

/// Account creation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AccountRequest {
    /// Whether the card starts out active
    pub active_card: bool,

    /// Initial available limit
    pub available_limit: i64,
}

/// Allow-list mode toggle request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowListRequest {
    /// `true` switches transactions to the relaxed rule set
    pub active: bool,
}

/// Kind of an operation, used to select the rule list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Account,
    Transaction,
    AllowList,
}

/// One classified input record
///
/// Produced once per input record and dropped after its own processing step.
/// The serde representation is the externally tagged input shape, e.g.
/// `{"account": {"active-card": true, "available-limit": 100}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    /// Create the account
    Account(AccountRequest),

    /// Authorize a transaction
    Transaction(Transaction),

    /// Toggle allow-list mode
    AllowList(AllowListRequest),
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Account(_) => OperationKind::Account,
            Operation::Transaction(_) => OperationKind::Transaction,
            Operation::AllowList(_) => OperationKind::AllowList,
        }
    }
}
