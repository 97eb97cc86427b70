//! Business-rule violation labels
//!
//! Every failed authorization check is reported as one of these labels. They are
//! part of the output contract, so the serialized form is the exact kebab-case
//! string consumers match on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named business-rule failure
///
/// Violations are results, not errors: an operation can produce zero, one or
/// several of them and processing always continues with the next operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Violation {
    /// An account creation arrived after the account already exists
    AccountAlreadyInitialized,

    /// A transaction arrived before any account was created
    AccountNotInitialized,

    /// The account card is inactive
    CardNotActive,

    /// The transaction amount exceeds the available limit
    InsufficientLimit,

    /// Three or more transactions were already accepted within the window
    HighFrequencySmallInterval,

    /// A transaction with the same merchant and amount was accepted within the window
    DoubledTransaction,
}

impl Violation {
    /// The label as it appears in output records
    pub const fn as_str(self) -> &'static str {
        match self {
            Violation::AccountAlreadyInitialized => "account-already-initialized",
            Violation::AccountNotInitialized => "account-not-initialized",
            Violation::CardNotActive => "card-not-active",
            Violation::InsufficientLimit => "insufficient-limit",
            Violation::HighFrequencySmallInterval => "high-frequency-small-interval",
            Violation::DoubledTransaction => "doubled-transaction",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
