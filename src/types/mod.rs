//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account state and its reported summary
//! - `operation`: Decoded operations and transactions
//! - `violation`: Business-rule violation labels
//! - `result`: Per-operation authorization result
//! - `error`: Error types for the authorizer

pub mod account;
pub mod error;
pub mod operation;
pub mod result;
pub mod violation;

pub use account::{Account, AccountSummary};
pub use error::AuthorizerError;
pub use operation::{AccountRequest, AllowListRequest, Operation, OperationKind, Transaction};
pub use result::AuthorizationResult;
pub use violation::Violation;
