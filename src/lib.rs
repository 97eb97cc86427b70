//! Rust Authorizer Library
//! # Overview
//!
//! This library authorizes a stream of account operations (account creation,
//! allow-list toggles, transactions) against a single in-memory account,
//! reporting the resulting account state and any rule violations for every
//! operation.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Operation, Violation, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::account_state`] - Owned state of the run's account
//!   - [`core::rules`] - Rule descriptors grouped by operation kind and mode
//!   - [`core::validator`] - Ordered rule evaluation with short-circuiting
//!   - [`core::authorizer`] - Operation dispatch (validate, commit, report)
//! - [`io`] - JSON-lines input decoding and result output
//! - [`strategy`] - Run drivers (sync and async)
//! - [`logging`] - tracing subscriber setup
//!
//! # Rules
//!
//! - **account-already-initialized**: an account already exists
//! - **account-not-initialized**: a transaction arrived before the account (terminal)
//! - **card-not-active**: the card is inactive
//! - **insufficient-limit**: the amount exceeds the available limit
//! - **high-frequency-small-interval**: three transactions were already accepted within two minutes
//! - **doubled-transaction**: same merchant and amount already accepted within two minutes
//!
//! While allow-list mode is active, transactions are only checked for
//! card-not-active and insufficient-limit.
//!
//! # Example
//!
//! ```
//! use rust_authorizer::{AccountRequest, Authorizer, Operation};
//!
//! let mut authorizer = Authorizer::new();
//! let result = authorizer.process(Operation::Account(AccountRequest {
//!     active_card: true,
//!     available_limit: 100,
//! }));
//! assert!(result.violations.is_empty());
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use core::{AccountState, Authorizer, RuleRegistry, Validator};
pub use io::write_result;
pub use types::{
    Account, AccountRequest, AccountSummary, AllowListRequest, AuthorizationResult,
    AuthorizerError, Operation, OperationKind, Transaction, Violation,
};
