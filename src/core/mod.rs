//! Core business logic module
//!
//! This module contains the authorization components:
//! - `account_state` - Owned state of the run's single account
//! - `rules` - Rule descriptors and the rule registry
//! - `validator` - Ordered rule evaluation with short-circuiting
//! - `authorizer` - Operation dispatch: validate, commit, report

pub mod account_state;
pub mod authorizer;
pub mod rules;
pub mod validator;

pub use account_state::AccountState;
pub use authorizer::Authorizer;
pub use rules::{Rule, RuleRegistry};
pub use validator::Validator;
