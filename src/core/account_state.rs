//! Account state management module
//!
//! This module provides the `AccountState` struct which owns the single account
//! of an authorization run.
//!
//! The AccountState is responsible for:
//! - Creating the account exactly once
//! - Committing accepted transactions (limit decrement + history append)
//! - Toggling allow-list mode
//! - Providing a read-only view for rule evaluation and output
//!
//! None of the mutators validate business rules. They are the commit step that
//! runs after the validator reported zero violations.

use crate::types::{Account, AccountSummary, AuthorizerError, Transaction};

/// Owner of the run's account
///
/// One instance per authorization run/stream. The account is absent until the
/// first successful creation and is never destroyed afterwards.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AccountState {
    account: Option<Account>,
}

impl AccountState {
    /// Create an empty state with no account
    pub fn new() -> Self {
        AccountState { account: None }
    }

    /// Create the account
    ///
    /// # Errors
    ///
    /// Returns `AlreadyInitialized` if an account already exists. The existing
    /// account is left untouched.
    pub fn create(
        &mut self,
        active_card: bool,
        available_limit: i64,
    ) -> Result<&Account, AuthorizerError> {
        if self.account.is_some() {
            return Err(AuthorizerError::AlreadyInitialized);
        }

        Ok(&*self
            .account
            .insert(Account::new(active_card, available_limit)))
    }

    /// Commit an accepted transaction
    ///
    /// Decrements the available limit by the transaction amount and appends the
    /// transaction to the history.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotInitialized` if no account exists.
    pub fn apply_transaction(&mut self, transaction: Transaction) -> Result<(), AuthorizerError> {
        let account = self
            .account
            .as_mut()
            .ok_or(AuthorizerError::AccountNotInitialized)?;

        let amount = i64::try_from(transaction.amount).unwrap_or(i64::MAX);
        account.available_limit = account.available_limit.saturating_sub(amount);
        account.transactions.push(transaction);

        Ok(())
    }

    /// Set allow-list mode
    ///
    /// # Errors
    ///
    /// Returns `AccountNotInitialized` if no account exists.
    pub fn set_mode(&mut self, active: bool) -> Result<(), AuthorizerError> {
        let account = self
            .account
            .as_mut()
            .ok_or(AuthorizerError::AccountNotInitialized)?;

        account.allow_mode = active;
        Ok(())
    }

    /// Read-only view of the account, including its history
    pub fn snapshot(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    /// Account fields without history, as reported in results
    pub fn summary(&self) -> Option<AccountSummary> {
        self.account.as_ref().map(AccountSummary::from)
    }

    pub fn is_initialized(&self) -> bool {
        self.account.is_some()
    }

    /// Whether allow-list mode is active (false when no account exists)
    pub fn allow_mode(&self) -> bool {
        self.account.as_ref().is_some_and(|account| account.allow_mode)
    }
}
