//! Error types for the authorizer
//!
//! This module defines the errors that can occur around authorization. Business
//! rule failures are not errors; they are reported as
//! [`Violation`](super::Violation)s in the result of each operation.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, broken output pipe
//! - **Parsing Errors**: Malformed JSON lines, unknown record kinds, bad timestamps
//! - **State Errors**: Misuse of the account state outside the authorizer
//! - **Setup Errors**: Runtime or logging initialization failures

use thiserror::Error;

/// Main error type for the authorizer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizerError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading input or writing output
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// An input line could not be decoded into an operation
    ///
    /// This is a recoverable error - the line is skipped and processing
    /// continues with the next one.
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the decoding error
        message: String,
    },

    /// An account was created while one already exists
    #[error("Account already initialized")]
    AlreadyInitialized,

    /// The account was mutated before it was created
    #[error("Account not initialized")]
    AccountNotInitialized,

    /// The async runtime could not be started
    #[error("Runtime error: {message}")]
    Runtime {
        /// Description of the runtime failure
        message: String,
    },

    /// The logging subscriber could not be installed
    #[error("Failed to initialize logging: {message}")]
    Logging {
        /// Description of the logging failure
        message: String,
    },
}

impl From<std::io::Error> for AuthorizerError {
    fn from(error: std::io::Error) -> Self {
        AuthorizerError::Io {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for AuthorizerError {
    fn from(error: serde_json::Error) -> Self {
        // serde_json reports line 0 for errors that have no position
        let line = Some(error.line() as u64).filter(|l| *l > 0);

        AuthorizerError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

impl AuthorizerError {
    /// Create a Parse error for a given input line
    pub fn parse(line: u64, message: impl Into<String>) -> Self {
        AuthorizerError::Parse {
            line: Some(line),
            message: message.into(),
        }
    }

    /// Whether processing can continue after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AuthorizerError::Parse { .. })
    }
}
