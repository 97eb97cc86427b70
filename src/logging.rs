//! Logging setup
//!
//! Diagnostics are emitted with the `tracing` macros and written to stderr, so
//! stdout only ever carries output records. `RUST_LOG` overrides the level
//! chosen on the command line.

use crate::types::AuthorizerError;
use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Minimum severity of logged messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    /// The string representation for env filter
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Install the global stderr subscriber
///
/// # Errors
///
/// Returns a `Logging` error if a global subscriber is already installed.
pub fn init_logging(level: LogLevel) -> Result<(), AuthorizerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .map_err(|e| AuthorizerError::Logging {
            message: e.to_string(),
        })
}
