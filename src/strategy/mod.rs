//! Processing strategy module
//!
//! This module defines the Strategy pattern for complete authorization runs,
//! encompassing reading operations, authorizing them and writing one result
//! line per operation. Different run drivers (blocking, async batched) can be
//! selected at runtime; all of them feed operations to a single
//! [`Authorizer`](crate::core::Authorizer) strictly in input order.

use crate::cli::StrategyType;
use crate::io::{InputSource, OutputShape};
use crate::types::AuthorizerError;
use std::io::Write;
use tracing::warn;

pub mod r#async;
pub mod sync;

pub use self::r#async::AsyncProcessingStrategy;
pub use sync::SyncProcessingStrategy;

/// Configuration for batched reading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of operations read per batch
    pub batch_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { batch_size: 1000 }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig, falling back to the default for a zero size
    pub fn new(batch_size: usize) -> Self {
        let default = Self::default();

        if batch_size == 0 {
            warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            return default;
        }

        Self { batch_size }
    }
}

/// Everything needed to set up one authorization run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub strategy: StrategyType,
    pub batch: BatchConfig,
    pub output: OutputShape,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyType::Sync,
            batch: BatchConfig::default(),
            output: OutputShape::Full,
        }
    }
}

/// Counts reported at the end of a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Operations authorized (one output line each)
    pub processed: usize,
    /// Operations rejected with at least one violation
    pub rejected: usize,
    /// Input lines skipped because they could not be decoded
    pub skipped: usize,
}

/// Processing strategy trait for complete authorization runs
pub trait ProcessingStrategy: Send + Sync {
    /// Authorize every operation from `input`, writing one result line per
    /// operation to `output` in input order
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input cannot be opened (file not found, permission denied)
    /// - A fatal I/O error occurs while reading or writing
    /// - The async runtime cannot be created
    ///
    /// Malformed input lines are logged and skipped; they do not fail the run.
    fn process(
        &self,
        input: &InputSource,
        output: &mut dyn Write,
    ) -> Result<RunSummary, AuthorizerError>;
}

/// Create a processing strategy for the given run configuration
pub fn create_strategy(config: &RunConfig) -> Box<dyn ProcessingStrategy> {
    match config.strategy {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(config.output)),
        StrategyType::Async => Box::new(AsyncProcessingStrategy::new(config.batch, config.output)),
    }
}
