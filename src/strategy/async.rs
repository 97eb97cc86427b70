//! Asynchronous batch processing strategy
//!
//! Reads operations in batches through tokio and authorizes each batch before
//! the next one is read.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size)
//!     ├── AsyncReader (batched JSON-lines reading)
//!     └── Authorizer (single account, sequential)
//! ```
//!
//! # Ordering
//!
//! All rules assume operations are applied strictly in input order, so the
//! account is never shared between tasks: reading is async, authorization of
//! a batch is a plain sequential loop on the runtime thread. The output is
//! identical to the synchronous strategy.

use crate::core::Authorizer;
use crate::io::json_format::write_result;
use crate::io::{AsyncReader, InputSource, OutputShape};
use crate::strategy::{BatchConfig, ProcessingStrategy, RunSummary};
use crate::types::AuthorizerError;
use std::io::Write;
use tracing::{debug, info};

/// Asynchronous batch processing strategy
#[derive(Debug, Clone, Copy)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
    shape: OutputShape,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig, shape: OutputShape) -> Self {
        Self { config, shape }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(
        &self,
        input: &InputSource,
        output: &mut dyn Write,
    ) -> Result<RunSummary, AuthorizerError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AuthorizerError::Runtime {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        runtime.block_on(async {
            let source = input.open_async().await?;
            let mut reader = AsyncReader::new(source);
            let mut authorizer = Authorizer::new();
            let mut summary = RunSummary::default();

            info!(
                input = %input.describe(),
                batch_size = self.config.batch_size,
                "Starting asynchronous authorization run"
            );

            loop {
                let batch = reader.read_batch(self.config.batch_size).await?;

                // An empty batch means the input is exhausted
                if batch.is_empty() {
                    break;
                }
                debug!(size = batch.len(), "Processing batch");

                for operation in batch {
                    let outcome = authorizer.process(operation);
                    summary.processed += 1;
                    if !outcome.is_accepted() {
                        summary.rejected += 1;
                    }
                    write_result(&outcome, self.shape, output)?;
                }
                output.flush()?;
            }

            summary.skipped = reader.skipped();
            info!(
                processed = summary.processed,
                rejected = summary.rejected,
                skipped = summary.skipped,
                "Authorization run finished"
            );
            Ok::<_, AuthorizerError>(summary)
        })
    }
}
