//! Synchronous processing strategy
//!
//! Single-threaded run driver. Orchestrates the flow between the SyncReader
//! (input), the Authorizer (rules and state) and json_format (output).
//!
//! Operations are read, authorized and written one at a time, so memory use
//! only grows with the accepted transaction history.

use crate::core::Authorizer;
use crate::io::json_format::write_result;
use crate::io::{InputSource, OutputShape, SyncReader};
use crate::strategy::{ProcessingStrategy, RunSummary};
use crate::types::AuthorizerError;
use std::io::{BufWriter, Write};
use tracing::{info, warn};

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use rust_authorizer::io::{InputSource, OutputShape};
/// use rust_authorizer::strategy::{ProcessingStrategy, SyncProcessingStrategy};
///
/// let strategy = SyncProcessingStrategy::new(OutputShape::Full);
/// let mut output = std::io::stdout();
///
/// strategy
///     .process(&InputSource::Stdin, &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    shape: OutputShape,
}

impl SyncProcessingStrategy {
    pub fn new(shape: OutputShape) -> Self {
        Self { shape }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        input: &InputSource,
        output: &mut dyn Write,
    ) -> Result<RunSummary, AuthorizerError> {
        let reader = SyncReader::new(input)?;
        let mut authorizer = Authorizer::new();
        let mut writer = BufWriter::new(output);
        let mut summary = RunSummary::default();

        info!(input = %input.describe(), "Starting synchronous authorization run");

        for result in reader {
            let operation = match result {
                Ok(operation) => operation,
                Err(e) if e.is_recoverable() => {
                    warn!("Skipping malformed record: {}", e);
                    summary.skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let outcome = authorizer.process(operation);
            summary.processed += 1;
            if !outcome.is_accepted() {
                summary.rejected += 1;
            }
            write_result(&outcome, self.shape, &mut writer)?;
        }

        writer.flush()?;

        info!(
            processed = summary.processed,
            rejected = summary.rejected,
            skipped = summary.skipped,
            "Authorization run finished"
        );
        Ok(summary)
    }
}
