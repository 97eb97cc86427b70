use crate::io::{InputSource, OutputShape};
use crate::logging::LogLevel;
use crate::strategy::{BatchConfig, RunConfig};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Authorize account operations read as JSON lines
#[derive(Parser, Debug)]
#[command(name = "authorizer")]
#[command(about = "Authorize account operations read as JSON lines", long_about = None)]
pub struct CliArgs {
    /// Input file path containing one operation per line
    #[arg(
        value_name = "INPUT",
        help = "Path to the input JSON-lines file ('-' or omitted reads stdin)"
    )]
    pub input_file: Option<PathBuf>,

    /// Run driver to use for processing operations
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Run driver: 'sync' for blocking reads or 'async' for batched tokio reads"
    )]
    pub strategy: StrategyType,

    /// Number of lines per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of operations per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Account fields included in output records
    #[arg(
        long = "output-shape",
        value_name = "SHAPE",
        default_value = "full",
        help = "Output account fields: 'full' includes allowed-list, 'basic' omits it"
    )]
    pub output_shape: OutputShape,

    /// Minimum level of diagnostics written to stderr
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: LogLevel,
}

/// Available run drivers
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Where operations are read from
    pub fn input_source(&self) -> InputSource {
        InputSource::from_arg(self.input_file.clone())
    }

    /// Create a RunConfig from CLI arguments
    ///
    /// Missing values fall back to defaults; an invalid batch size is replaced
    /// by the default with a warning.
    pub fn to_run_config(&self) -> RunConfig {
        let batch = match self.batch_size {
            Some(batch_size) => BatchConfig::new(batch_size),
            None => BatchConfig::default(),
        };

        RunConfig {
            strategy: self.strategy,
            batch,
            output: self.output_shape,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_strategy(&["program", "input.jsonl"], StrategyType::Sync)]
    #[case::explicit_sync(&["program", "--strategy", "sync", "input.jsonl"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "--strategy", "async", "input.jsonl"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.strategy, expected);
    }

    #[rstest]
    #[case::default_shape(&["program"], OutputShape::Full)]
    #[case::full(&["program", "--output-shape", "full"], OutputShape::Full)]
    #[case::basic(&["program", "--output-shape", "basic"], OutputShape::Basic)]
    fn test_output_shape_parsing(#[case] args: &[&str], #[case] expected: OutputShape) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.output_shape, expected);
    }

    #[rstest]
    #[case::no_input(&["program"], InputSource::Stdin)]
    #[case::dash(&["program", "-"], InputSource::Stdin)]
    #[case::file(&["program", "ops.jsonl"], InputSource::File(PathBuf::from("ops.jsonl")))]
    fn test_input_source(#[case] args: &[&str], #[case] expected: InputSource) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.input_source(), expected);
    }

    #[rstest]
    #[case::default_level(&["program"], LogLevel::Warn)]
    #[case::debug(&["program", "--log-level", "debug"], LogLevel::Debug)]
    fn test_log_level_parsing(#[case] args: &[&str], #[case] expected: LogLevel) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.log_level, expected);
    }

    #[rstest]
    #[case::all_defaults(&["program", "input.jsonl"], 1000)]
    #[case::custom_batch_size(&["program", "--batch-size", "2000", "input.jsonl"], 2000)]
    #[case::zero_batch_size(&["program", "--batch-size", "0", "input.jsonl"], 1000)]
    fn test_run_config_conversion(#[case] args: &[&str], #[case] expected_batch_size: usize) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_run_config();

        assert_eq!(config.batch.batch_size, expected_batch_size);
        assert_eq!(config.strategy, parsed.strategy);
        assert_eq!(config.output, parsed.output_shape);
    }

    #[rstest]
    #[case::invalid_strategy(&["program", "--strategy", "parallel", "input.jsonl"])]
    #[case::invalid_shape(&["program", "--output-shape", "compact"])]
    #[case::invalid_batch_size(&["program", "--batch-size", "many"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
