//! Rust Authorizer CLI
//!
//! Command-line interface for authorizing account operations read as JSON lines.
//!
//! # Usage
//!
//! ```bash
//! cargo run < operations.jsonl
//! cargo run -- operations.jsonl
//! cargo run -- --strategy async --batch-size 500 operations.jsonl
//! cargo run -- --output-shape basic --log-level debug operations.jsonl
//! ```
//!
//! Every input line is one operation; for every operation exactly one output
//! line is written to stdout, in input order. Diagnostics go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (input not found or unreadable, output not writable, etc.)

use rust_authorizer::cli;
use rust_authorizer::logging;
use rust_authorizer::strategy;
use std::process;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    if let Err(e) = logging::init_logging(args.log_level) {
        eprintln!("Warning: {}", e);
    }

    let config = args.to_run_config();
    let strategy = strategy::create_strategy(&config);

    // Output goes to stdout
    let mut output = std::io::stdout().lock();
    if let Err(e) = strategy.process(&args.input_source(), &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
