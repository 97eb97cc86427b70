//! JSON-lines format handling for operations and results
//!
//! This module centralizes all wire format concerns, providing:
//! - Decoding of one input line into an [`Operation`]
//! - Encoding of an [`AuthorizationResult`] into one output line
//!
//! Input lines look like:
//!
//! ```text
//! {"account": {"active-card": true, "available-limit": 100}}
//! {"transaction": {"merchant": "Burger King", "amount": 20, "time": "2019-02-13T10:00:00.000Z"}}
//! {"allow-list": {"active": true}}
//! ```
//!
//! Output lines look like:
//!
//! ```text
//! {"account":{"active-card":true,"available-limit":80,"allowed-list":false},"violations":[]}
//! ```

use crate::types::{AccountSummary, AuthorizationResult, AuthorizerError, Operation, Violation};
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

/// Longest input line accepted, in bytes (excluding the line terminator)
pub const MAX_LINE_LENGTH: usize = 64 * 1024;

/// Key set of the `account` object in output records
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputShape {
    /// `active-card`, `available-limit`, `allowed-list`
    #[default]
    Full,
    /// `active-card`, `available-limit`
    Basic,
}

/// Decode one raw input line
///
/// # Errors
///
/// Returns a `Parse` error carrying `line_num` when the bytes are not valid
/// UTF-8 or do not form a valid operation record.
pub fn decode_line(line_num: u64, bytes: &[u8]) -> Result<Option<Operation>, AuthorizerError> {
    let line = std::str::from_utf8(bytes)
        .map_err(|e| AuthorizerError::parse(line_num, format!("invalid UTF-8: {}", e)))?;
    parse_line(line_num, line)
}

/// Parse error reported for a line longer than [`MAX_LINE_LENGTH`]
pub fn line_too_long(line_num: u64) -> AuthorizerError {
    AuthorizerError::parse(line_num, format!("line exceeds {} bytes", MAX_LINE_LENGTH))
}

/// Decode one input line
///
/// Returns `Ok(None)` for blank lines, which carry no operation.
///
/// # Errors
///
/// Returns a `Parse` error carrying `line_num` when the line is not a valid
/// operation record (bad JSON, unknown record kind, wrong field types or an
/// invalid timestamp).
pub fn parse_line(line_num: u64, line: &str) -> Result<Option<Operation>, AuthorizerError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    serde_json::from_str::<Operation>(trimmed)
        .map(Some)
        .map_err(|e| AuthorizerError::parse(line_num, e.to_string()))
}

#[derive(Serialize)]
struct OutputRecord<'a> {
    account: AccountView,
    violations: &'a [Violation],
}

#[derive(Serialize)]
#[serde(untagged)]
enum AccountView {
    Full(FullAccount),
    Basic(BasicAccount),
    Empty(EmptyAccount),
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct FullAccount {
    active_card: bool,
    available_limit: i64,
    allowed_list: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct BasicAccount {
    active_card: bool,
    available_limit: i64,
}

/// Serializes as `{}`
#[derive(Serialize)]
struct EmptyAccount {}

impl AccountView {
    fn new(summary: Option<AccountSummary>, shape: OutputShape) -> Self {
        match (summary, shape) {
            (None, _) => AccountView::Empty(EmptyAccount {}),
            (Some(s), OutputShape::Full) => AccountView::Full(FullAccount {
                active_card: s.active_card,
                available_limit: s.available_limit,
                allowed_list: s.allow_mode,
            }),
            (Some(s), OutputShape::Basic) => AccountView::Basic(BasicAccount {
                active_card: s.active_card,
                available_limit: s.available_limit,
            }),
        }
    }
}

/// Encode a result as a single compact JSON line (without the trailing newline)
pub fn to_json_line(
    result: &AuthorizationResult,
    shape: OutputShape,
) -> Result<String, AuthorizerError> {
    let record = OutputRecord {
        account: AccountView::new(result.account, shape),
        violations: &result.violations,
    };

    serde_json::to_string(&record).map_err(|e| AuthorizerError::Io {
        message: format!("Failed to encode result: {}", e),
    })
}

/// Write a result as one JSON line
///
/// # Errors
///
/// Returns an `Io` error if the output cannot be written.
pub fn write_result(
    result: &AuthorizationResult,
    shape: OutputShape,
    output: &mut dyn Write,
) -> Result<(), AuthorizerError> {
    let line = to_json_line(result, shape)?;
    writeln!(output, "{}", line)?;
    Ok(())
}
