//! Synchronous JSON-lines reader with iterator interface
//!
//! Provides a streaming iterator over operations read from a file or stdin.
//! Delegates decoding to the json_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<Operation, AuthorizerError>` for each non-blank line:
//!
//! ```no_run
//! use rust_authorizer::io::{InputSource, SyncReader};
//! use std::path::PathBuf;
//!
//! let source = InputSource::File(PathBuf::from("operations.jsonl"));
//! let reader = SyncReader::new(&source).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(operation) => println!("Processing operation: {:?}", operation),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found) are returned from `new()`
//! - Undecodable lines (bad JSON, invalid UTF-8, longer than
//!   [`MAX_LINE_LENGTH`]) are yielded as `Parse` errors with their line number
//! - A read failure is yielded as an `Io` error and ends the iteration

use crate::io::json_format::{decode_line, line_too_long, MAX_LINE_LENGTH};
use crate::io::source::InputSource;
use crate::types::{AuthorizerError, Operation};
use std::io::{self, BufRead, Read};

/// Synchronous operation reader
///
/// Reads one line at a time into a reused buffer bounded by
/// [`MAX_LINE_LENGTH`]; memory use does not grow with input size.
pub struct SyncReader {
    reader: Box<dyn BufRead + Send>,
    buf: Vec<u8>,
    line_num: u64,
    failed: bool,
}

impl SyncReader {
    /// Open `source` for reading
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` or `Io` if the source could not be opened.
    pub fn new(source: &InputSource) -> Result<Self, AuthorizerError> {
        Ok(Self::from_reader(source.open()?))
    }

    /// Read operations from an already opened reader
    pub fn from_reader(reader: Box<dyn BufRead + Send>) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_num: 0,
            failed: false,
        }
    }

    /// Read the next raw line into `buf`
    ///
    /// Returns `Ok(false)` at end of input. A line over the limit is left
    /// truncated in `buf` without its terminator.
    fn read_raw_line(&mut self) -> io::Result<bool> {
        self.buf.clear();
        let limit = MAX_LINE_LENGTH as u64 + 1;
        let read = self
            .reader
            .by_ref()
            .take(limit)
            .read_until(b'\n', &mut self.buf)?;
        Ok(read > 0)
    }

    fn is_oversized(&self) -> bool {
        self.buf.len() > MAX_LINE_LENGTH && !self.buf.ends_with(b"\n")
    }

    /// Drop the remainder of an oversized line, up to and including its newline
    fn discard_rest_of_line(&mut self) -> io::Result<()> {
        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                return Ok(());
            }
            let len = available.len();
            match available.iter().position(|&b| b == b'\n') {
                Some(pos) => {
                    self.reader.consume(pos + 1);
                    return Ok(());
                }
                None => self.reader.consume(len),
            }
        }
    }
}

impl Iterator for SyncReader {
    type Item = Result<Operation, AuthorizerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            match self.read_raw_line() {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e.into()));
                }
            }
            self.line_num += 1;

            if self.is_oversized() {
                if let Err(e) = self.discard_rest_of_line() {
                    self.failed = true;
                    return Some(Err(e.into()));
                }
                return Some(Err(line_too_long(self.line_num)));
            }

            // Blank lines carry no operation
            match decode_line(self.line_num, &self.buf) {
                Ok(Some(operation)) => return Some(Ok(operation)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OperationKind;
    use rstest::rstest;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn reader_for(content: &'static str) -> SyncReader {
        SyncReader::from_reader(Box::new(Cursor::new(content.as_bytes())))
    }

    #[test]
    fn test_reads_operations_in_order() {
        let reader = reader_for(
            "{\"account\": {\"active-card\": true, \"available-limit\": 100}}\n\
             {\"allow-list\": {\"active\": true}}\n\
             {\"transaction\": {\"merchant\": \"Burger King\", \"amount\": 20, \"time\": \"2019-02-13T10:00:00.000Z\"}}\n",
        );

        let kinds: Vec<OperationKind> = reader.map(|r| r.unwrap().kind()).collect();
        assert_eq!(
            kinds,
            vec![
                OperationKind::Account,
                OperationKind::AllowList,
                OperationKind::Transaction
            ]
        );
    }

    #[test]
    fn test_skips_blank_lines() {
        let reader = reader_for(
            "\n{\"allow-list\": {\"active\": true}}\n\n   \n{\"allow-list\": {\"active\": false}}\n",
        );

        assert_eq!(reader.filter_map(Result::ok).count(), 2);
    }

    #[test]
    fn test_reports_line_number_of_malformed_record() {
        let mut reader = reader_for(
            "{\"allow-list\": {\"active\": true}}\n\
             \n\
             {\"allow-list\": {\"active\": \"yes\"}}\n\
             {\"allow-list\": {\"active\": false}}\n",
        );

        assert!(reader.next().unwrap().is_ok());
        let error = reader.next().unwrap().unwrap_err();
        assert!(matches!(error, AuthorizerError::Parse { line: Some(3), .. }));

        // Reading continues after a malformed record
        assert!(reader.next().unwrap().is_ok());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_invalid_utf8_line_is_recoverable() {
        let content: &'static [u8] = b"{\"account\": {\"active-card\": true, \"available-limit\": 100}}\n\
            {\"transaction\": {\"merchant\": \"Caf\xe9\", \"amount\": 5, \"time\": \"2019-02-13T10:00:00.000Z\"}}\n\
            {\"allow-list\": {\"active\": true}}\n";
        let mut reader = SyncReader::from_reader(Box::new(Cursor::new(content)));

        assert!(reader.next().unwrap().is_ok());
        let error = reader.next().unwrap().unwrap_err();
        assert!(matches!(error, AuthorizerError::Parse { line: Some(2), .. }));
        assert_eq!(
            reader.next().unwrap().unwrap().kind(),
            OperationKind::AllowList
        );
        assert!(reader.next().is_none());
    }

    #[rstest]
    #[case::terminated("\n", true)]
    #[case::unterminated_swallows_next_record("", false)]
    fn test_oversized_line_is_skipped(#[case] terminator: &str, #[case] next_survives: bool) {
        let mut content = String::from("{\"allow-list\": {\"active\": true}}\n");
        content.push_str(&"x".repeat(MAX_LINE_LENGTH * 2 + 7));
        content.push_str(terminator);
        content.push_str("{\"allow-list\": {\"active\": false}}\n");
        let mut reader = SyncReader::from_reader(Box::new(Cursor::new(content.into_bytes())));

        assert!(reader.next().unwrap().is_ok());
        let error = reader.next().unwrap().unwrap_err();
        assert!(matches!(error, AuthorizerError::Parse { line: Some(2), .. }));
        assert!(error.is_recoverable());
        assert_eq!(reader.next().is_some(), next_survives);
    }

    #[test]
    fn test_line_at_limit_is_read() {
        let record = "{\"allow-list\": {\"active\": true}}";
        let line = format!("{}{}\n", " ".repeat(MAX_LINE_LENGTH - record.len()), record);
        let mut reader = SyncReader::from_reader(Box::new(Cursor::new(line.into_bytes())));

        assert!(reader.next().unwrap().is_ok());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_handles_crlf_line_endings() {
        let reader = reader_for("{\"allow-list\": {\"active\": true}}\r\n{\"allow-list\": {\"active\": false}}\r\n");

        assert!(reader.map(|r| r.unwrap()).count() == 2);
    }

    #[test]
    fn test_reads_from_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "{{\"account\": {{\"active-card\": false, \"available-limit\": 5}}}}")
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");

        let reader = SyncReader::new(&InputSource::File(file.path().to_path_buf())).unwrap();
        let operations: Vec<_> = reader.collect();

        assert_eq!(operations.len(), 1);
        assert_eq!(operations[0].as_ref().unwrap().kind(), OperationKind::Account);
    }
}
