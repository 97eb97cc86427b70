//! I/O module
//!
//! Handles operation decoding and result output.
//!
//! # Components
//!
//! - `json_format` - JSON-lines format handling (line decoding, result serialization)
//! - `source` - Input source selection (file or stdin)
//! - `sync_reader` - Synchronous reader with iterator interface
//! - `async_reader` - Asynchronous reader with batch reading interface

pub mod async_reader;
pub mod json_format;
pub mod source;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use json_format::{decode_line, parse_line, to_json_line, write_result, OutputShape, MAX_LINE_LENGTH};
pub use source::InputSource;
pub use sync_reader::SyncReader;
