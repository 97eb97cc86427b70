//! Asynchronous JSON-lines reader with batch interface
//!
//! Provides batch reading of operations from any tokio `AsyncRead`.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - tokio-util's `AnyDelimiterCodec` framing for newline splitting, bounded
//!   by [`MAX_LINE_LENGTH`]
//! - futures' `StreamExt` to pull frames
//! - the json_format module for UTF-8 checking and decoding
//!
//! # Architecture
//!
//! ```text
//! AsyncRead → FramedRead<LineFramer> → AsyncReader → Batches of Operations
//!                                          ↓
//!                                  json_format module
//!                                     (decode_line)
//! ```

use crate::io::json_format::{decode_line, line_too_long, MAX_LINE_LENGTH};
use crate::types::{AuthorizerError, Operation};
use futures::stream::StreamExt;
use std::io;
use tokio::io::AsyncRead;
use tokio_util::bytes::{Bytes, BytesMut};
use tokio_util::codec::{AnyDelimiterCodec, AnyDelimiterCodecError, Decoder, FramedRead};
use tracing::warn;

/// One framed input line
#[derive(Debug)]
enum Frame {
    Line(Bytes),
    TooLong,
}

/// Newline framing that reports oversized lines as frames instead of errors
///
/// A codec error would end the `FramedRead` stream, so the length overflow is
/// turned into a [`Frame::TooLong`] and the inner codec discards the rest of
/// that line on its own.
struct LineFramer {
    inner: AnyDelimiterCodec,
}

impl LineFramer {
    fn new() -> Self {
        Self {
            inner: AnyDelimiterCodec::new_with_max_length(
                b"\n".to_vec(),
                Vec::new(),
                MAX_LINE_LENGTH,
            ),
        }
    }
}

fn to_frame(
    decoded: Result<Option<Bytes>, AnyDelimiterCodecError>,
) -> Result<Option<Frame>, io::Error> {
    match decoded {
        Ok(chunk) => Ok(chunk.map(Frame::Line)),
        Err(AnyDelimiterCodecError::MaxChunkLengthExceeded) => Ok(Some(Frame::TooLong)),
        Err(AnyDelimiterCodecError::Io(e)) => Err(e),
    }
}

impl Decoder for LineFramer {
    type Item = Frame;
    type Error = io::Error;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Frame>, io::Error> {
        to_frame(self.inner.decode(buf))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Frame>, io::Error> {
        to_frame(self.inner.decode_eof(buf))
    }
}

/// Asynchronous operation reader
///
/// Keeps at most one batch of operations in memory.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    lines: FramedRead<R, LineFramer>,
    line_num: u64,
    skipped: usize,
}

impl<R: AsyncRead + Unpin> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        Self {
            lines: FramedRead::new(reader, LineFramer::new()),
            line_num: 0,
            skipped: 0,
        }
    }

    /// Number of malformed lines skipped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Read a batch of operations
    ///
    /// Reads lines until `batch_size` operations were decoded or the input
    /// ends. Malformed lines (including invalid UTF-8 and lines longer than
    /// [`MAX_LINE_LENGTH`]) are logged and skipped; blank lines are skipped
    /// silently.
    ///
    /// # Returns
    ///
    /// The decoded operations in input order. An empty vector means the end of
    /// the input was reached.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the underlying reader fails.
    pub async fn read_batch(&mut self, batch_size: usize) -> Result<Vec<Operation>, AuthorizerError> {
        let mut batch = Vec::with_capacity(batch_size);

        while batch.len() < batch_size {
            let frame = match self.lines.next().await {
                Some(frame) => frame?,
                None => break,
            };
            self.line_num += 1;

            let decoded = match frame {
                Frame::Line(bytes) => decode_line(self.line_num, &bytes),
                Frame::TooLong => Err(line_too_long(self.line_num)),
            };

            match decoded {
                Ok(Some(operation)) => batch.push(operation),
                Ok(None) => {}
                Err(e) => {
                    warn!("Skipping malformed record: {}", e);
                    self.skipped += 1;
                }
            }
        }

        Ok(batch)
    }
}
