//! Line-based framing for tokio.
//!
//! [`LineCodec`] turns the inbound byte stream of one connection into lines.
//! The buffer handed to [`Decoder::decode`] is the connection's accumulator:
//! whatever follows the last terminator stays in it until the next read.
//! Encoding appends the canonical CRLF terminator to each outbound line.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

use crate::error;

/// The canonical line terminator written by the server.
pub const CRLF: &str = "\r\n";

/// Default maximum line length, terminator excluded.
pub const DEFAULT_MAX_LEN: usize = 512;

/// One unit produced by the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A complete, non-blank line with its terminator removed.
    Line(String),
    /// A line exceeded the length cap and was thrown away.
    Overflow {
        /// Bytes discarded when the overflow was detected.
        len: usize,
    },
}

/// Codec that splits on `\n`, tolerating an optional `\r` before it.
///
/// Lines are limited to `max_len` bytes. An oversized line is reported once
/// as [`Frame::Overflow`] and the remainder of it, up to the next terminator,
/// is skipped without buffering so a client that never terminates a line
/// cannot grow memory without bound.
#[derive(Debug)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length
    max_len: usize,
    /// Set while skipping the tail of an oversized line
    discarding: bool,
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::with_max_len(DEFAULT_MAX_LEN)
    }
}

impl LineCodec {
    /// Create a codec with the default 512 byte limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with a custom max line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
        }
    }

    /// The configured maximum line length.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    fn strip_terminator(line: &[u8]) -> &[u8] {
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        line.strip_suffix(b"\r").unwrap_or(line)
    }
}

impl Decoder for LineCodec {
    type Item = Frame;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<Frame>> {
        loop {
            let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
                if self.discarding {
                    src.clear();
                    self.next_index = 0;
                    return Ok(None);
                }

                // A partial line may legitimately hold a trailing '\r'.
                if src.len() > self.max_len + 1 {
                    let len = src.len();
                    warn!(bytes = len, limit = self.max_len, "discarding unterminated oversized line");
                    src.clear();
                    self.next_index = 0;
                    self.discarding = true;
                    return Ok(Some(Frame::Overflow { len }));
                }

                // No complete line yet - remember where we stopped
                self.next_index = src.len();
                return Ok(None);
            };

            let raw = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            if self.discarding {
                self.discarding = false;
                continue;
            }

            let body = Self::strip_terminator(&raw);
            if body.len() > self.max_len {
                warn!(bytes = body.len(), limit = self.max_len, "discarding oversized line");
                return Ok(Some(Frame::Overflow { len: body.len() }));
            }

            let text = String::from_utf8_lossy(body);
            if text.trim().is_empty() {
                continue;
            }

            return Ok(Some(Frame::Line(text.into_owned())));
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<Frame>> {
        match self.decode(src)? {
            Some(frame) => Ok(Some(frame)),
            None => {
                // An unterminated tail at EOF is never a command.
                src.clear();
                self.next_index = 0;
                Ok(None)
            }
        }
    }
}

impl Encoder<String> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> error::Result<()> {
        dst.reserve(line.len() + CRLF.len());
        dst.extend_from_slice(line.as_bytes());
        dst.extend_from_slice(CRLF.as_bytes());
        Ok(())
    }
}
