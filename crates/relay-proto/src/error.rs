//! Error types for framing and tokenizing.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Transport-level errors raised by the line codec.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when tokenizing a single line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MessageParseError {
    /// The line held nothing but whitespace.
    #[error("empty message")]
    EmptyMessage,
}
