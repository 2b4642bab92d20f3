//! Protocol error type.

use thiserror::Error;

/// Errors produced while encoding or decoding engine buffers.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Serializing a message to the codec format failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Deserializing a message from the codec format failed.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The engine emitted a message kind we recognize but have no
    /// byte layout for.
    #[error("message kind {0} has no supported layout")]
    UnsupportedMessage(u8),

    /// A buffer ended in the middle of a record.
    #[error("truncated buffer while reading {0}")]
    Truncated(&'static str),

    /// A buffer's framing or contents contradict themselves.
    #[error("malformed buffer: {0}")]
    Malformed(String),
}
