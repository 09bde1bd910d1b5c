use std::time::Duration;

use thiserror::Error;

use crate::session::SessionState;

/// Session error taxonomy.
///
/// Each variant carries enough context for a caller to map it to its own
/// error-code scheme; this crate does not format user-facing text.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Channel could not be established or dropped unexpectedly.
    #[error("connection error: {0}")]
    Connection(String),

    /// No `session-ready` acknowledgment within the configured deadline.
    #[error("no session-ready within {waited:?}")]
    HandshakeTimeout { waited: Duration },

    /// Terminal error envelope; the server message is passed through verbatim.
    #[error("server reported error: {message}")]
    ServerReported { message: String },

    /// Malformed audio fragment encoding. An audio stream with a gap cannot
    /// be safely continued, so this aborts the session.
    #[error("malformed audio fragment: {0}")]
    ChunkDecode(#[from] base64::DecodeError),

    /// Output sink failure while writing decoded audio.
    #[error("output sink error: {0}")]
    Sink(#[from] std::io::Error),

    /// Outbound envelope could not be serialized.
    #[error("envelope encode failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// Rejected input fragment.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Operation not legal in the session's current state.
    #[error("operation not permitted in session state {0:?}")]
    InvalidState(SessionState),
}
