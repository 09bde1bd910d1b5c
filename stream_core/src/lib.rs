//! Realtime speech-synthesis streaming session.
//!
//! Drives a duplex, message-oriented channel through the synthesis
//! protocol: negotiate parameters, stream text in, receive audio back as
//! an ordered sequence of encoded fragments, and write the decoded bytes
//! straight through to an output sink. The channel itself is abstract
//! (`DuplexChannel`); a WebSocket implementation is provided for the
//! vendor endpoints that speak this protocol.
//!
//! Arrival order on the channel defines playback order; no sequence
//! numbers are trusted and no reordering buffer exists.

pub mod capabilities;
pub mod chunk;
pub mod config;
pub mod envelope;
pub mod error;
pub mod session;
pub mod transport;
pub mod validation;

pub use capabilities::{CapabilityTable, VoiceCapabilities};
pub use chunk::ChunkAssembler;
pub use config::{AudioEncoding, SessionConfig};
pub use envelope::{ClientEnvelope, DecodeError, ServerEnvelope};
pub use error::SessionError;
pub use session::{Completion, SessionClient, SessionOutcome, SessionState};
pub use transport::{DuplexChannel, WsChannel};
