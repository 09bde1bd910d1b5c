//! Wire envelopes and their codec.
//!
//! Every logical message on the channel is one JSON text frame with a
//! required `type` discriminator. Inbound frames that fail to parse, or
//! whose type is unrecognized, are skippable: heartbeat and vendor-side
//! extension frames must not abort an otherwise healthy session, so decode
//! failures at this level are never fatal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AudioEncoding;

/// Outbound control messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientEnvelope {
    #[serde(rename = "session-configure")]
    SessionConfigure {
        voice: String,
        output_encoding: AudioEncoding,
        sample_rate: u32,
    },
    #[serde(rename = "input-append")]
    InputAppend { text: String },
    #[serde(rename = "input-commit")]
    InputCommit,
    #[serde(rename = "session-finish")]
    SessionFinish,
}

/// Inbound messages the session reacts to. Unknown types do not parse and
/// are dropped by the receive loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEnvelope {
    #[serde(rename = "session-ready")]
    SessionReady,
    #[serde(rename = "audio-delta")]
    AudioDelta { audio: String },
    #[serde(rename = "session-complete")]
    SessionComplete,
    #[serde(rename = "session-error")]
    SessionError { message: String },
}

/// Inbound frame did not parse to a known envelope.
#[derive(Debug, Error)]
#[error("envelope decode failed: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Serialize an outbound message to its wire frame.
pub fn encode(envelope: &ClientEnvelope) -> Result<String, serde_json::Error> {
    serde_json::to_string(envelope)
}

/// Parse an inbound wire frame.
pub fn decode(frame: &str) -> Result<ServerEnvelope, DecodeError> {
    Ok(serde_json::from_str(frame)?)
}
