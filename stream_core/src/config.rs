// Configuration for synthesis sessions

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Output encodings this subsystem can frame into a container.
/// Compressed vendor encodings are decoded by an external decoder and are
/// not represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AudioEncoding {
    Pcm8,
    Pcm16,
    Pcm32,
}

impl AudioEncoding {
    pub fn bits_per_sample(&self) -> u16 {
        match self {
            AudioEncoding::Pcm8 => 8,
            AudioEncoding::Pcm16 => 16,
            AudioEncoding::Pcm32 => 32,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub voice: String,
    pub sample_rate: u32,
    pub encoding: AudioEncoding,
    pub handshake_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            voice: "alloy".to_string(),
            sample_rate: 24_000,
            encoding: AudioEncoding::Pcm16,
            handshake_timeout_secs: 10,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let voice = std::env::var("SESSION_VOICE").unwrap_or(defaults.voice);

        let sample_rate = std::env::var("SESSION_SAMPLE_RATE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.sample_rate);

        let encoding = std::env::var("SESSION_OUTPUT_ENCODING")
            .ok()
            .and_then(|v| serde_json::from_value(serde_json::Value::String(v)).ok())
            .unwrap_or(defaults.encoding);

        let handshake_timeout_secs = std::env::var("SESSION_HANDSHAKE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.handshake_timeout_secs);

        Self {
            voice,
            sample_rate,
            encoding,
            handshake_timeout_secs,
        }
    }

    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_secs(self.handshake_timeout_secs)
    }

    /// Frame collected PCM bytes from this session into a container.
    /// Synthesis output is mono.
    pub fn container_for(&self, pcm: &[u8]) -> Vec<u8> {
        audio_core::write_container(pcm, self.sample_rate, self.encoding.bits_per_sample(), 1)
    }
}
