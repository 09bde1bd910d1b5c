//! Voice capability registry.
//!
//! Servers differ in which encodings and sample rates each voice supports.
//! Validating a config locally before opening a session turns a
//! would-be server rejection into an immediate `InvalidInput`.

use std::collections::HashMap;

use crate::config::{AudioEncoding, SessionConfig};
use crate::error::SessionError;

/// What one voice can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceCapabilities {
    pub encodings: Vec<AudioEncoding>,
    pub sample_rates: Vec<u32>,
}

/// Lookup table keyed by voice name.
#[derive(Debug, Clone, Default)]
pub struct CapabilityTable {
    voices: HashMap<String, VoiceCapabilities>,
}

impl CapabilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, voice: impl Into<String>, capabilities: VoiceCapabilities) {
        self.voices.insert(voice.into(), capabilities);
    }

    pub fn get(&self, voice: &str) -> Option<&VoiceCapabilities> {
        self.voices.get(voice)
    }

    /// True when the table has an entry for the config's voice that covers
    /// both its encoding and sample rate. Unknown voices are not allowed;
    /// an empty table allows nothing.
    pub fn allows(&self, config: &SessionConfig) -> bool {
        self.voices.get(&config.voice).is_some_and(|caps| {
            caps.encodings.contains(&config.encoding)
                && caps.sample_rates.contains(&config.sample_rate)
        })
    }

    /// `allows` as a fallible check, for call sites that propagate errors.
    pub fn check(&self, config: &SessionConfig) -> Result<(), SessionError> {
        if self.allows(config) {
            Ok(())
        } else {
            Err(SessionError::InvalidInput(format!(
                "voice {:?} does not support {:?} at {} Hz",
                config.voice, config.encoding, config.sample_rate
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CapabilityTable {
        let mut t = CapabilityTable::new();
        t.insert(
            "alloy",
            VoiceCapabilities {
                encodings: vec![AudioEncoding::Pcm16, AudioEncoding::Pcm32],
                sample_rates: vec![16_000, 24_000],
            },
        );
        t
    }

    fn config(voice: &str, rate: u32, encoding: AudioEncoding) -> SessionConfig {
        SessionConfig {
            voice: voice.to_string(),
            sample_rate: rate,
            encoding,
            ..SessionConfig::default()
        }
    }

    #[test]
    fn allows_supported_combination() {
        assert!(table().allows(&config("alloy", 24_000, AudioEncoding::Pcm16)));
    }

    #[test]
    fn rejects_unknown_voice() {
        assert!(!table().allows(&config("nova", 24_000, AudioEncoding::Pcm16)));
    }

    #[test]
    fn rejects_unsupported_rate_or_encoding() {
        let t = table();
        assert!(!t.allows(&config("alloy", 48_000, AudioEncoding::Pcm16)));
        assert!(!t.allows(&config("alloy", 24_000, AudioEncoding::Pcm8)));
    }

    #[test]
    fn check_reports_invalid_input() {
        let err = table()
            .check(&config("alloy", 48_000, AudioEncoding::Pcm16))
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidInput(_)));
    }
}
