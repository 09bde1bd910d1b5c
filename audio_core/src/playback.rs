use std::io;

use thiserror::Error;

use crate::container::ContainerDescriptor;

/// Bit depth not recognized by the playback path.
///
/// The container reader deliberately does not validate bit depth; the
/// check belongs to whatever consumes the samples.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported sample format: {bits_per_sample}-bit")]
pub struct UnsupportedSampleFormatError {
    pub bits_per_sample: u16,
}

const SUPPORTED_BIT_DEPTHS: [u16; 3] = [8, 16, 32];

pub fn ensure_supported_bit_depth(bits_per_sample: u16) -> Result<(), UnsupportedSampleFormatError> {
    if SUPPORTED_BIT_DEPTHS.contains(&bits_per_sample) {
        Ok(())
    } else {
        Err(UnsupportedSampleFormatError { bits_per_sample })
    }
}

/// Audio output device abstraction.
///
/// Implementations own the device; this crate only hands them format
/// parameters and sample bytes. `write` may block, which is the intended
/// backpressure mechanism for streamed playback.
pub trait PlaybackSink {
    /// Prepare the device for the given format. Rejects bit depths the
    /// device cannot render.
    fn configure(
        &mut self,
        descriptor: &ContainerDescriptor,
    ) -> Result<(), UnsupportedSampleFormatError>;

    /// Queue raw sample bytes for playback.
    fn write(&mut self, pcm: &[u8]) -> io::Result<()>;

    /// Block until queued audio has drained.
    fn drain(&mut self) -> io::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_bit_depths() {
        assert!(ensure_supported_bit_depth(8).is_ok());
        assert!(ensure_supported_bit_depth(16).is_ok());
        assert!(ensure_supported_bit_depth(32).is_ok());
    }

    #[test]
    fn rejects_odd_bit_depths() {
        let err = ensure_supported_bit_depth(24).unwrap_err();
        assert_eq!(err.bits_per_sample, 24);
        assert!(ensure_supported_bit_depth(0).is_err());
    }
}
