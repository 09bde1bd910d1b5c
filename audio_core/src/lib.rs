//! Raw-PCM container framing for streamed speech synthesis.
//!
//! Synthesized audio arrives as bare PCM bytes; this crate wraps them in a
//! self-describing RIFF/WAVE container for storage, and parses such
//! containers back into format parameters plus a payload stream for local
//! playback. The reader walks chunks defensively (byte layouts come from
//! other programs) and skips the ones it does not recognize.

mod container;
mod error;
mod playback;

pub use container::{
    write_container, write_container_base64, ContainerDescriptor, ContainerReader,
};
pub use error::ContainerError;
pub use playback::{ensure_supported_bit_depth, PlaybackSink, UnsupportedSampleFormatError};
