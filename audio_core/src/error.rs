use thiserror::Error;

/// Container parse failures.
///
/// Offsets are absolute byte positions from the start of the input so that
/// callers can report where a malformed container went wrong.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("bad magic at byte {offset}: expected {expected:?}, found {found:?}")]
    BadMagic {
        offset: u64,
        expected: [u8; 4],
        found: [u8; 4],
    },

    #[error("container truncated at byte {offset}")]
    Truncated { offset: u64 },

    #[error("format chunk at byte {offset} is {size} bytes, too short for format fields")]
    FormatChunkTooShort { offset: u64, size: u32 },

    #[error("payload chunk at byte {offset} appears before any format chunk")]
    FormatChunkMissing { offset: u64 },

    #[error("no payload chunk found before end of input")]
    PayloadChunkMissing,

    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
}
