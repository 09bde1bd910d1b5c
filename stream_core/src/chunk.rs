//! Inbound audio fragment assembly.
//!
//! Fragments arrive Base64-encoded inside `audio-delta` envelopes. Each
//! one is decoded and written to the output sink immediately; memory use
//! stays O(1) in total audio length because synthesis output length is
//! unbounded at session-open time. The sink write may block, and that
//! blocking is the protocol's only backpressure mechanism.

use std::io::Write;

use base64::{engine::general_purpose, Engine as _};

use crate::error::SessionError;

pub struct ChunkAssembler<W: Write> {
    sink: W,
    bytes_written: u64,
}

impl<W: Write> ChunkAssembler<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            bytes_written: 0,
        }
    }

    /// Decode one fragment and write it through. Returns the number of raw
    /// bytes this fragment contributed.
    pub fn append(&mut self, fragment: &str) -> Result<usize, SessionError> {
        let bytes = general_purpose::STANDARD.decode(fragment)?;
        self.sink.write_all(&bytes)?;
        self.bytes_written += bytes.len() as u64;
        Ok(bytes.len())
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush the sink and return the cumulative byte count.
    pub fn finalize(mut self) -> Result<u64, SessionError> {
        self.sink.flush()?;
        Ok(self.bytes_written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_decoded_bytes_in_order() {
        let mut out = Vec::new();
        let mut assembler = ChunkAssembler::new(&mut out);
        assert_eq!(assembler.append("AQID").unwrap(), 3); // [1,2,3]
        assert_eq!(assembler.append("BAU=").unwrap(), 2); // [4,5]
        assert_eq!(assembler.bytes_written(), 5);
        assert_eq!(assembler.finalize().unwrap(), 5);
        assert_eq!(out, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn empty_fragment_is_zero_bytes() {
        let mut assembler = ChunkAssembler::new(Vec::new());
        assert_eq!(assembler.append("").unwrap(), 0);
        assert_eq!(assembler.finalize().unwrap(), 0);
    }

    #[test]
    fn malformed_encoding_is_a_chunk_decode_error() {
        let mut assembler = ChunkAssembler::new(Vec::new());
        let err = assembler.append("!!!not-base64!!!").unwrap_err();
        assert!(matches!(err, SessionError::ChunkDecode(_)));
    }
}
