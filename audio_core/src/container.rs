use std::io::{self, Read};

use base64::{engine::general_purpose, Engine as _};

use crate::error::ContainerError;

const GROUP_MAGIC: &[u8; 4] = b"RIFF";
const FORM_MAGIC: &[u8; 4] = b"WAVE";
const FORMAT_TAG: &[u8; 4] = b"fmt ";
const PAYLOAD_TAG: &[u8; 4] = b"data";

/// Header size of the canonical two-chunk container layout.
const HEADER_LEN: usize = 44;

/// The four values that fully determine a valid container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerDescriptor {
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub channels: u16,
    /// Number of payload bytes following the header.
    pub payload_len: u32,
}

/// Wrap raw PCM bytes in a RIFF/WAVE container.
///
/// Emits the canonical two-chunk layout: a 16-byte format descriptor
/// followed by the payload chunk, all multi-byte integers little-endian.
/// Pure and deterministic: identical inputs yield byte-identical output.
pub fn write_container(
    pcm: &[u8],
    sample_rate: u32,
    bits_per_sample: u16,
    channels: u16,
) -> Vec<u8> {
    let byte_rate: u32 = sample_rate * channels as u32 * (bits_per_sample as u32 / 8);
    let block_align: u16 = channels * (bits_per_sample / 8);
    let data_size: u32 = pcm.len() as u32;
    let riff_size: u32 = 36 + data_size;

    let mut out = Vec::<u8>::with_capacity(HEADER_LEN + pcm.len());

    // RIFF header
    out.extend_from_slice(GROUP_MAGIC);
    out.extend_from_slice(&riff_size.to_le_bytes());
    out.extend_from_slice(FORM_MAGIC);

    // fmt chunk
    out.extend_from_slice(FORMAT_TAG);
    out.extend_from_slice(&16u32.to_le_bytes()); // fmt chunk size
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    out.extend_from_slice(PAYLOAD_TAG);
    out.extend_from_slice(&data_size.to_le_bytes());
    out.extend_from_slice(pcm);

    out
}

/// Convenience: container bytes as Base64 for JSON transports.
pub fn write_container_base64(
    pcm: &[u8],
    sample_rate: u32,
    bits_per_sample: u16,
    channels: u16,
) -> String {
    general_purpose::STANDARD.encode(write_container(pcm, sample_rate, bits_per_sample, channels))
}

/// Parsed container: format parameters plus the payload region as a stream.
///
/// Parsing walks the chunk list defensively: unknown chunks are skipped,
/// the scan stops at the payload chunk, and anything after the payload is
/// ignored. Exactly one format descriptor must precede the payload chunk;
/// if more than one is present the last one read wins.
#[derive(Debug)]
pub struct ContainerReader<R: Read> {
    descriptor: ContainerDescriptor,
    payload: io::Take<R>,
}

impl<R: Read> ContainerReader<R> {
    pub fn parse(mut source: R) -> Result<Self, ContainerError> {
        let mut offset: u64 = 0;

        let group = read_exact(&mut source, 4, &mut offset)?;
        if &group[..] != GROUP_MAGIC {
            return Err(bad_magic(0, GROUP_MAGIC, &group));
        }
        // overall-size field; the chunk walk is bounded by the input itself
        read_exact(&mut source, 4, &mut offset)?;
        let form = read_exact(&mut source, 4, &mut offset)?;
        if &form[..] != FORM_MAGIC {
            return Err(bad_magic(8, FORM_MAGIC, &form));
        }

        let mut format: Option<(u16, u32, u16)> = None;
        loop {
            let chunk_offset = offset;
            let tag = match read_chunk_tag(&mut source, &mut offset)? {
                Some(tag) => tag,
                // end of input with no payload chunk seen
                None => return Err(ContainerError::PayloadChunkMissing),
            };
            let size_bytes = read_exact(&mut source, 4, &mut offset)?;
            let size = u32::from_le_bytes([size_bytes[0], size_bytes[1], size_bytes[2], size_bytes[3]]);

            if &tag == FORMAT_TAG {
                if size < 16 {
                    return Err(ContainerError::FormatChunkTooShort {
                        offset: chunk_offset,
                        size,
                    });
                }
                let body = read_exact(&mut source, size as usize, &mut offset)?;
                // fixed offsets within the descriptor: channels @2, rate @4, bits @14
                let channels = u16::from_le_bytes([body[2], body[3]]);
                let sample_rate = u32::from_le_bytes([body[4], body[5], body[6], body[7]]);
                let bits_per_sample = u16::from_le_bytes([body[14], body[15]]);
                format = Some((channels, sample_rate, bits_per_sample));
            } else if &tag == PAYLOAD_TAG {
                let (channels, sample_rate, bits_per_sample) = format.ok_or(
                    ContainerError::FormatChunkMissing {
                        offset: chunk_offset,
                    },
                )?;
                return Ok(Self {
                    descriptor: ContainerDescriptor {
                        sample_rate,
                        bits_per_sample,
                        channels,
                        payload_len: size,
                    },
                    payload: source.take(size as u64),
                });
            } else {
                skip(&mut source, size as u64, &mut offset)?;
            }
        }
    }

    pub fn descriptor(&self) -> ContainerDescriptor {
        self.descriptor
    }

    /// The payload region, bounded to the size recorded in the header.
    pub fn payload(&mut self) -> &mut io::Take<R> {
        &mut self.payload
    }

    pub fn into_payload(self) -> io::Take<R> {
        self.payload
    }
}

impl<R: Read> Read for ContainerReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.payload.read(buf)
    }
}

fn bad_magic(offset: u64, expected: &[u8; 4], found: &[u8]) -> ContainerError {
    let mut f = [0u8; 4];
    f.copy_from_slice(found);
    ContainerError::BadMagic {
        offset,
        expected: *expected,
        found: f,
    }
}

fn read_exact<R: Read>(
    source: &mut R,
    len: usize,
    offset: &mut u64,
) -> Result<Vec<u8>, ContainerError> {
    let mut buf = vec![0u8; len];
    source.read_exact(&mut buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            ContainerError::Truncated { offset: *offset }
        } else {
            ContainerError::Io(e)
        }
    })?;
    *offset += len as u64;
    Ok(buf)
}

/// Read a 4-byte chunk tag, distinguishing a clean end of input (no more
/// chunks) from a tag torn mid-read.
fn read_chunk_tag<R: Read>(
    source: &mut R,
    offset: &mut u64,
) -> Result<Option<[u8; 4]>, ContainerError> {
    let mut tag = [0u8; 4];
    let mut filled = 0;
    while filled < 4 {
        match source.read(&mut tag[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => return Err(ContainerError::Truncated { offset: *offset + filled as u64 }),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ContainerError::Io(e)),
        }
    }
    *offset += 4;
    Ok(Some(tag))
}

fn skip<R: Read>(source: &mut R, len: u64, offset: &mut u64) -> Result<(), ContainerError> {
    let copied = io::copy(&mut source.take(len), &mut io::sink())?;
    *offset += copied;
    if copied != len {
        return Err(ContainerError::Truncated { offset: *offset });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout_matches_contract() {
        let out = write_container(&[0u8; 8], 16_000, 16, 1);
        assert_eq!(&out[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes(out[4..8].try_into().unwrap()), 36 + 8);
        assert_eq!(&out[8..12], b"WAVE");
        assert_eq!(&out[12..16], b"fmt ");
        assert_eq!(u32::from_le_bytes(out[16..20].try_into().unwrap()), 16);
        // byteRate = rate * channels * bits/8, blockAlign = channels * bits/8
        assert_eq!(u32::from_le_bytes(out[28..32].try_into().unwrap()), 32_000);
        assert_eq!(u16::from_le_bytes(out[32..34].try_into().unwrap()), 2);
    }

    #[test]
    fn base64_wrapper_encodes_the_same_bytes() {
        use base64::Engine;
        let raw = write_container(&[1, 2, 3], 8_000, 8, 1);
        let encoded = write_container_base64(&[1, 2, 3], 8_000, 8, 1);
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        assert_eq!(raw, decoded);
    }
}
