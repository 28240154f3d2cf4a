//! RIFF descriptor and fmt chunk decoding.

use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;
use tracing::{debug, warn};

use crate::cursor::ChunkCursor;
use crate::error::{HeaderError, WavResult};
use crate::tag::ChunkTag;

/// Audio format code for linear PCM.
pub const PCM_FORMAT: u16 = 1;

/// Size of the canonical PCM fmt body.
pub const FMT_BODY_LEN: usize = 16;

/// Bit depths the sample decoder understands.
pub const SUPPORTED_BIT_DEPTHS: [u16; 4] = [8, 16, 24, 32];

/// Audio format parameters from the fmt chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatDescriptor {
    /// Format code (1 = PCM).
    pub audio_format: u16,
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Average bytes per second.
    pub byte_rate: u32,
    /// Bytes per frame across all channels.
    pub block_align: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
}

impl FormatDescriptor {
    /// Creates a PCM format with derived byte rate and block alignment.
    ///
    /// # Panics
    /// Panics if the block alignment does not fit in a `u16` or the byte rate
    /// does not fit in a `u32`. Use [`FormatDescriptor::try_pcm`] for
    /// untrusted parameters.
    pub fn pcm(channels: u16, sample_rate: u32, bits_per_sample: u16) -> Self {
        Self::try_pcm(channels, sample_rate, bits_per_sample)
            .expect("PCM format parameters overflow the fmt chunk fields")
    }

    /// Creates a PCM format, failing if the derived fields overflow.
    pub fn try_pcm(
        channels: u16,
        sample_rate: u32,
        bits_per_sample: u16,
    ) -> Result<Self, HeaderError> {
        let block_align = channels.checked_mul(bits_per_sample / 8).ok_or_else(|| {
            HeaderError::inconsistent(format!(
                "block align for {} channel(s) x {} bits exceeds 65535",
                channels, bits_per_sample
            ))
        })?;
        let byte_rate = sample_rate
            .checked_mul(block_align as u32)
            .ok_or_else(|| {
                HeaderError::inconsistent(format!(
                    "byte rate for {} Hz x {} bytes per frame exceeds u32",
                    sample_rate, block_align
                ))
            })?;

        Ok(Self {
            audio_format: PCM_FORMAT,
            channels,
            sample_rate,
            byte_rate,
            block_align,
            bits_per_sample,
        })
    }

    /// Creates a 16-bit mono PCM format.
    pub fn mono(sample_rate: u32) -> Self {
        Self::pcm(1, sample_rate, 16)
    }

    /// Creates a 16-bit stereo PCM format.
    pub fn stereo(sample_rate: u32) -> Self {
        Self::pcm(2, sample_rate, 16)
    }

    /// Parses the first 16 bytes of a fmt body. Trailing bytes are ignored.
    pub fn from_fmt_body(body: &[u8]) -> Result<Self, HeaderError> {
        if body.len() < FMT_BODY_LEN {
            return Err(HeaderError::ShortFmtChunk {
                size: body.len() as u32,
            });
        }

        Ok(Self {
            audio_format: LittleEndian::read_u16(&body[0..2]),
            channels: LittleEndian::read_u16(&body[2..4]),
            sample_rate: LittleEndian::read_u32(&body[4..8]),
            byte_rate: LittleEndian::read_u32(&body[8..12]),
            block_align: LittleEndian::read_u16(&body[12..14]),
            bits_per_sample: LittleEndian::read_u16(&body[14..16]),
        })
    }

    /// Bytes per sample for one channel.
    pub fn bytes_per_sample(&self) -> usize {
        (self.bits_per_sample / 8) as usize
    }

    /// Bytes per frame, computed from channels and bit depth.
    pub fn frame_size(&self) -> usize {
        self.bytes_per_sample() * self.channels as usize
    }

    /// Block alignment implied by channels and bit depth.
    pub fn expected_block_align(&self) -> u32 {
        self.channels as u32 * self.bits_per_sample as u32 / 8
    }

    /// Byte rate implied by sample rate and block alignment.
    pub fn expected_byte_rate(&self) -> u64 {
        self.sample_rate as u64 * self.block_align as u64
    }

    /// Checks that the format can be decoded.
    pub fn validate(&self) -> Result<(), HeaderError> {
        if self.audio_format != PCM_FORMAT {
            return Err(HeaderError::UnsupportedCompression {
                audio_format: self.audio_format,
            });
        }

        if self.channels == 0 {
            return Err(HeaderError::inconsistent("channel count is 0"));
        }

        let expected = self.expected_block_align();
        if self.block_align as u32 != expected {
            return Err(HeaderError::inconsistent(format!(
                "block align {} does not match {} channel(s) x {} bits (expected {})",
                self.block_align, self.channels, self.bits_per_sample, expected
            )));
        }

        if !SUPPORTED_BIT_DEPTHS.contains(&self.bits_per_sample) {
            return Err(HeaderError::UnsupportedBitDepth {
                bits_per_sample: self.bits_per_sample,
            });
        }

        Ok(())
    }

    /// Duration in seconds of `frames` frames.
    pub fn duration_seconds(&self, frames: u64) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        frames as f64 / self.sample_rate as f64
    }
}

/// Everything read from the first 12 + 8 + fmt bytes of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiffHeader {
    /// RIFF size field (file length minus 8, as written by the encoder).
    pub riff_size: u32,
    /// Declared fmt chunk length.
    pub fmt_size: u32,
    /// Decoded format.
    pub format: FormatDescriptor,
}

/// Decodes the RIFF descriptor and fmt chunk, returning only the format.
pub fn decode_header(cursor: &mut ChunkCursor<'_>) -> WavResult<FormatDescriptor> {
    read_header(cursor).map(|header| header.format)
}

/// Decodes the RIFF descriptor and fmt chunk.
///
/// Leaves the cursor at the first sub-chunk after the fmt chunk (and its pad
/// byte, if the fmt size is odd).
pub fn read_header(cursor: &mut ChunkCursor<'_>) -> WavResult<RiffHeader> {
    let riff = cursor.read_tag()?;
    if riff != ChunkTag::RIFF {
        return Err(HeaderError::BadRiffTag { found: riff }.into());
    }

    let riff_size = cursor.read_u32_le()?;
    let actual = cursor.len() as u64;
    if riff_size as u64 + 8 != actual {
        warn!(
            riff_size,
            file_len = actual,
            "RIFF size field disagrees with file length"
        );
    }

    let wave = cursor.read_tag()?;
    if wave != ChunkTag::WAVE {
        return Err(HeaderError::BadFormatTag { found: wave }.into());
    }

    let fmt = cursor.read_tag()?;
    if fmt != ChunkTag::FMT {
        return Err(HeaderError::MissingFmtChunk { found: fmt }.into());
    }

    let fmt_size = cursor.read_u32_le()?;
    if (fmt_size as usize) < FMT_BODY_LEN {
        return Err(HeaderError::ShortFmtChunk { size: fmt_size }.into());
    }
    let body = cursor.read_exact(fmt_size as usize)?;
    if fmt_size % 2 == 1 && cursor.remaining() > 0 {
        cursor.skip(1)?;
    }

    let format = FormatDescriptor::from_fmt_body(body)?;
    debug!(
        audio_format = format.audio_format,
        channels = format.channels,
        sample_rate = format.sample_rate,
        bits_per_sample = format.bits_per_sample,
        fmt_size,
        "decoded fmt chunk"
    );
    format.validate()?;

    if format.byte_rate as u64 != format.expected_byte_rate() {
        warn!(
            byte_rate = format.byte_rate,
            expected = format.expected_byte_rate(),
            "byte rate does not match sample rate x block align"
        );
    }

    Ok(RiffHeader {
        riff_size,
        fmt_size,
        format,
    })
}
