//! PCM sample decoding.
//!
//! The data payload is sliced into frames of `block_align` bytes, each holding
//! one little-endian integer per channel. Only whole frames inside the file
//! are produced: a declared size past end of file is clamped, and a trailing
//! partial frame is dropped rather than zero-padded.

use std::ops::Index;

use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cursor::ChunkCursor;
use crate::error::{WavError, WavResult};
use crate::header::FormatDescriptor;
use crate::scanner::DataChunk;

/// How 8-bit samples are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EightBitMode {
    /// Unsigned with a 128 offset (the WAV convention). 128 decodes to 0.
    #[default]
    Unsigned,
    /// Two's-complement signed bytes.
    Signed,
}

/// One value per channel at a single time instant, channel 1 first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFrame(Vec<i32>);

impl SampleFrame {
    /// Number of channels in the frame.
    pub fn channels(&self) -> usize {
        self.0.len()
    }

    /// Per-channel values.
    pub fn values(&self) -> &[i32] {
        &self.0
    }

    /// Value for a zero-based channel index.
    pub fn get(&self, channel: usize) -> Option<i32> {
        self.0.get(channel).copied()
    }

    /// Consumes the frame into its values.
    pub fn into_values(self) -> Vec<i32> {
        self.0
    }
}

impl From<Vec<i32>> for SampleFrame {
    fn from(values: Vec<i32>) -> Self {
        SampleFrame(values)
    }
}

impl Index<usize> for SampleFrame {
    type Output = i32;

    fn index(&self, channel: usize) -> &i32 {
        &self.0[channel]
    }
}

/// Size accounting for a decoded data chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    /// Whole frames available.
    pub frames: u64,
    /// Payload size claimed by the chunk header.
    pub declared_bytes: u64,
    /// Payload bytes present in the file.
    pub available_bytes: u64,
    /// Trailing bytes that did not fill a whole frame.
    pub discarded_bytes: u64,
    /// True when the declared payload runs past end of file.
    pub truncated: bool,
}

/// Decodes a data chunk into frames.
#[derive(Debug, Clone, Copy)]
pub struct SampleDecoder {
    format: FormatDescriptor,
    eight_bit: EightBitMode,
}

impl SampleDecoder {
    /// Creates a decoder for a validated format.
    pub fn new(format: FormatDescriptor) -> Self {
        Self {
            format,
            eight_bit: EightBitMode::default(),
        }
    }

    /// Sets the 8-bit interpretation.
    pub fn with_eight_bit(mut self, mode: EightBitMode) -> Self {
        self.eight_bit = mode;
        self
    }

    /// Decodes the data chunk payload starting at the cursor.
    ///
    /// Fails if the format does not validate, or with
    /// [`WavError::CursorPastPayload`] if the cursor is already past
    /// `data.payload_offset`. The cursor is left after the consumed payload.
    /// Calling again with a fresh cursor restarts the sequence.
    pub fn decode<'a>(
        &self,
        data: &DataChunk,
        cursor: &mut ChunkCursor<'a>,
    ) -> WavResult<Frames<'a>> {
        self.format.validate()?;
        if cursor.position() > data.payload_offset {
            return Err(WavError::CursorPastPayload {
                position: cursor.position(),
                payload_offset: data.payload_offset,
            });
        }
        if cursor.position() < data.payload_offset {
            cursor.skip(data.payload_offset - cursor.position())?;
        }

        let declared = data.declared_size as usize;
        let available = declared.min(cursor.remaining());
        let frame_size = self.format.frame_size();
        let whole = available - available % frame_size;

        let payload = cursor.read_exact(whole)?;
        cursor.skip(available - whole)?;
        if declared % 2 == 1 && available == declared && cursor.remaining() > 0 {
            cursor.skip(1)?;
        }

        let stats = FrameStats {
            frames: (whole / frame_size) as u64,
            declared_bytes: declared as u64,
            available_bytes: available as u64,
            discarded_bytes: (available - whole) as u64,
            truncated: available < declared,
        };
        if stats.truncated {
            warn!(
                declared = stats.declared_bytes,
                available = stats.available_bytes,
                "data chunk truncated by end of file"
            );
        }
        if stats.discarded_bytes > 0 {
            warn!(
                discarded = stats.discarded_bytes,
                frame_size, "dropping trailing partial frame"
            );
        }

        Ok(Frames {
            payload,
            pos: 0,
            channels: self.format.channels as usize,
            bytes_per_sample: self.format.bytes_per_sample(),
            eight_bit: self.eight_bit,
            stats,
        })
    }
}

/// Decodes a data chunk with the default 8-bit interpretation.
pub fn decode<'a>(
    data: &DataChunk,
    format: &FormatDescriptor,
    cursor: &mut ChunkCursor<'a>,
) -> WavResult<Frames<'a>> {
    SampleDecoder::new(*format).decode(data, cursor)
}

/// Lazy, finite sequence of frames over a borrowed payload.
///
/// Cloning restarts from the clone's current position.
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    payload: &'a [u8],
    pos: usize,
    channels: usize,
    bytes_per_sample: usize,
    eight_bit: EightBitMode,
    stats: FrameStats,
}

impl<'a> Frames<'a> {
    /// Size accounting for the whole chunk.
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Whole-frame payload bytes.
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    fn frame_size(&self) -> usize {
        self.channels * self.bytes_per_sample
    }
}

impl Iterator for Frames<'_> {
    type Item = SampleFrame;

    fn next(&mut self) -> Option<SampleFrame> {
        let frame_size = self.frame_size();
        if frame_size == 0 || self.pos + frame_size > self.payload.len() {
            return None;
        }

        let frame = &self.payload[self.pos..self.pos + frame_size];
        self.pos += frame_size;
        let values = frame
            .chunks_exact(self.bytes_per_sample)
            .map(|sample| decode_sample(sample, self.eight_bit))
            .collect();
        Some(SampleFrame(values))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let frame_size = self.frame_size();
        let left = if frame_size == 0 {
            0
        } else {
            (self.payload.len() - self.pos) / frame_size
        };
        (left, Some(left))
    }
}

impl ExactSizeIterator for Frames<'_> {}

/// Decodes one little-endian sample of 1 to 4 bytes.
fn decode_sample(bytes: &[u8], eight_bit: EightBitMode) -> i32 {
    match bytes.len() {
        1 => match eight_bit {
            EightBitMode::Unsigned => bytes[0] as i32 - 128,
            EightBitMode::Signed => bytes[0] as i8 as i32,
        },
        2 => LittleEndian::read_i16(bytes) as i32,
        3 => LittleEndian::read_i24(bytes),
        4 => LittleEndian::read_i32(bytes),
        n => unreachable!("unsupported sample width {n}"),
    }
}
