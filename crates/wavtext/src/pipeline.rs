//! Whole-file decode: open, header, chunk scan, samples.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::cursor::ChunkCursor;
use crate::error::WavResult;
use crate::header::{read_header, FormatDescriptor, RiffHeader};
use crate::samples::{EightBitMode, FrameStats, Frames, SampleDecoder, SampleFrame};
use crate::scanner::{scan_chunks, ChunkRecord, DataChunk};

/// Receives decoded frames in file order.
pub trait FrameSink {
    /// Called once before the first frame.
    fn begin(&mut self, _format: &FormatDescriptor) -> io::Result<()> {
        Ok(())
    }

    /// Called for every frame.
    fn frame(&mut self, frame: &SampleFrame) -> io::Result<()>;

    /// Called once after the last frame.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl FrameSink for Vec<SampleFrame> {
    fn frame(&mut self, frame: &SampleFrame) -> io::Result<()> {
        self.push(frame.clone());
        Ok(())
    }
}

/// A WAV file whose header and chunk layout have been validated.
///
/// Owns the file bytes; frames borrow from it and can be iterated any number
/// of times.
#[derive(Debug, Clone)]
pub struct WavFile {
    bytes: Vec<u8>,
    header: RiffHeader,
    chunks: Vec<ChunkRecord>,
    data: DataChunk,
}

impl WavFile {
    /// Reads and validates a file from disk.
    ///
    /// The file handle is closed before this returns, on success or error.
    pub fn open(path: impl AsRef<Path>) -> WavResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        debug!(path = %path.display(), len = bytes.len(), "read file");
        Self::from_bytes(bytes)
    }

    /// Validates an in-memory file.
    pub fn from_bytes(bytes: Vec<u8>) -> WavResult<Self> {
        let mut cursor = ChunkCursor::new(&bytes);
        let header = read_header(&mut cursor)?;

        let mut chunks = Vec::new();
        let data = scan_chunks(&mut cursor, |record| chunks.push(*record))?;

        Ok(Self {
            bytes,
            header,
            chunks,
            data,
        })
    }

    /// RIFF descriptor and fmt chunk.
    pub fn header(&self) -> &RiffHeader {
        &self.header
    }

    /// Decoded format.
    pub fn format(&self) -> &FormatDescriptor {
        &self.header.format
    }

    /// Sub-chunks visited after fmt, ending with the data chunk.
    pub fn chunks(&self) -> &[ChunkRecord] {
        &self.chunks
    }

    /// Location of the sample payload.
    pub fn data_chunk(&self) -> &DataChunk {
        &self.data
    }

    /// File length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the file holds no bytes (never true once validated).
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Frames with 8-bit samples read as unsigned.
    pub fn frames(&self) -> WavResult<Frames<'_>> {
        self.frames_with(EightBitMode::default())
    }

    /// Frames with an explicit 8-bit interpretation.
    pub fn frames_with(&self, eight_bit: EightBitMode) -> WavResult<Frames<'_>> {
        let mut cursor = ChunkCursor::new(&self.bytes);
        SampleDecoder::new(self.header.format)
            .with_eight_bit(eight_bit)
            .decode(&self.data, &mut cursor)
    }

    /// Frame count and truncation details.
    pub fn stats(&self) -> WavResult<FrameStats> {
        self.frames().map(|frames| frames.stats())
    }

    /// Duration of the whole frames in seconds.
    pub fn duration_seconds(&self) -> WavResult<f64> {
        let stats = self.stats()?;
        Ok(self.header.format.duration_seconds(stats.frames))
    }

    /// BLAKE3 hash of the whole-frame sample bytes, hex encoded.
    pub fn pcm_hash(&self) -> WavResult<String> {
        let frames = self.frames()?;
        Ok(blake3::hash(frames.payload()).to_hex().to_string())
    }

    /// Feeds every frame to `sink`.
    pub fn decode_into<S: FrameSink>(
        &self,
        eight_bit: EightBitMode,
        sink: &mut S,
    ) -> WavResult<FrameStats> {
        let frames = self.frames_with(eight_bit)?;
        let stats = frames.stats();

        sink.begin(self.format())?;
        for frame in frames {
            sink.frame(&frame)?;
        }
        sink.finish()?;

        info!(frames = stats.frames, "decoded samples");
        Ok(stats)
    }
}

/// Opens `path`, decodes it and hands every frame to `sink`.
pub fn decode_path<S: FrameSink>(
    path: impl AsRef<Path>,
    eight_bit: EightBitMode,
    sink: &mut S,
) -> WavResult<(FormatDescriptor, FrameStats)> {
    let wav = WavFile::open(path)?;
    let stats = wav.decode_into(eight_bit, sink)?;
    Ok((*wav.format(), stats))
}
