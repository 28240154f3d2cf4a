//! wavtext
//!
//! Reads RIFF/WAVE files holding linear PCM audio and decodes the sample
//! stream into per-channel integer frames.
//!
//! # Overview
//!
//! Decoding is a single forward pass over the file bytes:
//!
//! - **Header** - the 12-byte RIFF descriptor and the `fmt ` chunk are
//!   decoded into a [`FormatDescriptor`] and validated (PCM only, block
//!   alignment consistent with channels and bit depth)
//! - **Chunk scan** - the sub-chunks that follow are walked by their
//!   (tag, size) prologues until the `data` chunk; anything else is skipped,
//!   including the pad byte of odd-sized chunks
//! - **Samples** - the data payload is sliced into frames of 8, 16, 24 or
//!   32-bit little-endian samples, clamped to whole frames inside the file
//!
//! # Example
//!
//! ```ignore
//! use wavtext::WavFile;
//!
//! let wav = WavFile::open("input.wav")?;
//! println!("{} Hz, {} channel(s)", wav.format().sample_rate, wav.format().channels);
//! for frame in wav.frames()? {
//!     println!("{:?}", frame.values());
//! }
//! ```
//!
//! # Crate Structure
//!
//! - [`cursor`] - Forward-only byte reader
//! - [`header`] - RIFF descriptor and fmt chunk decoding
//! - [`scanner`] - Sub-chunk walk to the data chunk
//! - [`samples`] - PCM frame decoding
//! - [`pipeline`] - Whole-file decode and frame sinks
//! - [`export`] - Plain-text export
//! - [`writer`] - Minimal PCM WAV encoder

pub mod cursor;
pub mod error;
pub mod export;
pub mod header;
pub mod pipeline;
pub mod samples;
pub mod scanner;
pub mod tag;
pub mod writer;

pub use cursor::ChunkCursor;
pub use error::{HeaderError, ScanError, WavError, WavResult};
pub use export::{export_to_path, export_to_writer, ExportOptions, LineEnding, Separator};
pub use header::{decode_header, read_header, FormatDescriptor, RiffHeader};
pub use pipeline::{decode_path, FrameSink, WavFile};
pub use samples::{decode, EightBitMode, FrameStats, Frames, SampleDecoder, SampleFrame};
pub use scanner::{find_data_chunk, scan_chunks, ChunkRecord, DataChunk};
pub use tag::ChunkTag;
