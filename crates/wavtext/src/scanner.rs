//! Sub-chunk walk that locates the "data" chunk.
//!
//! Chunks of any other type are treated as opaque spans and skipped using
//! their declared size plus the RIFF pad byte when the size is odd.

use serde::Serialize;
use tracing::debug;

use crate::cursor::ChunkCursor;
use crate::error::{ScanError, WavResult};
use crate::tag::ChunkTag;

/// Size of a sub-chunk prologue (tag + little-endian size).
pub const PROLOGUE_LEN: usize = 8;

/// Location of the sample payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataChunk {
    /// Payload length claimed by the chunk header.
    pub declared_size: u32,
    /// File offset of the first payload byte.
    pub payload_offset: usize,
}

impl DataChunk {
    /// Payload bytes actually present in a file of `file_len` bytes.
    pub fn available_size(&self, file_len: usize) -> usize {
        let present = file_len.saturating_sub(self.payload_offset);
        present.min(self.declared_size as usize)
    }

    /// Returns true if the declared payload runs past end of file.
    pub fn is_truncated(&self, file_len: usize) -> bool {
        self.available_size(file_len) < self.declared_size as usize
    }
}

/// A sub-chunk prologue seen during the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRecord {
    /// Chunk identifier.
    pub tag: ChunkTag,
    /// Declared payload size.
    pub size: u32,
    /// File offset of the prologue.
    pub offset: usize,
}

/// Finds the "data" chunk, leaving the cursor at its first payload byte.
pub fn find_data_chunk(cursor: &mut ChunkCursor<'_>) -> WavResult<DataChunk> {
    scan_chunks(cursor, |_| {})
}

/// Walks sub-chunks until "data", reporting every prologue to `visit`.
///
/// The cursor must sit on a prologue when called. The data chunk itself is
/// reported but not skipped.
pub fn scan_chunks<F>(cursor: &mut ChunkCursor<'_>, mut visit: F) -> WavResult<DataChunk>
where
    F: FnMut(&ChunkRecord),
{
    loop {
        if cursor.remaining() < PROLOGUE_LEN {
            return Err(ScanError::NoDataChunk.into());
        }

        let offset = cursor.position();
        let tag = cursor.read_tag()?;
        let size = cursor.read_u32_le()?;
        let record = ChunkRecord { tag, size, offset };
        debug!(tag = %tag, size, offset, "visited chunk");
        visit(&record);

        if tag == ChunkTag::DATA {
            return Ok(DataChunk {
                declared_size: size,
                payload_offset: cursor.position(),
            });
        }

        let remaining = cursor.remaining();
        if size as usize > remaining {
            return Err(ScanError::Malformed {
                tag,
                offset,
                size,
                remaining,
            }
            .into());
        }
        cursor.skip(size as usize)?;

        // Pad byte may be missing at the very end of the file.
        if size % 2 == 1 && cursor.remaining() > 0 {
            cursor.skip(1)?;
        }
    }
}
