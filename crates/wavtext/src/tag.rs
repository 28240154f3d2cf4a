//! Four-byte RIFF chunk identifiers.

use std::fmt;

/// A 4-byte chunk identifier.
///
/// Tags are compared as raw bytes. They are not null-terminated and may be
/// space padded (`"fmt "`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkTag([u8; 4]);

impl ChunkTag {
    /// RIFF container descriptor.
    pub const RIFF: ChunkTag = ChunkTag(*b"RIFF");
    /// WAVE form type.
    pub const WAVE: ChunkTag = ChunkTag(*b"WAVE");
    /// Format chunk.
    pub const FMT: ChunkTag = ChunkTag(*b"fmt ");
    /// Sample data chunk.
    pub const DATA: ChunkTag = ChunkTag(*b"data");
    /// Metadata list chunk.
    pub const LIST: ChunkTag = ChunkTag(*b"LIST");

    /// Wraps raw tag bytes.
    pub const fn new(bytes: [u8; 4]) -> Self {
        ChunkTag(bytes)
    }

    /// Reads a tag from the first four bytes of a slice.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
        Some(ChunkTag(bytes))
    }

    /// Raw tag bytes.
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for ChunkTag {
    fn from(bytes: [u8; 4]) -> Self {
        ChunkTag(bytes)
    }
}

impl PartialEq<[u8; 4]> for ChunkTag {
    fn eq(&self, other: &[u8; 4]) -> bool {
        &self.0 == other
    }
}

impl PartialEq<&[u8; 4]> for ChunkTag {
    fn eq(&self, other: &&[u8; 4]) -> bool {
        &self.0 == *other
    }
}

/// Printable ASCII is shown as-is, anything else as `\xNN`.
impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkTag(\"{}\")", self)
    }
}
