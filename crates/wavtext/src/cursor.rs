//! Forward-only byte reader over a loaded file.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{WavError, WavResult};
use crate::tag::ChunkTag;

/// A forward-only cursor over the bytes of a RIFF file.
///
/// Every read either returns exactly the bytes asked for or fails with
/// [`WavError::UnexpectedEof`]; the position never moves backward.
#[derive(Debug, Clone)]
pub struct ChunkCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ChunkCursor<'a> {
    /// Creates a cursor at the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Current byte offset from the start of the file.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of the underlying file.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the file is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes left between the position and end of file.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Reads exactly `n` bytes and advances past them.
    pub fn read_exact(&mut self, n: usize) -> WavResult<&'a [u8]> {
        self.ensure(n)?;
        let start = self.pos;
        self.pos += n;
        Ok(&self.bytes[start..self.pos])
    }

    /// Advances by `n` bytes without reading them.
    pub fn skip(&mut self, n: usize) -> WavResult<()> {
        self.ensure(n)?;
        self.pos += n;
        Ok(())
    }

    /// Returns the next 4-byte tag without advancing.
    pub fn peek_tag(&self) -> WavResult<ChunkTag> {
        self.ensure(4)?;
        let bytes = &self.bytes[self.pos..self.pos + 4];
        Ok(ChunkTag::new([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads a 4-byte tag.
    pub fn read_tag(&mut self) -> WavResult<ChunkTag> {
        let tag = self.peek_tag()?;
        self.pos += 4;
        Ok(tag)
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16_le(&mut self) -> WavResult<u16> {
        Ok(LittleEndian::read_u16(self.read_exact(2)?))
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32_le(&mut self) -> WavResult<u32> {
        Ok(LittleEndian::read_u32(self.read_exact(4)?))
    }

    fn ensure(&self, n: usize) -> WavResult<()> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(WavError::UnexpectedEof {
                needed: n,
                remaining,
            });
        }
        Ok(())
    }
}
