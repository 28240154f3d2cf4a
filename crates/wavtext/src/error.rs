//! Error types for WAV decoding.

use thiserror::Error;

use crate::tag::ChunkTag;

/// Result type for WAV operations.
pub type WavResult<T> = Result<T, WavError>;

/// Errors that can occur while reading a WAV file.
#[derive(Debug, Error)]
pub enum WavError {
    /// The file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cursor ran out of bytes in the middle of a read.
    #[error("unexpected end of file: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Bytes the read asked for.
        needed: usize,
        /// Bytes left in the file.
        remaining: usize,
    },

    /// The cursor handed to the sample decoder has already moved past the
    /// start of the data payload.
    #[error("cursor at offset {position} is past the data payload at offset {payload_offset}")]
    CursorPastPayload {
        /// Cursor position when decoding was requested.
        position: usize,
        /// File offset of the first payload byte.
        payload_offset: usize,
    },

    /// The RIFF descriptor or fmt chunk is invalid.
    #[error(transparent)]
    Header(#[from] HeaderError),

    /// The sub-chunk walk failed to locate the sample data.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Errors raised while decoding the RIFF descriptor and the fmt chunk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// The file does not start with "RIFF".
    #[error("not a RIFF file: expected tag \"RIFF\", found \"{found}\"")]
    BadRiffTag {
        /// Tag found at offset 0.
        found: ChunkTag,
    },

    /// The RIFF form type is not "WAVE".
    #[error("not a WAVE file: expected form \"WAVE\", found \"{found}\"")]
    BadFormatTag {
        /// Tag found at offset 8.
        found: ChunkTag,
    },

    /// The first sub-chunk is not "fmt ".
    #[error("missing fmt chunk: expected tag \"fmt \", found \"{found}\"")]
    MissingFmtChunk {
        /// Tag found at offset 12.
        found: ChunkTag,
    },

    /// The fmt chunk body is shorter than the 16 canonical bytes.
    #[error("fmt chunk too small: {size} bytes (need at least 16)")]
    ShortFmtChunk {
        /// Declared fmt chunk size.
        size: u32,
    },

    /// The audio format code is not linear PCM.
    #[error("unsupported compression: audio format {audio_format} (only PCM = 1 is supported)")]
    UnsupportedCompression {
        /// Audio format code from the fmt chunk.
        audio_format: u16,
    },

    /// Channel count, bit depth and block alignment disagree.
    #[error("inconsistent format: {message}")]
    InconsistentFormat {
        /// What disagreed.
        message: String,
    },

    /// Bit depth outside {8, 16, 24, 32}.
    #[error("unsupported bit depth: {bits_per_sample} bits per sample")]
    UnsupportedBitDepth {
        /// Bits per sample from the fmt chunk.
        bits_per_sample: u16,
    },
}

/// Errors raised while walking the sub-chunks that follow the fmt chunk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The file ended before a "data" chunk was found.
    #[error("no data chunk found")]
    NoDataChunk,

    /// A chunk claims more bytes than the file holds.
    #[error("malformed chunk \"{tag}\" at offset {offset}: size {size} exceeds the {remaining} bytes left in the file")]
    Malformed {
        /// Tag of the offending chunk.
        tag: ChunkTag,
        /// Offset of the chunk prologue.
        offset: usize,
        /// Declared payload size.
        size: u32,
        /// Bytes left after the prologue.
        remaining: usize,
    },
}

impl HeaderError {
    /// Creates an inconsistent format error.
    pub fn inconsistent(message: impl Into<String>) -> Self {
        Self::InconsistentFormat {
            message: message.into(),
        }
    }
}

impl WavError {
    /// Stable error code for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            WavError::Io(_) => "WAV_001",
            WavError::UnexpectedEof { .. } => "WAV_002",
            WavError::CursorPastPayload { .. } => "WAV_003",
            WavError::Header(err) => match err {
                HeaderError::BadRiffTag { .. } => "WAV_010",
                HeaderError::BadFormatTag { .. } => "WAV_011",
                HeaderError::MissingFmtChunk { .. } => "WAV_012",
                HeaderError::ShortFmtChunk { .. } => "WAV_013",
                HeaderError::UnsupportedCompression { .. } => "WAV_014",
                HeaderError::InconsistentFormat { .. } => "WAV_015",
                HeaderError::UnsupportedBitDepth { .. } => "WAV_016",
            },
            WavError::Scan(err) => match err {
                ScanError::NoDataChunk => "WAV_020",
                ScanError::Malformed { .. } => "WAV_021",
            },
        }
    }

    /// Error category.
    pub fn category(&self) -> &'static str {
        match self {
            WavError::Io(_) => "io",
            WavError::UnexpectedEof { .. } => "eof",
            WavError::CursorPastPayload { .. } => "cursor",
            WavError::Header(_) => "header",
            WavError::Scan(_) => "scan",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inconsistent_helper() {
        let err = HeaderError::inconsistent("block align 3, expected 4");
        assert!(err.to_string().contains("block align 3"));
    }

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            WavError::UnexpectedEof {
                needed: 4,
                remaining: 1,
            },
            WavError::CursorPastPayload {
                position: 6,
                payload_offset: 4,
            },
            HeaderError::BadRiffTag {
                found: ChunkTag::new(*b"RIFX"),
            }
            .into(),
            HeaderError::UnsupportedCompression { audio_format: 3 }.into(),
            ScanError::NoDataChunk.into(),
        ];
        let codes: Vec<_> = errors.iter().map(WavError::code).collect();
        assert_eq!(codes, ["WAV_002", "WAV_003", "WAV_010", "WAV_014", "WAV_020"]);
    }

    #[test]
    fn test_category() {
        let err: WavError = ScanError::NoDataChunk.into();
        assert_eq!(err.category(), "scan");
        assert_eq!(err.to_string(), "no data chunk found");
    }

    #[test]
    fn test_malformed_message() {
        let err = ScanError::Malformed {
            tag: ChunkTag::LIST,
            offset: 36,
            size: 1000,
            remaining: 12,
        };
        let msg = err.to_string();
        assert!(msg.contains("\"LIST\""));
        assert!(msg.contains("offset 36"));
    }
}
