//! JSON output types for machine-readable CLI output.
//!
//! Used by the `--json` flag on `info` and `chunks`.

use serde::{Deserialize, Serialize};
use wavtext::{ChunkRecord, FormatDescriptor, FrameStats, WavError, WavFile};

/// Error codes for CLI-level failures. Decode failures use the library's
/// `WAV_XXX` codes.
pub mod error_codes {
    /// Config file could not be read or parsed
    pub const CONFIG: &str = "CLI_001";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "WAV_014", "CLI_001")
    pub code: String,
    /// Error category (io, header, scan, eof, cursor, cli)
    pub category: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            category: "cli".to_string(),
            message: message.into(),
            file: None,
        }
    }

    /// Creates an error from a decode failure.
    pub fn from_wav_error(err: &WavError) -> Self {
        Self {
            code: err.code().to_string(),
            category: err.category().to_string(),
            message: err.to_string(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Header fields as reported by `info`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeaderReport {
    /// RIFF descriptor tag
    pub chunk_id: String,
    /// RIFF size field
    pub chunk_size: u32,
    /// RIFF form type
    pub format: String,
    /// fmt chunk tag
    pub subchunk1_id: String,
    /// fmt chunk length
    pub subchunk1_size: u32,
    /// Audio format code
    pub audio_format: u16,
    /// Number of channels
    pub num_channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Average bytes per second
    pub byte_rate: u32,
    /// Bytes per frame
    pub block_align: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Data chunk tag
    pub subchunk2_id: String,
    /// Declared data chunk size
    pub subchunk2_size: u32,
    /// File offset of the first sample byte
    pub data_offset: usize,
}

impl HeaderReport {
    /// Builds the report from a validated file.
    pub fn from_wav(wav: &WavFile) -> Self {
        let header = wav.header();
        let format: &FormatDescriptor = &header.format;
        Self {
            chunk_id: "RIFF".to_string(),
            chunk_size: header.riff_size,
            format: "WAVE".to_string(),
            subchunk1_id: "fmt ".to_string(),
            subchunk1_size: header.fmt_size,
            audio_format: format.audio_format,
            num_channels: format.channels,
            sample_rate: format.sample_rate,
            byte_rate: format.byte_rate,
            block_align: format.block_align,
            bits_per_sample: format.bits_per_sample,
            subchunk2_id: "data".to_string(),
            subchunk2_size: wav.data_chunk().declared_size,
            data_offset: wav.data_chunk().payload_offset,
        }
    }
}

/// JSON output for the `info` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoOutput {
    /// Whether the file decoded
    pub success: bool,
    /// Input file path
    pub file: String,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Header fields (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderReport>,
    /// Whole frames in the data chunk (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames: Option<u64>,
    /// Duration in seconds (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    /// Whether the data chunk runs past end of file (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncated: Option<bool>,
    /// BLAKE3 hash of the sample bytes (if requested)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcm_hash: Option<String>,
}

impl InfoOutput {
    /// Creates a successful info output.
    pub fn success(
        file: impl Into<String>,
        wav: &WavFile,
        stats: &FrameStats,
        pcm_hash: Option<String>,
    ) -> Self {
        Self {
            success: true,
            file: file.into(),
            errors: Vec::new(),
            header: Some(HeaderReport::from_wav(wav)),
            frames: Some(stats.frames),
            duration_seconds: Some(wav.format().duration_seconds(stats.frames)),
            truncated: Some(stats.truncated),
            pcm_hash,
        }
    }

    /// Creates a failed info output.
    pub fn failure(file: impl Into<String>, errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            file: file.into(),
            errors,
            header: None,
            frames: None,
            duration_seconds: None,
            truncated: None,
            pcm_hash: None,
        }
    }
}

/// One chunk in `chunks` output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkEntry {
    /// Chunk tag, non-printable bytes escaped
    pub id: String,
    /// Declared payload size
    pub size: u32,
    /// File offset of the chunk prologue
    pub offset: usize,
}

impl From<&ChunkRecord> for ChunkEntry {
    fn from(record: &ChunkRecord) -> Self {
        Self {
            id: record.tag.to_string(),
            size: record.size,
            offset: record.offset,
        }
    }
}

/// JSON output for the `chunks` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunksOutput {
    /// Whether the data chunk was found
    pub success: bool,
    /// Input file path
    pub file: String,
    /// Chunks visited in file order
    pub chunks: Vec<ChunkEntry>,
    /// Errors encountered
    pub errors: Vec<JsonError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavtext::writer::encode_frames;
    use wavtext::ScanError;

    #[test]
    fn test_error_from_wav_error() {
        let err = JsonError::from_wav_error(&ScanError::NoDataChunk.into()).with_file("a.wav");
        assert_eq!(err.code, "WAV_020");
        assert_eq!(err.category, "scan");
        assert_eq!(err.file.as_deref(), Some("a.wav"));
    }

    #[test]
    fn test_info_output_serialization() {
        let wav = encode_frames(&FormatDescriptor::stereo(44100), &[vec![1, -1]]);
        let wav = WavFile::from_bytes(wav).unwrap();
        let stats = wav.stats().unwrap();
        let output = InfoOutput::success("a.wav", &wav, &stats, None);

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["header"]["num_channels"], 2);
        assert_eq!(json["header"]["subchunk2_size"], 4);
        assert_eq!(json["frames"], 1);
        assert!(json.get("pcm_hash").is_none());
    }

    #[test]
    fn test_failure_output() {
        let output = InfoOutput::failure("a.wav", vec![JsonError::new(error_codes::CONFIG, "bad")]);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["errors"][0]["category"], "cli");
        assert!(json.get("header").is_none());
    }
}
