//! Plain-text export of decoded frames.
//!
//! One line per frame, channel values joined by the configured separator.
//! File output goes through a temporary file in the destination directory
//! and is renamed into place only once every frame has been written.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::WavResult;
use crate::header::FormatDescriptor;
use crate::pipeline::{FrameSink, WavFile};
use crate::samples::{EightBitMode, FrameStats, SampleFrame};

/// Separator placed between channel values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    /// Tab between values.
    #[default]
    Tab,
    /// Each channel value on its own line.
    Newline,
    /// Comma between values.
    Comma,
}

/// Line terminator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    Crlf,
}

impl LineEnding {
    fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

/// Export formatting options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportOptions {
    /// Separator between channel values.
    pub separator: Separator,
    /// Line terminator.
    pub line_ending: LineEnding,
    /// Write a first line naming the channels.
    pub channel_header: bool,
    /// How 8-bit samples are interpreted.
    pub eight_bit: EightBitMode,
}

impl ExportOptions {
    /// Parses options from a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    fn separator_str(&self) -> &'static str {
        match self.separator {
            Separator::Tab => "\t",
            Separator::Newline => self.line_ending.as_str(),
            Separator::Comma => ",",
        }
    }
}

/// Channel names for the header line: `L`/`R` for stereo, `ch1..chN` otherwise.
pub fn channel_names(channels: u16) -> Vec<String> {
    if channels == 2 {
        return vec!["L".to_string(), "R".to_string()];
    }
    (1..=channels).map(|ch| format!("ch{}", ch)).collect()
}

/// Writes frames as text lines.
pub struct TextExporter<W: Write> {
    writer: W,
    options: ExportOptions,
    lines: u64,
}

impl<W: Write> TextExporter<W> {
    /// Creates an exporter over `writer`.
    pub fn new(writer: W, options: ExportOptions) -> Self {
        Self {
            writer,
            options,
            lines: 0,
        }
    }

    /// Frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.lines
    }

    /// Returns the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_fields<T: std::fmt::Display>(&mut self, fields: &[T]) -> io::Result<()> {
        let sep = self.options.separator_str();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.writer.write_all(sep.as_bytes())?;
            }
            write!(self.writer, "{}", field)?;
        }
        self.writer
            .write_all(self.options.line_ending.as_str().as_bytes())
    }
}

impl<W: Write> FrameSink for TextExporter<W> {
    fn begin(&mut self, format: &FormatDescriptor) -> io::Result<()> {
        if self.options.channel_header {
            let names = channel_names(format.channels);
            self.write_fields(&names)?;
        }
        Ok(())
    }

    fn frame(&mut self, frame: &SampleFrame) -> io::Result<()> {
        self.write_fields(frame.values())?;
        self.lines += 1;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Writes every frame of `wav` to `writer`.
pub fn export_to_writer<W: Write>(
    wav: &WavFile,
    options: &ExportOptions,
    writer: W,
) -> WavResult<FrameStats> {
    let mut exporter = TextExporter::new(writer, *options);
    wav.decode_into(options.eight_bit, &mut exporter)
}

/// Writes every frame of `wav` to a file at `path`.
///
/// The file appears at `path` only after the export completed; on error the
/// temporary file is removed and any existing file at `path` is untouched.
pub fn export_to_path(
    wav: &WavFile,
    options: &ExportOptions,
    path: impl AsRef<Path>,
) -> WavResult<FrameStats> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    let stats = export_to_writer(wav, options, BufWriter::new(tmp.as_file_mut()))?;
    tmp.persist(path).map_err(|e| e.error)?;

    debug!(path = %path.display(), frames = stats.frames, "export written");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::encode_frames;

    fn stereo_file() -> WavFile {
        let wav = encode_frames(
            &FormatDescriptor::stereo(44100),
            &[vec![100, -100], vec![200, -200]],
        );
        WavFile::from_bytes(wav).unwrap()
    }

    fn export_string(wav: &WavFile, options: ExportOptions) -> String {
        let mut out = Vec::new();
        export_to_writer(wav, &options, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_default_is_tab_separated() {
        let text = export_string(&stereo_file(), ExportOptions::default());
        assert_eq!(text, "100\t-100\n200\t-200\n");
    }

    #[test]
    fn test_header_and_crlf() {
        let options = ExportOptions {
            channel_header: true,
            line_ending: LineEnding::Crlf,
            ..Default::default()
        };
        let text = export_string(&stereo_file(), options);
        assert_eq!(text, "L\tR\r\n100\t-100\r\n200\t-200\r\n");
    }

    #[test]
    fn test_newline_separator() {
        let options = ExportOptions {
            separator: Separator::Newline,
            ..Default::default()
        };
        let text = export_string(&stereo_file(), options);
        assert_eq!(text, "100\n-100\n200\n-200\n");
    }

    #[test]
    fn test_channel_names() {
        assert_eq!(channel_names(1), ["ch1"]);
        assert_eq!(channel_names(2), ["L", "R"]);
        assert_eq!(channel_names(3), ["ch1", "ch2", "ch3"]);
    }

    #[test]
    fn test_options_from_json() {
        let options = ExportOptions::from_json(r#"{"separator": "comma", "eight_bit": "signed"}"#)
            .unwrap();
        assert_eq!(options.separator, Separator::Comma);
        assert_eq!(options.eight_bit, EightBitMode::Signed);
        assert_eq!(options.line_ending, LineEnding::Lf);
        assert!(!options.channel_header);

        assert!(ExportOptions::from_json(r#"{"delimiter": "tab"}"#).is_err());
    }

    #[test]
    fn test_export_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("list.dat");

        let stats = export_to_path(&stereo_file(), &ExportOptions::default(), &out).unwrap();
        assert_eq!(stats.frames, 2);
        assert_eq!(fs::read_to_string(&out).unwrap(), "100\t-100\n200\t-200\n");
        assert_eq!(fs::read_dir(out.parent().unwrap()).unwrap().count(), 1);
    }
}
