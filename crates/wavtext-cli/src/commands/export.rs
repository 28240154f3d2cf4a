//! Export command implementation
//!
//! Decodes a WAV file and writes its samples as text, one frame per line.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use tracing::debug;
use wavtext::{
    export_to_path, export_to_writer, EightBitMode, ExportOptions, LineEnding, Separator, WavFile,
};

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct ExportOverrides {
    pub separator: Option<String>,
    pub line_ending: Option<String>,
    pub channel_header: bool,
    pub eight_bit: Option<String>,
}

/// Run the export command
///
/// # Arguments
/// * `input` - Path to the WAV file
/// * `output` - Destination text file; stdout when `None`
/// * `config` - Optional JSON file with [`ExportOptions`]
/// * `overrides` - Flags that take precedence over the config
///
/// # Returns
/// Exit code: 0 on success
pub fn run(
    input: &str,
    output: Option<&str>,
    config: Option<&str>,
    overrides: &ExportOverrides,
) -> Result<ExitCode> {
    let options = resolve_options(config, overrides)?;

    let wav =
        WavFile::open(input).with_context(|| format!("Failed to read WAV file: {}", input))?;
    let format = *wav.format();

    let stats = match output {
        Some(path) => export_to_path(&wav, &options, path)
            .with_context(|| format!("Failed to write output file: {}", path))?,
        None => {
            let stdout = io::stdout();
            export_to_writer(&wav, &options, BufWriter::new(stdout.lock()))
                .context("Failed to write to stdout")?
        }
    };

    eprintln!(
        "{} {} frame(s), {} channel(s) at {} Hz, {}-bit",
        "Read".green().bold(),
        stats.frames,
        format.channels,
        format.sample_rate,
        format.bits_per_sample
    );
    if stats.truncated {
        eprintln!(
            "  {} data chunk declares {} bytes but only {} are present",
            "!!".yellow(),
            stats.declared_bytes,
            stats.available_bytes
        );
    }
    if let Some(path) = output {
        eprintln!("{} {}", "Wrote".green().bold(), path);
    }

    Ok(ExitCode::SUCCESS)
}

/// Loads the config file (if any) and applies command-line overrides.
pub fn resolve_options(config: Option<&str>, overrides: &ExportOverrides) -> Result<ExportOptions> {
    let mut options = match config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            ExportOptions::from_json(&json)
                .with_context(|| format!("Failed to parse config file: {}", path))?
        }
        None => ExportOptions::default(),
    };

    if let Some(separator) = overrides.separator.as_deref() {
        options.separator = parse_separator(separator)?;
    }
    if let Some(line_ending) = overrides.line_ending.as_deref() {
        options.line_ending = parse_line_ending(line_ending)?;
    }
    if overrides.channel_header {
        options.channel_header = true;
    }
    if let Some(mode) = overrides.eight_bit.as_deref() {
        options.eight_bit = parse_eight_bit(mode)?;
    }

    debug!(?options, "resolved export options");
    Ok(options)
}

fn parse_separator(s: &str) -> Result<Separator> {
    match s {
        "tab" => Ok(Separator::Tab),
        "newline" => Ok(Separator::Newline),
        "comma" => Ok(Separator::Comma),
        other => anyhow::bail!("Unknown separator: {}", other),
    }
}

fn parse_line_ending(s: &str) -> Result<LineEnding> {
    match s {
        "lf" => Ok(LineEnding::Lf),
        "crlf" => Ok(LineEnding::Crlf),
        other => anyhow::bail!("Unknown line ending: {}", other),
    }
}

fn parse_eight_bit(s: &str) -> Result<EightBitMode> {
    match s {
        "unsigned" => Ok(EightBitMode::Unsigned),
        "signed" => Ok(EightBitMode::Signed),
        other => anyhow::bail!("Unknown 8-bit mode: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wavtext::writer::encode_frames;
    use wavtext::FormatDescriptor;

    #[test]
    fn test_overrides_take_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("export.json");
        fs::write(
            &config,
            r#"{ "separator": "comma", "line_ending": "crlf", "eight_bit": "signed" }"#,
        )
        .unwrap();

        let overrides = ExportOverrides {
            separator: Some("tab".to_string()),
            channel_header: true,
            ..Default::default()
        };
        let options = resolve_options(Some(&config.to_string_lossy()), &overrides).unwrap();
        assert_eq!(options.separator, Separator::Tab);
        assert_eq!(options.line_ending, LineEnding::Crlf);
        assert_eq!(options.eight_bit, EightBitMode::Signed);
        assert!(options.channel_header);
    }

    #[test]
    fn test_bad_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("export.json");
        fs::write(&config, r#"{ "separator": "pipe" }"#).unwrap();

        let err = resolve_options(Some(&config.to_string_lossy()), &Default::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));

        let missing = dir.path().join("missing.json");
        assert!(resolve_options(Some(&missing.to_string_lossy()), &Default::default()).is_err());
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.wav");
        let output = dir.path().join("out").join("list.dat");
        fs::write(
            &input,
            encode_frames(
                &FormatDescriptor::stereo(44100),
                &[vec![100, -100], vec![200, -200]],
            ),
        )
        .unwrap();

        let overrides = ExportOverrides {
            channel_header: true,
            ..Default::default()
        };
        let code = run(
            &input.to_string_lossy(),
            Some(&output.to_string_lossy()),
            None,
            &overrides,
        )
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "L\tR\n100\t-100\n200\t-200\n"
        );
    }

    #[test]
    fn test_failed_export_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.wav");
        let output = dir.path().join("list.dat");
        fs::write(&input, b"RIFF\x04\x00\x00\x00WAVE").unwrap();

        let result = run(
            &input.to_string_lossy(),
            Some(&output.to_string_lossy()),
            None,
            &Default::default(),
        );
        assert!(result.is_err());
        assert!(!output.exists());
    }
}
