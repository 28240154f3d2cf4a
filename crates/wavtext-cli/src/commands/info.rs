//! Info command implementation
//!
//! Prints the RIFF descriptor, fmt chunk fields and data chunk summary of a
//! WAV file.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;
use wavtext::WavFile;

use super::json_output::{HeaderReport, InfoOutput, JsonError};

/// Run the info command
///
/// # Arguments
/// * `input` - Path to the WAV file
/// * `hash` - Whether to compute the BLAKE3 hash of the sample bytes
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(input: &str, hash: bool, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(input, hash)
    } else {
        run_human(input, hash)
    }
}

fn run_json(input: &str, hash: bool) -> Result<ExitCode> {
    let output = match load(input, hash) {
        Ok((wav, pcm_hash)) => {
            let stats = wav.stats()?;
            InfoOutput::success(input, &wav, &stats, pcm_hash)
        }
        Err(e) => InfoOutput::failure(
            input,
            vec![JsonError::from_wav_error(&e).with_file(input)],
        ),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn run_human(input: &str, hash: bool) -> Result<ExitCode> {
    let (wav, pcm_hash) =
        load(input, hash).with_context(|| format!("Failed to read WAV file: {}", input))?;
    let stats = wav.stats()?;
    let report = HeaderReport::from_wav(&wav);

    println!("{} {}", "WAV file header:".cyan().bold(), input);
    print_field("File type", &report.chunk_id);
    print_field("File size", report.chunk_size);
    print_field("WAV marker", &report.format);
    print_field("Format name", report.subchunk1_id.trim_end());
    print_field("Format length", report.subchunk1_size);
    print_field("Format type", report.audio_format);
    print_field("Channels", report.num_channels);
    print_field("Sample rate", report.sample_rate);
    print_field("Byte rate", report.byte_rate);
    print_field("Block align", report.block_align);
    print_field("Bits per sample", report.bits_per_sample);
    println!();

    println!("{}", "Data chunk:".bold());
    print_field("Declared size", report.subchunk2_size);
    print_field("Offset", report.data_offset);
    print_field("Frames", stats.frames);
    print_field(
        "Duration",
        format!("{:.3}s", wav.format().duration_seconds(stats.frames)),
    );
    if let Some(pcm_hash) = pcm_hash {
        print_field("PCM hash", pcm_hash);
    }

    if stats.truncated {
        println!(
            "  {} data chunk declares {} bytes but only {} are present",
            "!!".yellow(),
            stats.declared_bytes,
            stats.available_bytes
        );
    }
    if stats.discarded_bytes > 0 {
        println!(
            "  {} {} trailing byte(s) do not fill a whole frame",
            "!!".yellow(),
            stats.discarded_bytes
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn load(input: &str, hash: bool) -> wavtext::WavResult<(WavFile, Option<String>)> {
    let wav = WavFile::open(input)?;
    let pcm_hash = if hash { Some(wav.pcm_hash()?) } else { None };
    Ok((wav, pcm_hash))
}

fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<16} {}", format!("{}:", label).dimmed(), value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use wavtext::writer::encode_frames;
    use wavtext::FormatDescriptor;

    #[test]
    fn test_info_on_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ok.wav");
        fs::write(
            &path,
            encode_frames(&FormatDescriptor::mono(8000), &[vec![1], vec![2]]),
        )
        .unwrap();

        let path = path.to_string_lossy();
        assert_eq!(run(&path, true, false).unwrap(), ExitCode::SUCCESS);
        assert_eq!(run(&path, false, true).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_info_on_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.wav");
        fs::write(&path, b"RIFX\x00\x00\x00\x00WAVE").unwrap();
        let path = path.to_string_lossy();

        let err = run(&path, false, false).unwrap_err();
        assert!(format!("{:#}", err).contains("not a RIFF file"));
        assert_eq!(run(&path, false, true).unwrap(), ExitCode::from(1));
    }
}
