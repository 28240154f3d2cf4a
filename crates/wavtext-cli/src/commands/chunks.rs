//! Chunks command implementation
//!
//! Lists the sub-chunks that follow the fmt chunk, up to and including the
//! data chunk.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::process::ExitCode;
use wavtext::{read_header, scan_chunks, ChunkCursor, ChunkRecord, WavError};

use super::json_output::{ChunkEntry, ChunksOutput, JsonError};

/// Run the chunks command
///
/// Chunks seen before a scan failure are still listed.
///
/// # Returns
/// Exit code: 0 if the data chunk was found, 1 otherwise
pub fn run(input: &str, json_output: bool) -> Result<ExitCode> {
    let bytes = fs::read(input).with_context(|| format!("Failed to read file: {}", input))?;

    let mut records = Vec::new();
    let result = walk(&bytes, &mut records);

    if json_output {
        let output = ChunksOutput {
            success: result.is_ok(),
            file: input.to_string(),
            chunks: records.iter().map(ChunkEntry::from).collect(),
            errors: result
                .as_ref()
                .err()
                .map(|e| vec![JsonError::from_wav_error(e).with_file(input)])
                .unwrap_or_default(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(if output.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    println!("{} {}", "Chunks:".cyan().bold(), input);
    println!("  {}", format!("{:<8} {:>10} {:>10}", "id", "size", "offset").dimmed());
    for record in &records {
        println!(
            "  {:<8} {:>10} {:>10}",
            record.tag.to_string(),
            record.size,
            record.offset
        );
    }

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => Err(e).with_context(|| format!("Chunk scan failed: {}", input)),
    }
}

fn walk(bytes: &[u8], records: &mut Vec<ChunkRecord>) -> Result<(), WavError> {
    let mut cursor = ChunkCursor::new(bytes);
    read_header(&mut cursor)?;
    scan_chunks(&mut cursor, |record| records.push(*record))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavtext::writer::encode_frames;
    use wavtext::FormatDescriptor;

    #[test]
    fn test_walk_keeps_records_before_failure() {
        let wav = encode_frames(&FormatDescriptor::mono(8000), &[vec![0]]);
        let mut bytes = wav[..36].to_vec();
        bytes.extend_from_slice(b"LIST\x02\x00\x00\x00ab");
        bytes.extend_from_slice(b"junk\xff\x00\x00\x00");

        let mut records = Vec::new();
        let err = walk(&bytes, &mut records).unwrap_err();
        assert_eq!(err.code(), "WAV_021");
        let ids: Vec<_> = records.iter().map(|r| r.tag.to_string()).collect();
        assert_eq!(ids, ["LIST", "junk"]);
    }

    #[test]
    fn test_run_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.wav");
        fs::write(&good, encode_frames(&FormatDescriptor::stereo(44100), &[])).unwrap();
        assert_eq!(
            run(&good.to_string_lossy(), true).unwrap(),
            ExitCode::SUCCESS
        );

        let bad = dir.path().join("bad.wav");
        let wav = encode_frames(&FormatDescriptor::stereo(44100), &[]);
        fs::write(&bad, &wav[..36]).unwrap();
        assert_eq!(run(&bad.to_string_lossy(), true).unwrap(), ExitCode::from(1));
        assert!(run(&bad.to_string_lossy(), false).is_err());
    }
}
