//! Minimal PCM WAV encoder.
//!
//! Writes a canonical 44-byte header (RIFF descriptor, 16-byte fmt chunk,
//! data prologue) followed by interleaved little-endian samples. Used to
//! build fixtures and to check that decoding inverts encoding.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::header::{FormatDescriptor, FMT_BODY_LEN};
use crate::samples::EightBitMode;

/// Length of the canonical header written by [`write_wav`].
pub const CANONICAL_HEADER_LEN: usize = 44;

/// Writes a complete WAV file to a writer.
///
/// # Arguments
/// * `writer` - Output writer
/// * `format` - Format written to the fmt chunk, as given
/// * `pcm_data` - Interleaved sample bytes for the data chunk
pub fn write_wav<W: Write>(
    writer: &mut W,
    format: &FormatDescriptor,
    pcm_data: &[u8],
) -> io::Result<()> {
    let data_size = pcm_data.len() as u32;
    let riff_size = 4 + 8 + FMT_BODY_LEN as u32 + 8 + data_size;

    writer.write_all(b"RIFF")?;
    writer.write_u32::<LittleEndian>(riff_size)?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_u32::<LittleEndian>(FMT_BODY_LEN as u32)?;
    writer.write_u16::<LittleEndian>(format.audio_format)?;
    writer.write_u16::<LittleEndian>(format.channels)?;
    writer.write_u32::<LittleEndian>(format.sample_rate)?;
    writer.write_u32::<LittleEndian>(format.byte_rate)?;
    writer.write_u16::<LittleEndian>(format.block_align)?;
    writer.write_u16::<LittleEndian>(format.bits_per_sample)?;

    writer.write_all(b"data")?;
    writer.write_u32::<LittleEndian>(data_size)?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Writes a WAV file to a byte vector.
pub fn write_wav_to_vec(format: &FormatDescriptor, pcm_data: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(CANONICAL_HEADER_LEN + pcm_data.len());
    write_wav(&mut buffer, format, pcm_data).expect("writing to Vec should not fail");
    buffer
}

/// Converts frames to interleaved PCM bytes at the format's bit depth.
///
/// Values are truncated to the sample width. 8-bit values are written with
/// the given interpretation.
pub fn frames_to_pcm(
    format: &FormatDescriptor,
    frames: &[Vec<i32>],
    eight_bit: EightBitMode,
) -> Vec<u8> {
    let width = format.bytes_per_sample();
    let mut pcm = Vec::with_capacity(frames.len() * format.frame_size());

    for frame in frames {
        for &value in frame {
            match width {
                1 => pcm.push(match eight_bit {
                    EightBitMode::Unsigned => value.wrapping_add(128) as u8,
                    EightBitMode::Signed => value as i8 as u8,
                }),
                _ => pcm.extend_from_slice(&value.to_le_bytes()[..width]),
            }
        }
    }

    pcm
}

/// Encodes frames into a complete WAV file.
pub fn encode_frames(format: &FormatDescriptor, frames: &[Vec<i32>]) -> Vec<u8> {
    let pcm = frames_to_pcm(format, frames, EightBitMode::default());
    write_wav_to_vec(format, &pcm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_layout() {
        let format = FormatDescriptor::stereo(44100);
        let wav = encode_frames(&format, &[vec![100, -100], vec![200, -200]]);

        assert_eq!(wav.len(), CANONICAL_HEADER_LEN + 8);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]), 44);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(u16::from_le_bytes([wav[22], wav[23]]), 2);
        assert_eq!(u32::from_le_bytes([wav[28], wav[29], wav[30], wav[31]]), 176400);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]), 8);
        assert_eq!(&wav[44..46], &100i16.to_le_bytes());
    }

    #[test]
    fn test_pcm_widths() {
        let frames = [vec![-2]];
        let eight = FormatDescriptor::pcm(1, 8000, 8);
        assert_eq!(frames_to_pcm(&eight, &frames, EightBitMode::Unsigned), [126]);
        assert_eq!(frames_to_pcm(&eight, &frames, EightBitMode::Signed), [0xfe]);

        let wide = FormatDescriptor::pcm(1, 8000, 24);
        assert_eq!(
            frames_to_pcm(&wide, &frames, EightBitMode::Unsigned),
            [0xfe, 0xff, 0xff]
        );

        assert_eq!(
            frames_to_pcm(&eight, &[vec![i32::MAX], vec![i32::MIN]], EightBitMode::Unsigned),
            [0x7f, 0x80]
        );

        let full = FormatDescriptor::pcm(1, 8000, 32);
        assert_eq!(
            frames_to_pcm(&full, &[vec![1]], EightBitMode::Unsigned),
            [1, 0, 0, 0]
        );
    }
}
