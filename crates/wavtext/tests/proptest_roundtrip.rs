//! Property-based tests for the decode pipeline using proptest.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p wavtext --test proptest_roundtrip
//! ```

use proptest::prelude::*;

use wavtext::writer::encode_frames;
use wavtext::{FormatDescriptor, WavFile};

/// Frame sequences of 16-bit values for 1 or 2 channels.
fn frames_16_bit() -> impl Strategy<Value = (u16, Vec<Vec<i32>>)> {
    (1u16..=2).prop_flat_map(|channels| {
        let frame = prop::collection::vec(any::<i16>().prop_map(i32::from), channels as usize);
        (Just(channels), prop::collection::vec(frame, 0..200))
    })
}

/// Inserts opaque chunks between fmt and data.
fn insert_chunks(wav: &[u8], chunks: &[(u8, Vec<u8>)]) -> Vec<u8> {
    let mut bytes = wav[..36].to_vec();
    for (letter, payload) in chunks {
        bytes.extend_from_slice(&[b'x', b'x', b'x', *letter]);
        bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        bytes.extend_from_slice(payload);
        if payload.len() % 2 == 1 {
            bytes.push(0);
        }
    }
    bytes.extend_from_slice(&wav[36..]);
    bytes
}

proptest! {
    /// Encoding frames and decoding them returns the same frames.
    #[test]
    fn round_trip_16_bit((channels, frames) in frames_16_bit()) {
        let format = FormatDescriptor::pcm(channels, 44100, 16);
        let wav = WavFile::from_bytes(encode_frames(&format, &frames)).unwrap();

        prop_assert_eq!(*wav.format(), format);
        let decoded: Vec<Vec<i32>> = wav.frames().unwrap().map(|f| f.into_values()).collect();
        prop_assert_eq!(decoded, frames);
    }

    /// Extra chunks of any size before data do not change the samples.
    #[test]
    fn extra_chunks_are_skipped(
        (channels, frames) in frames_16_bit(),
        chunks in prop::collection::vec((b'a'..=b'z', prop::collection::vec(any::<u8>(), 0..33)), 0..5),
    ) {
        let format = FormatDescriptor::pcm(channels, 8000, 16);
        let bytes = insert_chunks(&encode_frames(&format, &frames), &chunks);
        let wav = WavFile::from_bytes(bytes).unwrap();

        prop_assert_eq!(wav.chunks().len(), chunks.len() + 1);
        let decoded: Vec<Vec<i32>> = wav.frames().unwrap().map(|f| f.into_values()).collect();
        prop_assert_eq!(decoded, frames);
    }

    /// Cutting the file anywhere inside the payload yields a prefix of whole frames.
    #[test]
    fn truncation_yields_prefix((channels, frames) in frames_16_bit(), cut in any::<prop::sample::Index>()) {
        let format = FormatDescriptor::pcm(channels, 8000, 16);
        let mut bytes = encode_frames(&format, &frames);
        let payload_len = bytes.len() - 44;
        let keep = cut.index(payload_len + 1);
        bytes.truncate(44 + keep);

        let wav = WavFile::from_bytes(bytes).unwrap();
        let decoded: Vec<Vec<i32>> = wav.frames().unwrap().map(|f| f.into_values()).collect();
        let whole = keep / format.frame_size();
        prop_assert_eq!(&decoded[..], &frames[..whole]);
    }

    /// Arbitrary bytes never panic the decoder.
    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        if let Ok(wav) = WavFile::from_bytes(bytes) {
            let _ = wav.frames().map(|frames| frames.count());
        }
    }

    /// A valid prefix followed by garbage never panics either.
    #[test]
    fn garbage_after_header_never_panics(tail in prop::collection::vec(any::<u8>(), 0..64)) {
        let mut bytes = encode_frames(&FormatDescriptor::stereo(44100), &[])[..36].to_vec();
        bytes.extend(tail);
        if let Ok(wav) = WavFile::from_bytes(bytes) {
            let _ = wav.frames().map(|frames| frames.count());
        }
    }
}
