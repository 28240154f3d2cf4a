#![no_main]

use libfuzzer_sys::fuzz_target;
use wavtext::{EightBitMode, WavFile};

fuzz_target!(|data: &[u8]| {
    if let Ok(wav) = WavFile::from_bytes(data.to_vec()) {
        for mode in [EightBitMode::Unsigned, EightBitMode::Signed] {
            if let Ok(frames) = wav.frames_with(mode) {
                let expected = frames.len();
                assert_eq!(frames.count(), expected);
            }
        }
    }
});
