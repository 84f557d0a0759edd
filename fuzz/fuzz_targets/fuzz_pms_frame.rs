//! Fuzz target: `particulate::decode_frame`
//!
//! Arbitrary UART bytes must never panic the decoder, and anything it
//! accepts must have been at least one full frame with the magic prefix.
//!
//! cargo fuzz run fuzz_pms_frame

#![no_main]

use airnode::sensors::particulate::{FRAME_LEN, FRAME_MAGIC, decode_frame};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(pm25) = decode_frame(data) {
        assert!(data.len() >= FRAME_LEN);
        assert_eq!(data[..2], FRAME_MAGIC);
        assert_eq!(pm25, u16::from_be_bytes([data[12], data[13]]));
    }
});
