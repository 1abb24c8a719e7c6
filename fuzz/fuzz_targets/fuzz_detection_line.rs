//! Fuzz target: `decode_frame_line`
//!
//! Drives arbitrary UTF-8 lines into the detection-stream decoder and
//! asserts that decoding and frame scoring never panic, whatever the
//! vision pipeline emits.
//!
//! cargo fuzz run fuzz_detection_line

#![no_main]

use gooseguard::detect::{decode_frame_line, frame_has_target};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = core::str::from_utf8(data) else {
        return;
    };

    if let Ok(detections) = decode_frame_line(line) {
        // Whatever decoded must be scoreable without panicking.
        let _ = frame_has_target(&detections, 0.6);
    }
});
