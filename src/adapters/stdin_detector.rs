//! Detector adapter reading the vision pipeline's stream from stdin.
//!
//! The detector (a YOLO-family model behind a capture loop) runs out of
//! process and writes one JSON array of detections per frame:
//!
//! ```text
//! [{"class_id":0,"bbox":[0.31,0.40,0.55,0.71],"confidence":0.87}]
//! []
//! ```
//!
//! End of stream means the pipeline exited — the run loop treats that as
//! the shutdown signal. Malformed lines and I/O errors are fatal: a
//! detector emitting garbage is not something to aim a laser around.

use std::io::BufRead;

use log::error;

use crate::app::ports::DetectorPort;
use crate::detect::{decode_frame_line, Detection};
use crate::error::DetectorError;

pub struct StdinDetector<R: BufRead> {
    reader: R,
    line: String,
}

impl<R: BufRead> StdinDetector<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl<R: BufRead> DetectorPort for StdinDetector<R> {
    fn next_frame(&mut self) -> Result<Vec<Detection>, DetectorError> {
        self.line.clear();
        match self.reader.read_line(&mut self.line) {
            Ok(0) => Err(DetectorError::StreamClosed),
            Ok(_) => {
                let line = self.line.trim();
                if line.is_empty() {
                    // Keep-alive blank line between frames; nothing seen.
                    return Ok(Vec::new());
                }
                decode_frame_line(line)
            }
            Err(e) => {
                error!("detector: stdin read failed: {e}");
                Err(DetectorError::ReadFailed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_frames_until_eof() {
        let input = "[]\n[{\"class_id\":0,\"bbox\":[0.1,0.1,0.2,0.2],\"confidence\":0.9}]\n";
        let mut det = StdinDetector::new(Cursor::new(input));
        assert!(det.next_frame().unwrap().is_empty());
        assert_eq!(det.next_frame().unwrap().len(), 1);
        assert_eq!(det.next_frame().unwrap_err(), DetectorError::StreamClosed);
    }

    #[test]
    fn blank_lines_are_empty_frames() {
        let mut det = StdinDetector::new(Cursor::new("\n[]\n"));
        assert!(det.next_frame().unwrap().is_empty());
        assert!(det.next_frame().unwrap().is_empty());
    }

    #[test]
    fn garbage_line_is_malformed() {
        let mut det = StdinDetector::new(Cursor::new("nonsense\n"));
        assert_eq!(det.next_frame().unwrap_err(), DetectorError::Malformed);
    }
}
