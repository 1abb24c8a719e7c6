//! Per-frame detection records from the external vision pipeline.
//!
//! The detector runs out of process (a YOLO-family model behind a video
//! capture loop) and streams one JSON array of detections per frame.
//! This module owns the wire format and the frame-level decision: a frame
//! is "positive" when at least one box clears the confidence threshold.
//! Multiple qualifying boxes in one frame do not multiply the effect.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::DetectorError;

/// One detected object in a frame. Box corners are normalised to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Model class id (the deployed model is single-class; kept for
    /// forward compatibility with multi-class weights).
    pub class_id: u32,
    /// (x1, y1, x2, y2) in normalised image coordinates.
    pub bbox: [f32; 4],
    /// Model confidence in [0, 1].
    pub confidence: f32,
}

/// Frame-level decision: does this frame contain a goose-like object?
pub fn frame_has_target(detections: &[Detection], min_confidence: f32) -> bool {
    detections.iter().any(|d| d.confidence >= min_confidence)
}

/// Decode one line of the detector stream into a frame's detections.
///
/// The wire format is a JSON array, one line per frame:
/// `[{"class_id":0,"bbox":[0.1,0.2,0.3,0.4],"confidence":0.91}]`
/// An empty array is a valid frame with nothing in it.
pub fn decode_frame_line(line: &str) -> Result<Vec<Detection>, DetectorError> {
    serde_json::from_str(line).map_err(|e| {
        debug!("detector: undecodable frame line: {e}");
        DetectorError::Malformed
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f32 = 0.6;

    fn det(confidence: f32) -> Detection {
        Detection {
            class_id: 0,
            bbox: [0.1, 0.1, 0.4, 0.4],
            confidence,
        }
    }

    #[test]
    fn empty_frame_is_negative() {
        assert!(!frame_has_target(&[], THRESHOLD));
    }

    #[test]
    fn low_confidence_boxes_ignored() {
        assert!(!frame_has_target(&[det(0.2), det(0.59)], THRESHOLD));
    }

    #[test]
    fn one_qualifying_box_suffices() {
        assert!(frame_has_target(&[det(0.3), det(0.61)], THRESHOLD));
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(frame_has_target(&[det(0.6)], THRESHOLD));
    }

    #[test]
    fn decode_valid_line() {
        let frame =
            decode_frame_line(r#"[{"class_id":0,"bbox":[0.1,0.2,0.3,0.4],"confidence":0.91}]"#)
                .unwrap();
        assert_eq!(frame.len(), 1);
        assert!(frame[0].confidence > 0.9);
    }

    #[test]
    fn decode_empty_frame() {
        assert!(decode_frame_line("[]").unwrap().is_empty());
    }

    #[test]
    fn decode_garbage_is_malformed() {
        assert_eq!(
            decode_frame_line("not json").unwrap_err(),
            DetectorError::Malformed
        );
        assert_eq!(
            decode_frame_line(r#"{"labels":[]}"#).unwrap_err(),
            DetectorError::Malformed
        );
    }
}
