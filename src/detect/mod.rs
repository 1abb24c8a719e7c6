//! Detection boundary: per-frame detector records and the temporal
//! debouncer that turns them into fire decisions.

pub mod frame;
pub mod window;

pub use frame::{decode_frame_line, frame_has_target, Detection};
pub use window::DetectionWindow;
