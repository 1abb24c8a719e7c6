//! Temporal debouncer over per-frame detection booleans.
//!
//! A fixed four-slot FIFO of recent frame results. The fire decision looks
//! only at the three *oldest* slots — all three true means the detection has
//! been sustained long enough to act on. This is a consecutive-true debounce,
//! not a rolling majority vote: one false in the checked slots blocks firing.
//!
//! On a fire the window resets to all-false, so the action dispatches exactly
//! once and cannot refire until three more true frames have been pushed.

/// Number of recent frames retained.
const WINDOW_LEN: usize = 4;

/// Sliding window of recent detection results, oldest at index 0.
///
/// Process-wide state: created at controller startup, fed once per scored
/// frame, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionWindow {
    slots: [bool; WINDOW_LEN],
}

impl DetectionWindow {
    /// A fresh window is conceptually padded with "not present".
    pub fn new() -> Self {
        Self {
            slots: [false; WINDOW_LEN],
        }
    }

    /// Push one frame's result (evicting the oldest) and evaluate the fire
    /// decision. Returns true when the three oldest slots are all true, in
    /// which case the window has already been reset to all-false.
    pub fn observe(&mut self, detected: bool) -> bool {
        self.slots.copy_within(1.., 0);
        self.slots[WINDOW_LEN - 1] = detected;

        let fire = self.slots[..WINDOW_LEN - 1].iter().all(|&s| s);
        if fire {
            self.slots = [false; WINDOW_LEN];
        }
        fire
    }

    /// Current contents, oldest first. Diagnostic only.
    pub fn slots(&self) -> [bool; WINDOW_LEN] {
        self.slots
    }
}

impl Default for DetectionWindow {
    fn default() -> Self {
        Self::new()
    }
}
