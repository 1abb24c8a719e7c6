//! Wall-clock step delay.

use core::time::Duration;

use crate::app::ports::StepDelay;

/// Sleeps the calling thread for real. Used on hardware; tests use
/// [`InstantDelay`](super::sim::InstantDelay) instead.
pub struct ThreadDelay;

impl StepDelay for ThreadDelay {
    fn wait(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
