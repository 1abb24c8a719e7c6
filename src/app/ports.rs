//! Port traits — the hexagonal boundary between domain logic and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ TurretService (domain)
//! ```
//!
//! Driven adapters (GPIO, the out-of-process detector, event sinks)
//! implement these traits. The service and the pattern engine consume them
//! via generics, so the domain core never touches hardware directly and the
//! whole controller runs under test with in-memory adapters.

use core::time::Duration;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::detect::Detection;
use crate::error::{ActuatorError, DetectorError};
use crate::motion::steps::AxisCommand;

// ───────────────────────────────────────────────────────────────
// Raw hardware lines (implemented per platform)
// ───────────────────────────────────────────────────────────────

/// One PWM line. Duty values are percentages of the 20 ms servo frame;
/// range checking happens above this layer in `ServoChannel`.
pub trait PwmPort {
    /// Begin emitting PWM at the given duty.
    fn start(&mut self, duty: f64) -> Result<(), ActuatorError>;

    /// Change the duty cycle. Non-blocking; physical settling time is the
    /// caller's to wait out.
    fn set_duty(&mut self, duty: f64) -> Result<(), ActuatorError>;

    /// Stop emitting PWM.
    fn stop(&mut self);
}

/// Logic level on a digital output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

/// One digital output line. Infallible once configured as an output,
/// which adapters do at construction.
pub trait OutputPort {
    fn set(&mut self, level: Level);
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the pattern engine and service command the turret
/// through this. Implementations own the two servo channels and the laser
/// line, and enforce range and lifecycle rules per axis.
pub trait ActuatorPort {
    /// Start both servo channels at the given home position, laser Low.
    fn start(&mut self, pan: f64, tilt: f64) -> Result<(), ActuatorError>;

    /// Apply one bounded axis command. Fails without side effects when the
    /// position is out of range or the channel is not active; the other
    /// axis and the laser are unaffected.
    fn set_axis(&mut self, cmd: AxisCommand) -> Result<(), ActuatorError>;

    /// Drive the laser line. Idempotent.
    fn set_laser(&mut self, level: Level);

    /// Stop both servo channels and force the laser Low. Idempotent.
    fn stop(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Scheduled delay (driven adapter: domain → time)
// ───────────────────────────────────────────────────────────────

/// Cooperative cancellation flag, checked by the pattern engine at every
/// step boundary. Cloneable so a signal handler or supervisor thread can
/// hold one end while the engine holds the other.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Re-arm after a cancelled pattern has been cleaned up.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Scheduled wait between pattern steps. Implementations may sleep for
/// real (hardware), or account the time and return immediately (tests).
/// Cancellation is handled *between* steps by the engine, not mid-wait,
/// so hold durations bound cancellation latency.
pub trait StepDelay {
    fn wait(&mut self, duration: Duration);
}

// ───────────────────────────────────────────────────────────────
// Detector port (driven adapter: vision pipeline → domain)
// ───────────────────────────────────────────────────────────────

/// Pull-side boundary to the external vision pipeline. One call per
/// processed video frame; while a pattern runs no frames are pulled
/// (blocking by design). Errors are fatal to the run loop: the controller
/// shuts down cleanly and the process exits.
pub trait DetectorPort {
    fn next_frame(&mut self) -> Result<Vec<Detection>, DetectorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (log lines today;
/// MQTT or a web dashboard would implement the same trait).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
