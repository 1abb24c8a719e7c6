//! Outbound application events.
//!
//! The [`TurretService`](super::service::TurretService) emits these through
//! the [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them — log lines today, telemetry later.

use crate::error::{ActuatorError, PatternError};
use crate::fsm::StateId;
use crate::motion::PatternOutcome;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries initial state).
    Started(StateId),

    /// A frame was scored against the debounce window.
    /// `window` is the post-observation contents, oldest first.
    FrameScored { present: bool, window: [bool; 4] },

    /// Sustained detection — the automatic deterrent burst is about to run.
    FireTriggered,

    /// A pattern is starting against the hardware.
    PatternStarted(&'static str),

    /// A pattern finished (ran to completion or was cancelled).
    PatternFinished {
        name: &'static str,
        outcome: PatternOutcome,
    },

    /// A pattern request was rejected before any motion (invalid tier).
    PatternRejected(PatternError),

    /// A pattern aborted mid-flight on an actuator error; the laser has
    /// been restored Low.
    PatternAborted {
        name: &'static str,
        error: ActuatorError,
    },

    /// Shutdown signal accepted.
    ShutdownRequested,

    /// Actuators stopped, controller terminal.
    ShutdownComplete,
}
