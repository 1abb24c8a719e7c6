//! Unified error types for the turret controller.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! run loop's error handling uniform. All variants are `Copy` so they can
//! be threaded through the controller and FSM without allocation; details
//! that don't fit a `Copy` payload are logged at the failure site instead.

use core::fmt;

use crate::motion::steps::Axis;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the controller funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// A servo or laser command failed.
    Actuator(ActuatorError),
    /// A motion pattern could not be built or executed.
    Pattern(PatternError),
    /// The detector boundary failed.
    Detector(DetectorError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Pattern(e) => write!(f, "pattern: {e}"),
            Self::Detector(e) => write!(f, "detector: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActuatorError {
    /// Commanded position lies outside the axis's mechanical range.
    /// The command is rejected outright — never silently clamped.
    OutOfRange { axis: Axis, position: f64 },
    /// The channel was commanded before `start()` or after `stop()`.
    NotActive { axis: Axis },
    /// The underlying PWM write failed.
    PwmWriteFailed { axis: Axis },
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { axis, position } => {
                write!(f, "{axis:?} position {position} out of mechanical range")
            }
            Self::NotActive { axis } => write!(f, "{axis:?} channel not active"),
            Self::PwmWriteFailed { axis } => write!(f, "{axis:?} PWM write failed"),
        }
    }
}

impl std::error::Error for ActuatorError {}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Pattern errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternError {
    /// Zig-zag tier flags matched no severity tier.
    /// Non-fatal: the pattern call is reported and becomes a no-op.
    InvalidTier,
    /// A pattern builder produced more steps than the fixed buffer holds.
    /// Indicates a geometry-parameter bug, not a runtime condition.
    StepOverflow,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTier => write!(f, "invalid zig-zag tier flags"),
            Self::StepOverflow => write!(f, "pattern exceeds step buffer capacity"),
        }
    }
}

impl std::error::Error for PatternError {}

impl From<PatternError> for Error {
    fn from(e: PatternError) -> Self {
        Self::Pattern(e)
    }
}

// ---------------------------------------------------------------------------
// Detector boundary errors
// ---------------------------------------------------------------------------

/// Failures at the detector boundary are fatal to the run loop: the
/// controller performs its shutdown sequence and the process exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorError {
    /// The detection stream ended (vision pipeline exited).
    StreamClosed,
    /// A frame's detection record could not be decoded.
    Malformed,
    /// Reading from the detection stream failed at the I/O level.
    ReadFailed,
}

impl fmt::Display for DetectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StreamClosed => write!(f, "detection stream closed"),
            Self::Malformed => write!(f, "malformed detection record"),
            Self::ReadFailed => write!(f, "detection stream read failed"),
        }
    }
}

impl std::error::Error for DetectorError {}

impl From<DetectorError> for Error {
    fn from(e: DetectorError) -> Self {
        Self::Detector(e)
    }
}
