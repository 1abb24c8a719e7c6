//! Motion step data model.
//!
//! A pattern is an ordered sequence of [`MotionStep`]s. Steps are transient:
//! built, executed, and discarded within a single pattern run. Buffers are
//! `heapless` — pattern execution never allocates.

use core::time::Duration;

/// The two turret axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Pan,
    Tilt,
}

/// One bounded position command. `position` is a duty-cycle value that must
/// lie within the axis's configured mechanical range; the servo channel
/// rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisCommand {
    pub axis: Axis,
    pub position: f64,
}

impl AxisCommand {
    pub fn pan(position: f64) -> Self {
        Self {
            axis: Axis::Pan,
            position,
        }
    }

    pub fn tilt(position: f64) -> Self {
        Self {
            axis: Axis::Tilt,
            position,
        }
    }
}

/// What a step does to the laser line, applied before its axis commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaserAction {
    On,
    Off,
    Unchanged,
}

/// Axis commands within one step are issued together (logically
/// simultaneous); two is all a pan/tilt head can want.
pub const MAX_STEP_COMMANDS: usize = 2;

/// Upper bound on steps per pattern. The search sweep is the longest at 26
/// (center move + 24 sweep steps + laser-off tail).
pub const MAX_PATTERN_STEPS: usize = 32;

/// One timed element of a pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionStep {
    pub commands: heapless::Vec<AxisCommand, MAX_STEP_COMMANDS>,
    pub laser: LaserAction,
    /// How long to hold after issuing the commands.
    pub hold: Duration,
}

/// Fixed-capacity pattern buffer.
pub type StepBuf = heapless::Vec<MotionStep, MAX_PATTERN_STEPS>;
