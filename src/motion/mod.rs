//! Motion pattern engine: scripted pan/tilt sequences with coordinated
//! laser activation.
//!
//! ```text
//!   patterns (builders) ──▶ StepBuf ──▶ engine ──▶ ActuatorPort + StepDelay
//! ```
//!
//! Builders are pure functions from configuration to a step sequence;
//! the engine is the only code that touches the actuator ports while a
//! pattern runs.

pub mod engine;
pub mod patterns;
pub mod steps;

pub use engine::{PatternEngine, PatternOutcome};
pub use steps::{Axis, AxisCommand, LaserAction, MotionStep, StepBuf};
