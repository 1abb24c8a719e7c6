//! In-memory adapters for host-side tests and the demo loop.
//!
//! [`SimTurret`] drives real [`ServoChannel`]s and a real [`LaserDriver`]
//! over stub lines, so range and lifecycle enforcement are exercised
//! exactly as on hardware; it additionally records every call that reached
//! the "wire" for assertions.

use core::time::Duration;
use std::collections::VecDeque;

use crate::app::ports::{
    ActuatorPort, DetectorPort, Level, OutputPort, PwmPort, StepDelay,
};
use crate::config::TurretConfig;
use crate::detect::Detection;
use crate::error::{ActuatorError, DetectorError};
use crate::motion::steps::{Axis, AxisCommand};
use crate::turret::{LaserDriver, ServoChannel};

// ───────────────────────────────────────────────────────────────
// Stub lines
// ───────────────────────────────────────────────────────────────

/// PWM line that tracks state in memory.
pub struct SimPwm {
    running: bool,
    duty: Option<f64>,
}

impl SimPwm {
    pub fn new() -> Self {
        Self {
            running: false,
            duty: None,
        }
    }
}

impl PwmPort for SimPwm {
    fn start(&mut self, duty: f64) -> Result<(), ActuatorError> {
        self.running = true;
        self.duty = Some(duty);
        Ok(())
    }

    fn set_duty(&mut self, duty: f64) -> Result<(), ActuatorError> {
        self.duty = Some(duty);
        Ok(())
    }

    fn stop(&mut self) {
        self.running = false;
    }
}

/// Digital line that tracks its last level.
pub struct SimLine {
    level: Level,
}

impl SimLine {
    pub fn new() -> Self {
        Self { level: Level::Low }
    }
}

impl OutputPort for SimLine {
    fn set(&mut self, level: Level) {
        self.level = level;
    }
}

// ───────────────────────────────────────────────────────────────
// Simulated turret
// ───────────────────────────────────────────────────────────────

/// One call that reached the simulated hardware.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurretCall {
    Start { pan: f64, tilt: f64 },
    Pan(f64),
    Tilt(f64),
    Laser(Level),
    Stop,
}

pub struct SimTurret {
    pan: ServoChannel<SimPwm>,
    tilt: ServoChannel<SimPwm>,
    laser: LaserDriver<SimLine>,
    calls: Vec<TurretCall>,
}

impl SimTurret {
    pub fn new(cfg: &TurretConfig) -> Self {
        Self {
            pan: ServoChannel::new(SimPwm::new(), Axis::Pan, cfg.pan_range),
            tilt: ServoChannel::new(SimPwm::new(), Axis::Tilt, cfg.tilt_range),
            laser: LaserDriver::new(SimLine::new()),
            calls: Vec::new(),
        }
    }

    /// Successfully applied calls, in order.
    pub fn calls(&self) -> &[TurretCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn pan_position(&self) -> Option<f64> {
        self.pan.position()
    }

    pub fn tilt_position(&self) -> Option<f64> {
        self.tilt.position()
    }

    pub fn laser_level(&self) -> Level {
        self.laser.level()
    }

    pub fn axes_active(&self) -> bool {
        self.pan.is_active() && self.tilt.is_active()
    }

    /// Count of pan moves that hit a given position — handy for asserting
    /// toggle counts.
    pub fn pan_visits(&self, position: f64) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, TurretCall::Pan(p) if *p == position))
            .count()
    }
}

impl ActuatorPort for SimTurret {
    fn start(&mut self, pan: f64, tilt: f64) -> Result<(), ActuatorError> {
        self.pan.start(pan)?;
        self.tilt.start(tilt)?;
        self.laser.set(Level::Low);
        self.calls.push(TurretCall::Start { pan, tilt });
        Ok(())
    }

    fn set_axis(&mut self, cmd: AxisCommand) -> Result<(), ActuatorError> {
        match cmd.axis {
            Axis::Pan => {
                self.pan.set_position(cmd.position)?;
                self.calls.push(TurretCall::Pan(cmd.position));
            }
            Axis::Tilt => {
                self.tilt.set_position(cmd.position)?;
                self.calls.push(TurretCall::Tilt(cmd.position));
            }
        }
        Ok(())
    }

    fn set_laser(&mut self, level: Level) {
        self.laser.set(level);
        self.calls.push(TurretCall::Laser(level));
    }

    fn stop(&mut self) {
        self.laser.set(Level::Low);
        self.pan.stop();
        self.tilt.stop();
        self.calls.push(TurretCall::Stop);
    }
}

// ───────────────────────────────────────────────────────────────
// Time and detector stand-ins
// ───────────────────────────────────────────────────────────────

/// Accounts wait time without sleeping.
pub struct InstantDelay {
    waited: Duration,
}

impl InstantDelay {
    pub fn new() -> Self {
        Self {
            waited: Duration::ZERO,
        }
    }

    pub fn waited(&self) -> Duration {
        self.waited
    }
}

impl StepDelay for InstantDelay {
    fn wait(&mut self, duration: Duration) {
        self.waited += duration;
    }
}

/// Replays a fixed frame script, then reports the stream closed.
pub struct ScriptedDetector {
    frames: VecDeque<Vec<Detection>>,
}

impl ScriptedDetector {
    pub fn new(frames: impl IntoIterator<Item = Vec<Detection>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Script built from frame-level booleans: `true` frames carry one
    /// high-confidence box.
    pub fn from_booleans(script: &[bool]) -> Self {
        Self::new(script.iter().map(|&present| {
            if present {
                vec![Detection {
                    class_id: 0,
                    bbox: [0.25, 0.25, 0.75, 0.75],
                    confidence: 0.92,
                }]
            } else {
                Vec::new()
            }
        }))
    }
}

impl DetectorPort for ScriptedDetector {
    fn next_frame(&mut self) -> Result<Vec<Detection>, DetectorError> {
        self.frames.pop_front().ok_or(DetectorError::StreamClosed)
    }
}
