//! Pattern executor.
//!
//! Runs a step sequence against the actuator port, honouring each step's
//! hold via the [`StepDelay`] port. Per step, in order: laser action, axis
//! commands (logically simultaneous), hold. The cancellation token is
//! checked at every step boundary — holds bound the cancellation latency.
//!
//! Abort discipline: on cancellation, and on any axis error, the laser is
//! forced Low before returning. A rejected axis command invalidates the
//! rest of the scripted geometry, so the whole pattern stops rather than
//! skipping the bad step.

use log::{info, warn};

use crate::app::ports::{ActuatorPort, CancelToken, Level, StepDelay};
use crate::error::ActuatorError;
use crate::motion::steps::{LaserAction, MotionStep};

/// How a pattern run ended (short of an error).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternOutcome {
    Completed,
    Cancelled,
}

pub struct PatternEngine {
    cancel: CancelToken,
}

impl PatternEngine {
    pub fn new(cancel: CancelToken) -> Self {
        Self { cancel }
    }

    /// A handle for whoever needs to interrupt a running pattern.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Execute `steps` to completion, cancellation, or first axis error.
    /// Blocking with respect to the caller's frame loop by design.
    pub fn run(
        &self,
        name: &'static str,
        steps: &[MotionStep],
        hw: &mut impl ActuatorPort,
        delay: &mut impl StepDelay,
    ) -> Result<PatternOutcome, ActuatorError> {
        info!("pattern {name}: starting ({} steps)", steps.len());

        for (idx, step) in steps.iter().enumerate() {
            if self.cancel.is_cancelled() {
                warn!("pattern {name}: cancelled at step {idx}");
                hw.set_laser(Level::Low);
                return Ok(PatternOutcome::Cancelled);
            }

            match step.laser {
                LaserAction::On => hw.set_laser(Level::High),
                LaserAction::Off => hw.set_laser(Level::Low),
                LaserAction::Unchanged => {}
            }

            for cmd in &step.commands {
                if let Err(e) = hw.set_axis(*cmd) {
                    warn!("pattern {name}: aborted at step {idx}: {e}");
                    hw.set_laser(Level::Low);
                    return Err(e);
                }
            }

            if !step.hold.is_zero() {
                delay.wait(step.hold);
            }
        }

        info!("pattern {name}: completed");
        Ok(PatternOutcome::Completed)
    }
}
