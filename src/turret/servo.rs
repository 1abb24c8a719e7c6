//! One PWM-driven servo axis with bounded commands and a start/stop
//! lifecycle.
//!
//! Out-of-range positions are rejected, never clamped: a position outside
//! the mechanical range means the caller's geometry is wrong, and quietly
//! bending it would put the turret somewhere the script didn't ask for.
//! The last valid position is untouched by a rejected command.

use log::debug;

use crate::app::ports::PwmPort;
use crate::config::AxisRange;
use crate::error::ActuatorError;
use crate::motion::steps::Axis;

pub struct ServoChannel<P: PwmPort> {
    pwm: P,
    axis: Axis,
    range: AxisRange,
    active: bool,
    position: Option<f64>,
}

impl<P: PwmPort> ServoChannel<P> {
    pub fn new(pwm: P, axis: Axis, range: AxisRange) -> Self {
        Self {
            pwm,
            axis,
            range,
            active: false,
            position: None,
        }
    }

    /// Begin the channel's active lifetime at `initial`. The initial
    /// position is range-checked like any other command.
    pub fn start(&mut self, initial: f64) -> Result<(), ActuatorError> {
        self.check_range(initial)?;
        self.pwm.start(initial)?;
        self.active = true;
        self.position = Some(initial);
        debug!("{:?} channel started at {initial}", self.axis);
        Ok(())
    }

    /// Command a new position. Non-blocking: returns as soon as the duty
    /// cycle is updated; settling time is the caller's to wait out.
    pub fn set_position(&mut self, position: f64) -> Result<(), ActuatorError> {
        if !self.active {
            return Err(ActuatorError::NotActive { axis: self.axis });
        }
        self.check_range(position)?;
        self.pwm.set_duty(position)?;
        self.position = Some(position);
        Ok(())
    }

    /// End the channel's active lifetime. Idempotent.
    pub fn stop(&mut self) {
        if self.active {
            self.pwm.stop();
            self.active = false;
            debug!("{:?} channel stopped", self.axis);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Last successfully commanded position, if any.
    pub fn position(&self) -> Option<f64> {
        self.position
    }

    fn check_range(&self, position: f64) -> Result<(), ActuatorError> {
        if self.range.contains(position) {
            Ok(())
        } else {
            Err(ActuatorError::OutOfRange {
                axis: self.axis,
                position,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Raw PWM stub tracking what reached the line.
    struct StubPwm {
        running: bool,
        duty: Option<f64>,
    }

    impl StubPwm {
        fn new() -> Self {
            Self {
                running: false,
                duty: None,
            }
        }
    }

    impl PwmPort for StubPwm {
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

    fn pan_channel() -> ServoChannel<StubPwm> {
        ServoChannel::new(StubPwm::new(), Axis::Pan, AxisRange { min: 3.0, max: 6.0 })
    }

    #[test]
    fn command_before_start_fails() {
        let mut ch = pan_channel();
        assert_eq!(
            ch.set_position(4.5),
            Err(ActuatorError::NotActive { axis: Axis::Pan })
        );
    }

    #[test]
    fn command_after_stop_fails() {
        let mut ch = pan_channel();
        ch.start(4.5).unwrap();
        ch.stop();
        assert!(matches!(
            ch.set_position(4.0),
            Err(ActuatorError::NotActive { .. })
        ));
    }

    #[test]
    fn in_range_command_reaches_pwm() {
        let mut ch = pan_channel();
        ch.start(4.5).unwrap();
        ch.set_position(3.5).unwrap();
        assert_eq!(ch.pwm.duty, Some(3.5));
        assert_eq!(ch.position(), Some(3.5));
    }

    #[test]
    fn range_is_inclusive_at_both_ends() {
        let mut ch = pan_channel();
        ch.start(4.5).unwrap();
        ch.set_position(3.0).unwrap();
        ch.set_position(6.0).unwrap();
    }

    #[test]
    fn out_of_range_rejected_and_position_unchanged() {
        let mut ch = pan_channel();
        ch.start(4.5).unwrap();
        let err = ch.set_position(6.5).unwrap_err();
        assert_eq!(
            err,
            ActuatorError::OutOfRange {
                axis: Axis::Pan,
                position: 6.5
            }
        );
        assert_eq!(ch.position(), Some(4.5));
        assert_eq!(ch.pwm.duty, Some(4.5));
    }

    #[test]
    fn out_of_range_initial_never_starts_pwm() {
        let mut ch = pan_channel();
        assert!(ch.start(9.0).is_err());
        assert!(!ch.is_active());
        assert!(!ch.pwm.running);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut ch = pan_channel();
        ch.start(4.5).unwrap();
        ch.stop();
        ch.stop();
        assert!(!ch.is_active());
    }
}
