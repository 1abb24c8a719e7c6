//! Raspberry Pi hardware adapter (feature `rpi`).
//!
//! Drives the two servo lines with rppal's software PWM at 50 Hz and the
//! laser line as a plain output. Pins are claimed and configured as outputs
//! at construction and released on drop, with the laser forced Low first.
//!
//! Software PWM jitter (~tens of µs) is well inside what SG90-class servos
//! tolerate; the turret does not need hardware PWM channels.

use log::{error, warn};

use rppal::gpio::{Gpio, OutputPin};

use crate::app::ports::{ActuatorPort, Level, OutputPort, PwmPort};
use crate::config::TurretConfig;
use crate::error::{ActuatorError, Error};
use crate::motion::steps::{Axis, AxisCommand};
use crate::pins;
use crate::turret::{LaserDriver, ServoChannel};

// ── Raw lines ─────────────────────────────────────────────────

struct RpiPwm {
    pin: OutputPin,
    axis: Axis,
}

impl RpiPwm {
    fn apply(&mut self, duty: f64) -> Result<(), ActuatorError> {
        // Duty is a percentage of the 20 ms servo frame.
        self.pin
            .set_pwm_frequency(pins::SERVO_PWM_HZ, duty / 100.0)
            .map_err(|e| {
                error!("{:?} PWM write failed: {e}", self.axis);
                ActuatorError::PwmWriteFailed { axis: self.axis }
            })
    }
}

impl PwmPort for RpiPwm {
    fn start(&mut self, duty: f64) -> Result<(), ActuatorError> {
        self.apply(duty)
    }

    fn set_duty(&mut self, duty: f64) -> Result<(), ActuatorError> {
        self.apply(duty)
    }

    fn stop(&mut self) {
        if let Err(e) = self.pin.clear_pwm() {
            warn!("{:?} PWM clear failed: {e}", self.axis);
        }
    }
}

struct RpiLine {
    pin: OutputPin,
}

impl OutputPort for RpiLine {
    fn set(&mut self, level: Level) {
        match level {
            Level::High => self.pin.set_high(),
            Level::Low => self.pin.set_low(),
        }
    }
}

// ── Turret adapter ────────────────────────────────────────────

/// Concrete adapter combining both servo channels and the laser line
/// behind [`ActuatorPort`]. The only module that touches real GPIO.
pub struct RpiTurret {
    pan: ServoChannel<RpiPwm>,
    tilt: ServoChannel<RpiPwm>,
    laser: LaserDriver<RpiLine>,
}

impl RpiTurret {
    pub fn new(cfg: &TurretConfig) -> Result<Self, Error> {
        let gpio = Gpio::new().map_err(|e| {
            error!("GPIO init failed: {e}");
            Error::Init("GPIO unavailable")
        })?;

        let claim = |bcm: u8| {
            gpio.get(bcm).map(rppal::gpio::Pin::into_output_low).map_err(|e| {
                error!("cannot claim GPIO {bcm}: {e}");
                Error::Init("GPIO pin unavailable")
            })
        };

        let pan_pin = claim(pins::PAN_PWM_GPIO)?;
        let tilt_pin = claim(pins::TILT_PWM_GPIO)?;
        let laser_pin = claim(pins::LASER_GPIO)?;

        Ok(Self {
            pan: ServoChannel::new(
                RpiPwm {
                    pin: pan_pin,
                    axis: Axis::Pan,
                },
                Axis::Pan,
                cfg.pan_range,
            ),
            tilt: ServoChannel::new(
                RpiPwm {
                    pin: tilt_pin,
                    axis: Axis::Tilt,
                },
                Axis::Tilt,
                cfg.tilt_range,
            ),
            laser: LaserDriver::new(RpiLine { pin: laser_pin }),
        })
    }
}

impl ActuatorPort for RpiTurret {
    fn start(&mut self, pan: f64, tilt: f64) -> Result<(), ActuatorError> {
        self.pan.start(pan)?;
        self.tilt.start(tilt)?;
        self.laser.set(Level::Low);
        Ok(())
    }

    fn set_axis(&mut self, cmd: AxisCommand) -> Result<(), ActuatorError> {
        match cmd.axis {
            Axis::Pan => self.pan.set_position(cmd.position),
            Axis::Tilt => self.tilt.set_position(cmd.position),
        }
    }

    fn set_laser(&mut self, level: Level) {
        self.laser.set(level);
    }

    fn stop(&mut self) {
        self.laser.set(Level::Low);
        self.pan.stop();
        self.tilt.stop();
    }
}

impl Drop for RpiTurret {
    fn drop(&mut self) {
        // Pins revert to inputs when rppal drops them; make sure the laser
        // line reads Low until then.
        self.stop();
    }
}
