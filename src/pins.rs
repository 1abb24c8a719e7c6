//! GPIO pin assignments for the turret head (BCM numbering).
//!
//! Single source of truth — every adapter references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Servos (SG90-class, driven by software PWM)
// ---------------------------------------------------------------------------

/// Pan servo signal line.
pub const PAN_PWM_GPIO: u8 = 17;
/// Tilt servo signal line.
pub const TILT_PWM_GPIO: u8 = 27;

/// Servo PWM frequency. Standard hobby-servo 20 ms frame.
pub const SERVO_PWM_HZ: f64 = 50.0;

// ---------------------------------------------------------------------------
// Laser deterrent
// ---------------------------------------------------------------------------

/// Digital output: HIGH = laser on. Driven through a transistor stage;
/// the line itself sources no meaningful current.
pub const LASER_GPIO: u8 = 22;
