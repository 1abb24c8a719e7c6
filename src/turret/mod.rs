//! Actuator channel drivers: bounded servo axes and the laser line.
//!
//! Drivers are dumb: they enforce range and lifecycle rules and forward to
//! a raw line port. Deciding *when* to move is the pattern engine's job.

pub mod laser;
pub mod servo;

pub use laser::LaserDriver;
pub use servo::ServoChannel;
