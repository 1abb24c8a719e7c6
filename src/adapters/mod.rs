//! Adapters — concrete implementations of the port traits.
//!
//! The Raspberry Pi backend is feature-gated (`rpi`); everything else is
//! host-safe so the full controller runs in tests and in the demo loop.

pub mod delay;
pub mod log_sink;
#[cfg(feature = "rpi")]
pub mod rpi;
pub mod sim;
pub mod stdin_detector;
