//! GooseGuard turret controller library.
//!
//! Exposes the domain modules for integration testing and external
//! inspection. All Raspberry Pi-specific code lives behind the `rpi`
//! feature in `adapters::rpi`; everything else is host-safe.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod detect;
pub mod error;
pub mod fsm;
pub mod motion;
pub mod pins;
pub mod turret;

pub mod adapters;
