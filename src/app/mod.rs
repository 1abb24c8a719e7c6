//! The hexagonal application core: port traits, events, commands, and the
//! orchestrating service.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
