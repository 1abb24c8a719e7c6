//! Laser deterrent line driver.
//!
//! Thin state-tracking wrapper over a digital output. Setting a level is
//! idempotent and infallible once the line is configured — the only real
//! rule lives above: the line starts Low and every pattern must leave it
//! Low, including on abort.

use crate::app::ports::{Level, OutputPort};

pub struct LaserDriver<L: OutputPort> {
    line: L,
    level: Level,
}

impl<L: OutputPort> LaserDriver<L> {
    /// Takes ownership of the line and forces it Low.
    pub fn new(mut line: L) -> Self {
        line.set(Level::Low);
        Self {
            line,
            level: Level::Low,
        }
    }

    pub fn set(&mut self, level: Level) {
        self.line.set(level);
        self.level = level;
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn is_on(&self) -> bool {
        self.level == Level::High
    }
}
