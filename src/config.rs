//! System configuration parameters.
//!
//! All tunable geometry and timing for the turret. Position values are PWM
//! duty-cycle percentages on the 50 Hz servo frame (the unit the servos are
//! actually commanded in); the mapping to degrees is `(duty - 2) * 18`.
//!
//! Values can be overridden from a JSON file passed on the command line.
//! Invalid configurations are rejected by [`TurretConfig::validate`] before
//! the controller starts — never silently clamped.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Inclusive mechanical travel limits for one axis, in duty-cycle units.
///
/// These are the limits the servo linkage can physically reach without
/// binding — deliberately wider than the nominal aiming band, because the
/// scripted patterns overshoot the aiming band by design (the search sweep
/// dips the camera past "down", the near zig-zag tier ends just past it).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn contains(&self, position: f64) -> bool {
        position >= self.min && position <= self.max
    }
}

/// One zig-zag severity tier: where tilt starts and how far it advances
/// per half-step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ZigzagTier {
    pub start_tilt: f64,
    pub tilt_step: f64,
}

/// Core turret configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurretConfig {
    // --- Mechanical limits ---
    /// Pan servo travel limits.
    pub pan_range: AxisRange,
    /// Tilt servo travel limits.
    pub tilt_range: AxisRange,

    // --- Aiming constants ---
    /// Home (centered) pan position.
    pub home_pan: f64,
    /// Home (straight-ahead) tilt position.
    pub home_tilt: f64,
    /// Pan aiming extreme: furthest left.
    pub pan_left: f64,
    /// Pan aiming extreme: furthest right.
    pub pan_right: f64,

    // --- Search sweep ---
    /// Hold at center before the sweep begins (seconds).
    pub sweep_hold_secs: f64,
    /// Hold per sweep step (seconds).
    pub sweep_step_secs: f64,
    /// Duty increment per sweep step, both axes.
    pub sweep_step_duty: f64,

    // --- Zig-zag deterrent burst ---
    /// Hold at the start position before the burst begins (seconds).
    pub zigzag_hold_secs: f64,
    /// Hold per zig-zag iteration (seconds).
    pub zigzag_step_secs: f64,
    /// Severity tier fired by the automatic trigger.
    pub zigzag_full: ZigzagTier,
    /// Reduced tier for distant targets.
    pub zigzag_far: ZigzagTier,
    /// Reduced tier for close targets.
    pub zigzag_near: ZigzagTier,

    // --- Startup ---
    /// Settle time after moving to home (seconds).
    pub settle_secs: f64,

    // --- Detection ---
    /// Minimum box confidence for a detection to count as a positive frame.
    pub min_confidence: f32,
}

impl Default for TurretConfig {
    fn default() -> Self {
        Self {
            pan_range: AxisRange { min: 3.0, max: 6.0 },
            tilt_range: AxisRange { min: 7.5, max: 11.0 },

            home_pan: 4.5,
            home_tilt: 8.5,
            pan_left: 5.5,
            pan_right: 3.5,

            sweep_hold_secs: 4.0,
            sweep_step_secs: 0.1,
            sweep_step_duty: 1.0 / 6.0,

            zigzag_hold_secs: 5.0,
            zigzag_step_secs: 0.5,
            zigzag_full: ZigzagTier {
                start_tilt: 8.0,
                tilt_step: 2.0 / 6.0,
            },
            zigzag_far: ZigzagTier {
                start_tilt: 8.5,
                tilt_step: 1.0 / 6.0,
            },
            zigzag_near: ZigzagTier {
                start_tilt: 9.25,
                tilt_step: 1.0 / 6.0,
            },

            settle_secs: 2.0,

            min_confidence: 0.6,
        }
    }
}

impl TurretConfig {
    /// Load from a JSON file and validate.
    pub fn load(path: &std::path::Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            log::error!("config: cannot read {}: {e}", path.display());
            Error::Config("config file unreadable")
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|e| {
            log::error!("config: cannot parse {}: {e}", path.display());
            Error::Config("config file malformed")
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations whose geometry the patterns cannot honour.
    ///
    /// The magic step counts match the pattern builders: the sweep climbs
    /// tilt 12 steps and swings pan at most 7 steps left / 5 right of home;
    /// a zig-zag tier advances tilt 5 times past its start.
    pub fn validate(&self) -> Result<(), Error> {
        let err = |msg| Err(Error::Config(msg));

        if self.pan_range.min >= self.pan_range.max {
            return err("pan range is empty");
        }
        if self.tilt_range.min >= self.tilt_range.max {
            return err("tilt range is empty");
        }
        if !self.pan_range.contains(self.home_pan) || !self.tilt_range.contains(self.home_tilt) {
            return err("home position outside mechanical range");
        }
        if !self.pan_range.contains(self.pan_left) || !self.pan_range.contains(self.pan_right) {
            return err("pan aiming extremes outside mechanical range");
        }

        if self.sweep_step_duty <= 0.0 {
            return err("sweep step must be positive");
        }
        if !self.tilt_range.contains(self.home_tilt + 12.0 * self.sweep_step_duty)
            || !self.pan_range.contains(self.home_pan - 7.0 * self.sweep_step_duty)
            || !self.pan_range.contains(self.home_pan + 5.0 * self.sweep_step_duty)
        {
            return err("search sweep exceeds mechanical range");
        }

        for tier in [&self.zigzag_full, &self.zigzag_far, &self.zigzag_near] {
            if tier.tilt_step <= 0.0 {
                return err("zig-zag tilt step must be positive");
            }
            if !self.tilt_range.contains(tier.start_tilt)
                || !self.tilt_range.contains(tier.start_tilt + 5.0 * tier.tilt_step)
            {
                return err("zig-zag tier exceeds tilt range");
            }
        }

        for secs in [
            self.sweep_hold_secs,
            self.sweep_step_secs,
            self.zigzag_hold_secs,
            self.zigzag_step_secs,
            self.settle_secs,
        ] {
            if !(secs >= 0.0 && secs.is_finite()) {
                return err("hold durations must be non-negative");
            }
        }

        if !(0.0..=1.0).contains(&self.min_confidence) {
            return err("min_confidence must be within [0, 1]");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        TurretConfig::default().validate().unwrap();
    }

    #[test]
    fn default_geometry_is_sane() {
        let c = TurretConfig::default();
        assert!(c.pan_right < c.home_pan && c.home_pan < c.pan_left);
        assert!(c.tilt_range.contains(c.home_tilt));
        // The near tier ends furthest down of the three.
        let end = |t: &ZigzagTier| t.start_tilt + 5.0 * t.tilt_step;
        assert!(end(&c.zigzag_near) > end(&c.zigzag_far));
    }

    #[test]
    fn serde_roundtrip() {
        let c = TurretConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: TurretConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.home_pan, c2.home_pan);
        assert_eq!(c.zigzag_full.tilt_step, c2.zigzag_full.tilt_step);
        assert_eq!(c.min_confidence, c2.min_confidence);
    }

    #[test]
    fn home_outside_range_rejected() {
        let mut c = TurretConfig::default();
        c.home_pan = 9.0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn sweep_overrun_rejected() {
        let mut c = TurretConfig::default();
        // Doubling the step pushes the sweep's tilt apex past the limit.
        c.sweep_step_duty = 2.0 / 6.0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn confidence_out_of_unit_interval_rejected() {
        let mut c = TurretConfig::default();
        c.min_confidence = 1.5;
        assert!(c.validate().is_err());
    }
}
