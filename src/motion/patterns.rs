//! Deterministic pattern builders.
//!
//! Pure functions from configuration to a [`StepBuf`]; nothing here touches
//! hardware. Positions are generated as `start + k * increment` with integer
//! step counts, so closed-loop patterns land back on their exact starting
//! position with no accumulated float error.

use core::time::Duration;

use crate::config::{TurretConfig, ZigzagTier};
use crate::error::PatternError;
use crate::motion::steps::{AxisCommand, LaserAction, MotionStep, StepBuf};

/// Sweep step count. 24 steps of 0.1 s trace one full loop.
const SWEEP_STEPS: i32 = 24;
/// Zig-zag iteration count (pan toggles).
const ZIGZAG_STEPS: u32 = 6;

// ───────────────────────────────────────────────────────────────
// Builders
// ───────────────────────────────────────────────────────────────

/// Move to the home position and settle. Laser untouched.
pub fn home(cfg: &TurretConfig) -> Result<StepBuf, PatternError> {
    let mut steps = StepBuf::new();
    push(
        &mut steps,
        aim(
            cfg.home_pan,
            cfg.home_tilt,
            LaserAction::Unchanged,
            cfg.settle_secs,
        )?,
    )?;
    Ok(steps)
}

/// Search sweep ("circle"): hold centered, then 24 quick steps tracing an
/// approximate circle — tilt climbs for the first half and descends for the
/// second, while pan swings left and back, then right and back. Both axes
/// end exactly where they started. Laser is on for the moving portion.
pub fn search_sweep(cfg: &TurretConfig) -> Result<StepBuf, PatternError> {
    let mut steps = StepBuf::new();
    push(
        &mut steps,
        aim(
            cfg.home_pan,
            cfg.home_tilt,
            LaserAction::Unchanged,
            cfg.sweep_hold_secs,
        )?,
    )?;

    let inc = cfg.sweep_step_duty;
    let mut pan_k: i32 = 0;
    let mut tilt_k: i32 = 0;
    for i in 0..SWEEP_STEPS {
        if i < 12 {
            // Outbound half: tilt down-and-out, pan swings left then recovers.
            tilt_k += 1;
            if i <= 6 {
                pan_k -= 1;
            } else {
                pan_k += 1;
            }
        } else {
            // Return half mirrors the outbound.
            tilt_k -= 1;
            if i <= 18 {
                pan_k += 1;
            } else {
                pan_k -= 1;
            }
        }
        let laser = if i == 0 {
            LaserAction::On
        } else {
            LaserAction::Unchanged
        };
        push(
            &mut steps,
            aim(
                cfg.home_pan + f64::from(pan_k) * inc,
                cfg.home_tilt + f64::from(tilt_k) * inc,
                laser,
                cfg.sweep_step_secs,
            )?,
        )?;
    }

    push(&mut steps, laser_off_tail())?;
    Ok(steps)
}

/// Zig-zag deterrent burst: park at the far-left/straight-ahead start, hold,
/// then snap pan between its extremes while tilt walks downward one tier
/// increment per toggle, laser on throughout the toggles.
///
/// Tier selection from the `(full, far)` flags:
///
/// | full  | far         | tilt step | start tilt |
/// |-------|-------------|-----------|------------|
/// | true  | ignored     | 2/6       | 8.0        |
/// | false | Some(true)  | 1/6       | 8.5        |
/// | false | Some(false) | 1/6       | 9.25       |
/// | false | None        | [`PatternError::InvalidTier`] |
pub fn zigzag(cfg: &TurretConfig, full: bool, far: Option<bool>) -> Result<StepBuf, PatternError> {
    let tier = zigzag_tier(cfg, full, far)?;

    let mut steps = StepBuf::new();
    push(
        &mut steps,
        aim(
            cfg.pan_left,
            cfg.home_tilt,
            LaserAction::Unchanged,
            cfg.zigzag_hold_secs,
        )?,
    )?;

    for i in 0..ZIGZAG_STEPS {
        let pan = if i % 2 == 0 { cfg.pan_right } else { cfg.pan_left };
        let tilt = tier.start_tilt + f64::from(i) * tier.tilt_step;
        let laser = if i == 0 {
            LaserAction::On
        } else {
            LaserAction::Unchanged
        };
        push(&mut steps, aim(pan, tilt, laser, cfg.zigzag_step_secs)?)?;
    }

    push(&mut steps, laser_off_tail())?;
    Ok(steps)
}

/// Resolve the `(full, far)` flag pair to a severity tier.
/// `full = false` with no `far` flag matches no tier.
pub fn zigzag_tier(
    cfg: &TurretConfig,
    full: bool,
    far: Option<bool>,
) -> Result<ZigzagTier, PatternError> {
    match (full, far) {
        (true, _) => Ok(cfg.zigzag_full),
        (false, Some(true)) => Ok(cfg.zigzag_far),
        (false, Some(false)) => Ok(cfg.zigzag_near),
        (false, None) => Err(PatternError::InvalidTier),
    }
}

// ───────────────────────────────────────────────────────────────
// Step construction helpers
// ───────────────────────────────────────────────────────────────

fn aim(pan: f64, tilt: f64, laser: LaserAction, hold_secs: f64) -> Result<MotionStep, PatternError> {
    let commands = heapless::Vec::from_slice(&[AxisCommand::pan(pan), AxisCommand::tilt(tilt)])
        .map_err(|()| PatternError::StepOverflow)?;
    Ok(MotionStep {
        commands,
        laser,
        hold: Duration::from_secs_f64(hold_secs),
    })
}

fn laser_off_tail() -> MotionStep {
    MotionStep {
        commands: heapless::Vec::new(),
        laser: LaserAction::Off,
        hold: Duration::ZERO,
    }
}

fn push(steps: &mut StepBuf, step: MotionStep) -> Result<(), PatternError> {
    steps.push(step).map_err(|_| PatternError::StepOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::steps::Axis;

    fn cfg() -> TurretConfig {
        TurretConfig::default()
    }

    fn axis_position(step: &MotionStep, axis: Axis) -> Option<f64> {
        step.commands
            .iter()
            .find(|c| c.axis == axis)
            .map(|c| c.position)
    }

    // ── Search sweep ─────────────────────────────────────────

    #[test]
    fn sweep_has_hold_24_steps_and_tail() {
        let steps = search_sweep(&cfg()).unwrap();
        assert_eq!(steps.len(), 26);
        assert_eq!(steps[0].hold, Duration::from_secs(4));
        assert_eq!(steps[1].laser, LaserAction::On);
        assert_eq!(steps[25].laser, LaserAction::Off);
        assert!(steps[25].commands.is_empty());
    }

    #[test]
    fn sweep_is_a_closed_loop() {
        let c = cfg();
        let steps = search_sweep(&c).unwrap();
        let last = &steps[24];
        assert_eq!(axis_position(last, Axis::Pan), Some(c.home_pan));
        assert_eq!(axis_position(last, Axis::Tilt), Some(c.home_tilt));
    }

    #[test]
    fn sweep_tilt_is_monotone_out_and_back() {
        let steps = search_sweep(&cfg()).unwrap();
        let tilts: Vec<f64> = steps[1..=24]
            .iter()
            .map(|s| axis_position(s, Axis::Tilt).unwrap())
            .collect();
        assert!(tilts[..12].windows(2).all(|w| w[1] > w[0]));
        assert!(tilts[11..].windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn sweep_pan_turns_at_documented_steps() {
        let c = cfg();
        let steps = search_sweep(&c).unwrap();
        let pans: Vec<f64> = steps[1..=24]
            .iter()
            .map(|s| axis_position(s, Axis::Pan).unwrap())
            .collect();
        // Falls through step 6, rises through step 18, falls to the end.
        assert!(pans[..7].windows(2).all(|w| w[1] < w[0]));
        assert!(pans[6..19].windows(2).all(|w| w[1] > w[0]));
        assert!(pans[18..].windows(2).all(|w| w[1] < w[0]));
        // Leftmost excursion is 7 steps left of center.
        let min = pans.iter().copied().fold(f64::INFINITY, f64::min);
        assert_eq!(min, c.home_pan - 7.0 * c.sweep_step_duty);
    }

    #[test]
    fn sweep_stays_within_mechanical_range() {
        let c = cfg();
        for step in &search_sweep(&c).unwrap() {
            for cmd in &step.commands {
                let range = match cmd.axis {
                    Axis::Pan => c.pan_range,
                    Axis::Tilt => c.tilt_range,
                };
                assert!(range.contains(cmd.position), "{cmd:?} out of range");
            }
        }
    }

    // ── Zig-zag ──────────────────────────────────────────────

    #[test]
    fn full_tier_tilt_ladder() {
        let steps = zigzag(&cfg(), true, None).unwrap();
        let tilts: Vec<f64> = steps[1..=6]
            .iter()
            .map(|s| axis_position(s, Axis::Tilt).unwrap())
            .collect();
        let expected: Vec<f64> = (0..6).map(|i| 8.0 + f64::from(i) * 2.0 / 6.0).collect();
        assert_eq!(tilts, expected);
    }

    #[test]
    fn pan_toggles_six_times_starting_right() {
        let c = cfg();
        let steps = zigzag(&c, true, None).unwrap();
        // Parked far left before the burst.
        assert_eq!(axis_position(&steps[0], Axis::Pan), Some(c.pan_left));
        assert_eq!(steps[0].hold, Duration::from_secs(5));
        let pans: Vec<f64> = steps[1..=6]
            .iter()
            .map(|s| axis_position(s, Axis::Pan).unwrap())
            .collect();
        assert_eq!(
            pans,
            vec![
                c.pan_right, c.pan_left, c.pan_right, c.pan_left, c.pan_right, c.pan_left
            ]
        );
    }

    #[test]
    fn far_and_near_tiers_start_where_documented() {
        let c = cfg();
        let far = zigzag(&c, false, Some(true)).unwrap();
        assert_eq!(axis_position(&far[1], Axis::Tilt), Some(8.5));
        let near = zigzag(&c, false, Some(false)).unwrap();
        assert_eq!(axis_position(&near[1], Axis::Tilt), Some(9.25));
        // Reduced tiers advance by 1/6 per toggle.
        let step = axis_position(&far[2], Axis::Tilt).unwrap() - 8.5;
        assert!((step - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn laser_bracket_on_first_toggle_off_at_tail() {
        let steps = zigzag(&cfg(), false, Some(true)).unwrap();
        assert_eq!(steps[0].laser, LaserAction::Unchanged);
        assert_eq!(steps[1].laser, LaserAction::On);
        assert_eq!(steps.last().unwrap().laser, LaserAction::Off);
    }

    #[test]
    fn invalid_tier_flags_rejected() {
        assert_eq!(
            zigzag(&cfg(), false, None).unwrap_err(),
            PatternError::InvalidTier
        );
    }

    // ── Home ─────────────────────────────────────────────────

    #[test]
    fn home_is_one_settling_step() {
        let c = cfg();
        let steps = home(&c).unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(axis_position(&steps[0], Axis::Pan), Some(c.home_pan));
        assert_eq!(axis_position(&steps[0], Axis::Tilt), Some(c.home_tilt));
        assert_eq!(steps[0].laser, LaserAction::Unchanged);
        assert_eq!(steps[0].hold, Duration::from_secs(2));
    }
}
