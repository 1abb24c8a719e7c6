//! Property-based tests for the debouncer and the pattern geometry.

use proptest::prelude::*;

use gooseguard::adapters::sim::{InstantDelay, SimTurret};
use gooseguard::app::ports::{ActuatorPort, CancelToken, Level};
use gooseguard::config::TurretConfig;
use gooseguard::detect::DetectionWindow;
use gooseguard::motion::patterns;
use gooseguard::motion::steps::Axis;
use gooseguard::motion::{PatternEngine, PatternOutcome};

// ── Debouncer ─────────────────────────────────────────────────

/// Reference model: the window fires when the three observations pushed
/// since the last fire are all positive; the firing observation itself is
/// discarded along with the history.
fn model_fires(observations: &[bool]) -> Vec<bool> {
    let mut prev3 = [false; 3];
    let mut pushes_since_reset = 0usize;
    let mut fires = Vec::with_capacity(observations.len());
    for &seen in observations {
        let fire = pushes_since_reset >= 3 && prev3 == [true; 3];
        if fire {
            prev3 = [false; 3];
            pushes_since_reset = 0;
        } else {
            prev3 = [prev3[1], prev3[2], seen];
            pushes_since_reset += 1;
        }
        fires.push(fire);
    }
    fires
}

proptest! {
    #[test]
    fn window_matches_reference_model(observations in proptest::collection::vec(any::<bool>(), 0..64)) {
        let mut window = DetectionWindow::new();
        let actual: Vec<bool> = observations.iter().map(|&b| window.observe(b)).collect();
        prop_assert_eq!(actual, model_fires(&observations));
    }

    #[test]
    fn fires_are_at_least_four_observations_apart(observations in proptest::collection::vec(any::<bool>(), 0..64)) {
        let mut window = DetectionWindow::new();
        let mut indices = Vec::new();
        for (i, &b) in observations.iter().enumerate() {
            if window.observe(b) {
                indices.push(i);
            }
        }
        for pair in indices.windows(2) {
            prop_assert!(pair[1] - pair[0] >= 4);
        }
        // A fire needs three priming observations; the earliest is index 3.
        if let Some(&first) = indices.first() {
            prop_assert!(first >= 3);
        }
    }
}

// ── Pattern geometry ──────────────────────────────────────────

fn config_with_home(home_pan: f64, home_tilt: f64) -> TurretConfig {
    let mut cfg = TurretConfig::default();
    cfg.home_pan = home_pan;
    cfg.home_tilt = home_tilt;
    cfg
}

proptest! {
    #[test]
    fn sweep_closes_loop_for_any_valid_home(
        home_pan in 4.2f64..5.16,
        home_tilt in 7.6f64..8.9,
    ) {
        let cfg = config_with_home(home_pan, home_tilt);
        prop_assume!(cfg.validate().is_ok());

        let steps = patterns::search_sweep(&cfg).unwrap();
        let last_move = &steps[steps.len() - 2];
        let pos = |axis| {
            last_move
                .commands
                .iter()
                .find(|c| c.axis == axis)
                .map(|c| c.position)
        };
        prop_assert_eq!(pos(Axis::Pan), Some(home_pan));
        prop_assert_eq!(pos(Axis::Tilt), Some(home_tilt));
    }

    #[test]
    fn sweep_stays_within_range_for_any_valid_home(
        home_pan in 4.2f64..5.16,
        home_tilt in 7.6f64..8.9,
    ) {
        let cfg = config_with_home(home_pan, home_tilt);
        prop_assume!(cfg.validate().is_ok());

        for step in &patterns::search_sweep(&cfg).unwrap() {
            for cmd in &step.commands {
                let range = match cmd.axis {
                    Axis::Pan => cfg.pan_range,
                    Axis::Tilt => cfg.tilt_range,
                };
                prop_assert!(range.contains(cmd.position), "{:?} out of range", cmd);
            }
        }
    }

    #[test]
    fn zigzag_tiers_run_to_completion_with_laser_safe(
        start_tilt in 7.6f64..9.2,
        headroom in 0.05f64..1.0,
        full in any::<bool>(),
        far in any::<bool>(),
    ) {
        let mut cfg = TurretConfig::default();
        let tilt_step = headroom * (cfg.tilt_range.max - start_tilt) / 5.0;
        prop_assume!(tilt_step > 0.0);
        let tier = gooseguard::config::ZigzagTier { start_tilt, tilt_step };
        cfg.zigzag_full = tier;
        cfg.zigzag_far = tier;
        cfg.zigzag_near = tier;
        prop_assume!(cfg.validate().is_ok());

        let steps = patterns::zigzag(&cfg, full, Some(far)).unwrap();
        let mut hw = SimTurret::new(&cfg);
        hw.start(cfg.home_pan, cfg.home_tilt).unwrap();
        let engine = PatternEngine::new(CancelToken::new());
        let outcome = engine
            .run("zigzag", &steps, &mut hw, &mut InstantDelay::new())
            .unwrap();

        prop_assert_eq!(outcome, PatternOutcome::Completed);
        prop_assert_eq!(hw.laser_level(), Level::Low);
        // Six toggles starting right end on the left extreme.
        prop_assert_eq!(hw.pan_position(), Some(cfg.pan_left));
    }
}
