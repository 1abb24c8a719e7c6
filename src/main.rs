//! GooseGuard — main entry point.
//!
//! Hexagonal wiring:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  RpiTurret / SimTurret    StdinDetector / Scripted       │
//! │  (ActuatorPort)           (DetectorPort)                 │
//! │  ThreadDelay (StepDelay)  LogEventSink (EventSink)       │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ──────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │          TurretService (pure logic)                │  │
//! │  │  FSM · DetectionWindow · PatternEngine             │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! With the `rpi` feature the binary drives real GPIO and reads the vision
//! pipeline's detection stream from stdin. Without it, a short scripted
//! session runs against the in-memory adapters — useful for exercising the
//! whole controller on a workstation.

use anyhow::{Context, Result};
use log::{info, warn};

use gooseguard::adapters::log_sink::LogEventSink;
use gooseguard::app::ports::{ActuatorPort, DetectorPort, EventSink, StepDelay};
use gooseguard::app::service::TurretService;
use gooseguard::config::TurretConfig;
use gooseguard::error::DetectorError;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => TurretConfig::load(std::path::Path::new(&path))
            .context("loading turret configuration")?,
        None => {
            let config = TurretConfig::default();
            config.validate().context("validating default configuration")?;
            config
        }
    };

    run_target(config)
}

#[cfg(feature = "rpi")]
fn run_target(config: TurretConfig) -> Result<()> {
    use gooseguard::adapters::delay::ThreadDelay;
    use gooseguard::adapters::rpi::RpiTurret;
    use gooseguard::adapters::stdin_detector::StdinDetector;

    let mut hw = RpiTurret::new(&config).context("claiming turret GPIO")?;
    let detector = StdinDetector::new(std::io::stdin().lock());
    run_loop(config, detector, &mut hw, &mut ThreadDelay)
}

#[cfg(not(feature = "rpi"))]
fn run_target(config: TurretConfig) -> Result<()> {
    use gooseguard::adapters::sim::{InstantDelay, ScriptedDetector, SimTurret};

    info!("no hardware backend compiled in; running scripted demo session");
    // A quiet stretch, one flicker, then a sustained sighting.
    let script = [
        false, false, false, true, false, true, true, true, true, false,
    ];
    let mut hw = SimTurret::new(&config);
    let detector = ScriptedDetector::from_booleans(&script);
    run_loop(config, detector, &mut hw, &mut InstantDelay::new())
}

/// The single run loop: startup, score frames until the stream ends or a
/// fatal error, always shut down cleanly.
fn run_loop(
    config: TurretConfig,
    mut detector: impl DetectorPort,
    hw: &mut impl ActuatorPort,
    delay: &mut impl StepDelay,
) -> Result<()> {
    let mut sink = LogEventSink::new();
    let mut service = TurretService::new(config);

    service
        .startup(hw, delay, &mut sink)
        .context("turret startup sequence")?;

    let outcome = frame_loop(&mut service, &mut detector, hw, delay, &mut sink);
    service.shutdown(hw, &mut sink);
    outcome
}

fn frame_loop(
    service: &mut TurretService,
    detector: &mut impl DetectorPort,
    hw: &mut impl ActuatorPort,
    delay: &mut impl StepDelay,
    sink: &mut impl EventSink,
) -> Result<()> {
    loop {
        let frame = match detector.next_frame() {
            Ok(frame) => frame,
            Err(DetectorError::StreamClosed) => {
                info!("detection stream closed; shutting down");
                return Ok(());
            }
            Err(e) => return Err(e).context("detector boundary failure"),
        };

        // A pattern abort (out-of-range command) invalidates one burst,
        // not the whole session; the laser is already safe.
        if let Err(e) = service.on_frame(&frame, hw, delay, sink) {
            warn!("frame handling failed: {e}");
        }

        if service.is_terminal() {
            return Ok(());
        }
    }
}
