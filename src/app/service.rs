//! Application service — the hexagonal core.
//!
//! [`TurretService`] owns the FSM, the detection window, and the pattern
//! engine. All I/O flows through port traits injected at call sites, so
//! the entire controller runs under test with in-memory adapters.
//!
//! ```text
//!  Detection stream ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!                       │      TurretService       │
//!      ActuatorPort ◀── │  FSM · Window · Engine   │
//!      StepDelay    ◀── └─────────────────────────┘
//! ```
//!
//! Data flows one way: detection signal → debouncer → fire decision →
//! pattern engine → actuator ports. Pattern execution is blocking with
//! respect to the frame loop — while a pattern runs, no frames are scored.

use log::{info, warn};

use crate::detect::{frame_has_target, Detection, DetectionWindow};
use crate::error::{Error, PatternError};
use crate::fsm::context::{FireRequest, FsmContext, PatternRequest};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::motion::patterns;
use crate::motion::{PatternEngine, PatternOutcome, StepBuf};

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{ActuatorPort, CancelToken, EventSink, StepDelay};

/// The application service orchestrates all domain logic.
///
/// Single logical thread of control: detection scoring, debouncing, and
/// motion execution happen sequentially inside each call. The actuator
/// ports have exactly one writer — this service.
pub struct TurretService {
    fsm: Fsm,
    ctx: FsmContext,
    window: DetectionWindow,
    engine: PatternEngine,
}

impl TurretService {
    /// Construct the service. Does **not** touch hardware — call
    /// [`startup`](Self::startup) next.
    pub fn new(config: crate::config::TurretConfig) -> Self {
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Idle);
        Self {
            fsm,
            ctx,
            window: DetectionWindow::new(),
            engine: PatternEngine::new(CancelToken::new()),
        }
    }

    /// A handle for interrupting a running pattern (e.g. from a signal
    /// handler). Cancellation takes effect at the next step boundary.
    pub fn cancel_token(&self) -> CancelToken {
        self.engine.cancel_token()
    }

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn is_terminal(&self) -> bool {
        self.fsm.current_state() == StateId::Terminal
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Startup sequence: start both servo channels at home (laser Low),
    /// then drive the FSM through homing and one search sweep, ending in
    /// Watching.
    pub fn startup(
        &mut self,
        hw: &mut impl ActuatorPort,
        delay: &mut impl StepDelay,
        sink: &mut impl EventSink,
    ) -> Result<(), Error> {
        hw.start(self.ctx.config.home_pan, self.ctx.config.home_tilt)?;
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("TurretService started");
        self.pump(hw, delay, sink)
    }

    /// Shutdown sequence: stop all actuators and park the FSM in Terminal.
    /// Idempotent; safe to call on any state.
    pub fn shutdown(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        if self.is_terminal() {
            return;
        }
        self.ctx.shutdown_requested = true;
        self.ctx.pattern_request = None;
        self.fsm.force_transition(StateId::ShuttingDown, &mut self.ctx);
        hw.stop();
        self.fsm.force_transition(StateId::Terminal, &mut self.ctx);
        sink.emit(&AppEvent::ShutdownComplete);
        info!("TurretService shut down");
    }

    // ── Per-frame orchestration ───────────────────────────────

    /// Score one frame's detections, feed the debouncer, and run the
    /// deterrent burst when it fires. Returns whether a burst was
    /// triggered by this frame.
    pub fn on_frame(
        &mut self,
        detections: &[Detection],
        hw: &mut impl ActuatorPort,
        delay: &mut impl StepDelay,
        sink: &mut impl EventSink,
    ) -> Result<bool, Error> {
        let present = frame_has_target(detections, self.ctx.config.min_confidence);

        let mut fired = false;
        if self.fsm.current_state() == StateId::Watching && self.window.observe(present) {
            self.ctx.pending_fire = Some(FireRequest::automatic());
            sink.emit(&AppEvent::FireTriggered);
            fired = true;
        }
        sink.emit(&AppEvent::FrameScored {
            present,
            window: self.window.slots(),
        });

        self.pump(hw, delay, sink)?;
        Ok(fired)
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (operator tooling, future RPC).
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        hw: &mut impl ActuatorPort,
        delay: &mut impl StepDelay,
        sink: &mut impl EventSink,
    ) -> Result<(), Error> {
        match cmd {
            AppCommand::Shutdown => {
                sink.emit(&AppEvent::ShutdownRequested);
                self.shutdown(hw, sink);
                return Ok(());
            }
            cmd if self.fsm.current_state() != StateId::Watching => {
                warn!("command {cmd:?} ignored in state {:?}", self.state());
                return Ok(());
            }
            AppCommand::Fire { full, far } => {
                self.ctx.pending_fire = Some(FireRequest { full, far });
            }
            AppCommand::Sweep => self.ctx.sweep_requested = true,
            AppCommand::Home => self.ctx.home_requested = true,
        }
        self.pump(hw, delay, sink)
    }

    // ── Internal ──────────────────────────────────────────────

    /// Tick the FSM until it neither changes state nor requests a pattern,
    /// executing requested patterns as they appear. Terminates because
    /// every request consumes a stimulus flag and flag-free transition
    /// chains are acyclic.
    fn pump(
        &mut self,
        hw: &mut impl ActuatorPort,
        delay: &mut impl StepDelay,
        sink: &mut impl EventSink,
    ) -> Result<(), Error> {
        loop {
            let before = self.fsm.current_state();
            self.fsm.tick(&mut self.ctx);

            if let Some(request) = self.ctx.pattern_request.take() {
                self.execute(request, hw, delay, sink)?;
                continue;
            }
            if self.fsm.current_state() == before {
                return Ok(());
            }
        }
    }

    /// Build and run one requested pattern. The FSM's completion flag is
    /// set in every case — completed, cancelled, rejected, or aborted —
    /// so the requesting state always moves on.
    fn execute(
        &mut self,
        request: PatternRequest,
        hw: &mut impl ActuatorPort,
        delay: &mut impl StepDelay,
        sink: &mut impl EventSink,
    ) -> Result<(), Error> {
        let cfg = &self.ctx.config;
        let (name, built): (_, Result<StepBuf, PatternError>) = match request {
            PatternRequest::Home => ("home", patterns::home(cfg)),
            PatternRequest::SearchSweep => ("search-sweep", patterns::search_sweep(cfg)),
            PatternRequest::Zigzag(f) => ("zigzag", patterns::zigzag(cfg, f.full, f.far)),
        };

        let steps = match built {
            Ok(steps) => steps,
            Err(PatternError::InvalidTier) => {
                // Diagnostic, then a no-op: no motion, no laser change.
                warn!("pattern {name}: invalid zig-zag tier flags, ignoring");
                sink.emit(&AppEvent::PatternRejected(PatternError::InvalidTier));
                self.ctx.pattern_complete = true;
                return Ok(());
            }
            Err(e) => {
                self.ctx.pattern_complete = true;
                return Err(e.into());
            }
        };

        sink.emit(&AppEvent::PatternStarted(name));
        match self.engine.run(name, &steps, hw, delay) {
            Ok(outcome) => {
                self.ctx.pattern_complete = true;
                sink.emit(&AppEvent::PatternFinished { name, outcome });
                if outcome == PatternOutcome::Cancelled {
                    warn!("pattern {name}: cancelled, laser restored Low");
                }
                Ok(())
            }
            Err(e) => {
                // The scripted geometry is invalid from here on; the engine
                // has already restored the laser. Report and propagate.
                self.ctx.pattern_complete = true;
                sink.emit(&AppEvent::PatternAborted { name, error: e });
                Err(e.into())
            }
        }
    }
}
