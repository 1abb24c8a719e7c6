//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the blackboard between the state handlers and the
//! service: the service writes stimulus flags in (fire pending, manual
//! requests, shutdown), handlers write pattern requests out, and the
//! service reports pattern completion back. Handlers never touch hardware.

use crate::config::TurretConfig;

// ---------------------------------------------------------------------------
// Pattern requests (written by state handlers; executed by the service)
// ---------------------------------------------------------------------------

/// The zig-zag tier flags carried by a fire request. `full = false` with no
/// `far` flag is the documented invalid-tier combination; the pattern
/// builder rejects it and the service reports a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireRequest {
    pub full: bool,
    pub far: Option<bool>,
}

impl FireRequest {
    /// The tier wired to the automatic trigger.
    pub fn automatic() -> Self {
        Self {
            full: true,
            far: None,
        }
    }
}

/// A pattern for the service to execute against the hardware ports.
/// At most one is pending at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternRequest {
    /// Move to home and settle.
    Home,
    /// The 24-step search sweep.
    SearchSweep,
    /// Deterrent burst at the given tier.
    Zigzag(FireRequest),
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,
    /// Monotonic total tick count.
    pub total_ticks: u64,

    // -- Configuration --
    pub config: TurretConfig,

    // -- Startup --
    /// Set once the initial home-and-sweep sequence has run.
    pub startup_done: bool,

    // -- Pattern hand-off --
    /// Pattern requested by the current state, awaiting execution.
    pub pattern_request: Option<PatternRequest>,
    /// Set by the service when the requested pattern has finished
    /// (completed, cancelled, aborted, or rejected — the state moves on
    /// either way).
    pub pattern_complete: bool,

    // -- Stimulus flags (written by the service) --
    /// Debouncer said fire; consumed on the Watching → Firing transition.
    pub pending_fire: Option<FireRequest>,
    /// Manual sweep command pending.
    pub sweep_requested: bool,
    /// Manual home command pending.
    pub home_requested: bool,
    /// Shutdown signal received.
    pub shutdown_requested: bool,
}

impl FsmContext {
    pub fn new(config: TurretConfig) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            config,
            startup_done: false,
            pattern_request: None,
            pattern_complete: false,
            pending_fire: None,
            sweep_requested: false,
            home_requested: false,
            shutdown_requested: false,
        }
    }

    /// Record a new pattern request, clearing the completion flag.
    /// Called only from `on_enter` handlers.
    pub fn request_pattern(&mut self, request: PatternRequest) {
        debug_assert!(
            self.pattern_request.is_none(),
            "pattern requested while one is pending"
        );
        self.pattern_complete = false;
        self.pattern_request = Some(request);
    }
}
