//! Concrete state handler functions and table builder.
//!
//! ```text
//!            startup                         detection-driven
//!  IDLE ──▶ HOMING ──▶ SWEEPING ──▶ IDLE ──▶ WATCHING ◀──▶ FIRING
//!                                               │
//!                                       [shutdown signal]
//!                                               ▼
//!                                         SHUTTING_DOWN ──▶ TERMINAL
//! ```
//!
//! States that move the turret (Homing, Sweeping, Firing) request their
//! pattern on entry and hold until the service reports completion. Only one
//! pattern can ever be in flight.

use log::{info, warn};

use super::context::{FireRequest, FsmContext, PatternRequest};
use super::{StateDescriptor, StateId};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table. Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: None,
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1 — Homing
        StateDescriptor {
            id: StateId::Homing,
            name: "Homing",
            on_enter: Some(homing_enter),
            on_exit: None,
            on_update: homing_update,
        },
        // Index 2 — Sweeping
        StateDescriptor {
            id: StateId::Sweeping,
            name: "Sweeping",
            on_enter: Some(sweeping_enter),
            on_exit: None,
            on_update: sweeping_update,
        },
        // Index 3 — Watching
        StateDescriptor {
            id: StateId::Watching,
            name: "Watching",
            on_enter: Some(watching_enter),
            on_exit: None,
            on_update: watching_update,
        },
        // Index 4 — Firing
        StateDescriptor {
            id: StateId::Firing,
            name: "Firing",
            on_enter: Some(firing_enter),
            on_exit: None,
            on_update: firing_update,
        },
        // Index 5 — ShuttingDown
        StateDescriptor {
            id: StateId::ShuttingDown,
            name: "ShuttingDown",
            on_enter: Some(shutting_down_enter),
            on_exit: None,
            on_update: shutting_down_update,
        },
        // Index 6 — Terminal
        StateDescriptor {
            id: StateId::Terminal,
            name: "Terminal",
            on_enter: None,
            on_exit: None,
            on_update: terminal_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE — transient hub between startup phases
// ═══════════════════════════════════════════════════════════════════════════

fn idle_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.shutdown_requested {
        return Some(StateId::ShuttingDown);
    }
    if !ctx.startup_done {
        return Some(StateId::Homing);
    }
    Some(StateId::Watching)
}

// ═══════════════════════════════════════════════════════════════════════════
//  HOMING — move to the centered position and settle
// ═══════════════════════════════════════════════════════════════════════════

fn homing_enter(ctx: &mut FsmContext) {
    ctx.home_requested = false;
    ctx.request_pattern(PatternRequest::Home);
    info!("HOMING: centering turret");
}

fn homing_update(ctx: &mut FsmContext) -> Option<StateId> {
    if !ctx.pattern_complete {
        return None;
    }
    // During startup the sweep follows; a manual re-home goes straight
    // back to watching.
    if ctx.startup_done {
        Some(StateId::Watching)
    } else {
        Some(StateId::Sweeping)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  SWEEPING — one search sweep, laser on
// ═══════════════════════════════════════════════════════════════════════════

fn sweeping_enter(ctx: &mut FsmContext) {
    ctx.sweep_requested = false;
    ctx.request_pattern(PatternRequest::SearchSweep);
    info!("SWEEPING: running search sweep");
}

fn sweeping_update(ctx: &mut FsmContext) -> Option<StateId> {
    if !ctx.pattern_complete {
        return None;
    }
    ctx.startup_done = true;
    Some(StateId::Idle)
}

// ═══════════════════════════════════════════════════════════════════════════
//  WATCHING — quiescent, scoring frames
// ═══════════════════════════════════════════════════════════════════════════

fn watching_enter(_ctx: &mut FsmContext) {
    info!("WATCHING: scoring frames");
}

fn watching_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.shutdown_requested {
        return Some(StateId::ShuttingDown);
    }
    if ctx.home_requested {
        return Some(StateId::Homing);
    }
    if ctx.sweep_requested {
        return Some(StateId::Sweeping);
    }
    if ctx.pending_fire.is_some() {
        return Some(StateId::Firing);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  FIRING — deterrent burst in progress
// ═══════════════════════════════════════════════════════════════════════════

fn firing_enter(ctx: &mut FsmContext) {
    let request = ctx.pending_fire.take().unwrap_or_else(|| {
        warn!("FIRING: entered without a pending request, using automatic tier");
        FireRequest::automatic()
    });
    ctx.request_pattern(PatternRequest::Zigzag(request));
    info!(
        "FIRING: zig-zag burst (full={}, far={:?})",
        request.full, request.far
    );
}

fn firing_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.pattern_complete {
        Some(StateId::Watching)
    } else {
        None
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  SHUTTING DOWN / TERMINAL
// ═══════════════════════════════════════════════════════════════════════════

fn shutting_down_enter(_ctx: &mut FsmContext) {
    info!("SHUTTING DOWN: stopping actuators");
}

fn shutting_down_update(_ctx: &mut FsmContext) -> Option<StateId> {
    // Actuator teardown is the service's job; the state exists so no
    // detection can slip in between the signal and Terminal.
    Some(StateId::Terminal)
}

fn terminal_update(_ctx: &mut FsmContext) -> Option<StateId> {
    None
}
