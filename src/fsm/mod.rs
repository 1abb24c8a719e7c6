//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern: a fixed table of states, each a row of
//! plain `fn` pointers — no closures, no dynamic dispatch, no heap.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  StateTable                                                   │
//! │  ┌──────────────┬───────────┬──────────┬───────────────────┐  │
//! │  │ StateId      │ on_enter  │ on_exit  │ on_update         │  │
//! │  ├──────────────┼───────────┼──────────┼───────────────────┤  │
//! │  │ Idle         │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │  │
//! │  │ Homing       │ …         │ …        │ …                 │  │
//! │  │ Sweeping     │ …         │ …        │ …                 │  │
//! │  │ Watching     │ …         │ …        │ …                 │  │
//! │  │ Firing       │ …         │ …        │ …                 │  │
//! │  │ ShuttingDown │ …         │ …        │ …                 │  │
//! │  │ Terminal     │ …         │ …        │ …                 │  │
//! │  └──────────────┴───────────┴──────────┴───────────────────┘  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** state. If it
//! returns `Some(next_id)`, the engine runs `on_exit` for the current state,
//! then `on_enter` for the next, and updates the current pointer. Handlers
//! receive `&mut FsmContext`, which carries flags in (fire pending, shutdown
//! requested) and pattern requests out. No state can run two patterns at
//! once: a state requests at most one pattern, on entry, and waits for its
//! completion flag.

pub mod context;
pub mod states;

use context::FsmContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all controller states.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Idle = 0,
    Homing = 1,
    Sweeping = 2,
    Watching = 3,
    Firing = 4,
    ShuttingDown = 5,
    Terminal = 6,
}

impl StateId {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 7;

    /// Convert a `u8` index back to `StateId`. Panics on out-of-range in
    /// debug builds; returns `Terminal` in release (safe fallback).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::Homing,
            2 => Self::Sweeping,
            3 => Self::Watching,
            4 => Self::Firing,
            5 => Self::ShuttingDown,
            6 => Self::Terminal,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Terminal
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each state transition.
pub type StateActionFn = fn(&mut FsmContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut FsmContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array — no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
    /// Monotonically increasing tick counter.
    tick_count: u64,
    /// Tick at which the current state was entered.
    state_entry_tick: u64,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
            tick_count: 0,
            state_entry_tick: 0,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick.
    ///
    /// 1. Call `on_update` for the current state.
    /// 2. If it returns `Some(next)`, execute the transition:
    ///    `on_exit(current)` → update pointer → `on_enter(next)`.
    pub fn tick(&mut self, ctx: &mut FsmContext) {
        self.tick_count += 1;
        ctx.ticks_in_state = self.tick_count - self.state_entry_tick;
        ctx.total_ticks = self.tick_count;

        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// Force an immediate transition (used by the shutdown path to reach
    /// `Terminal` regardless of what `on_update` returned).
    pub fn force_transition(&mut self, next: StateId, ctx: &mut FsmContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    /// How many ticks the FSM has been in the current state.
    pub fn ticks_in_current_state(&self) -> u64 {
        self.tick_count - self.state_entry_tick
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut FsmContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        // Exit current state
        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        // Update pointer and timing
        self.current = next_idx;
        self.state_entry_tick = self.tick_count;
        ctx.ticks_in_state = 0;

        // Enter new state
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::context::{FireRequest, FsmContext, PatternRequest};
    use super::*;
    use crate::config::TurretConfig;

    fn make_ctx() -> FsmContext {
        FsmContext::new(TurretConfig::default())
    }

    fn make_fsm() -> Fsm {
        Fsm::new(states::build_state_table(), StateId::Idle)
    }

    /// Simulate the service completing whatever pattern is requested.
    fn complete_pattern(ctx: &mut FsmContext) {
        assert!(ctx.pattern_request.take().is_some());
        ctx.pattern_complete = true;
    }

    #[test]
    fn starts_in_idle() {
        let fsm = make_fsm();
        assert_eq!(fsm.current_state(), StateId::Idle);
    }

    #[test]
    fn startup_walks_homing_then_sweeping_then_watching() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);

        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_state(), StateId::Homing);
        assert!(matches!(ctx.pattern_request, Some(PatternRequest::Home)));
        complete_pattern(&mut ctx);

        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_state(), StateId::Sweeping);
        assert!(matches!(
            ctx.pattern_request,
            Some(PatternRequest::SearchSweep)
        ));
        complete_pattern(&mut ctx);

        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_state(), StateId::Idle);
        assert!(ctx.startup_done);

        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_state(), StateId::Watching);
    }

    #[test]
    fn homing_waits_for_pattern_completion() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_state(), StateId::Homing);

        // Pattern still running — no new request, no transition.
        ctx.pattern_request = None;
        fsm.tick(&mut ctx);
        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_state(), StateId::Homing);
        assert!(ctx.pattern_request.is_none());
    }

    fn walk_to_watching(fsm: &mut Fsm, ctx: &mut FsmContext) {
        fsm.start(ctx);
        fsm.tick(ctx); // -> Homing
        complete_pattern(ctx);
        fsm.tick(ctx); // -> Sweeping
        complete_pattern(ctx);
        fsm.tick(ctx); // -> Idle
        fsm.tick(ctx); // -> Watching
        assert_eq!(fsm.current_state(), StateId::Watching);
    }

    #[test]
    fn watching_fires_on_pending_fire_and_returns() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        walk_to_watching(&mut fsm, &mut ctx);

        ctx.pending_fire = Some(FireRequest::automatic());
        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_state(), StateId::Firing);
        assert!(ctx.pending_fire.is_none());
        assert!(matches!(
            ctx.pattern_request,
            Some(PatternRequest::Zigzag(FireRequest {
                full: true,
                far: None
            }))
        ));
        complete_pattern(&mut ctx);

        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_state(), StateId::Watching);
    }

    #[test]
    fn watching_stays_put_without_stimulus() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        walk_to_watching(&mut fsm, &mut ctx);

        for _ in 0..10 {
            fsm.tick(&mut ctx);
        }
        assert_eq!(fsm.current_state(), StateId::Watching);
        assert!(ctx.pattern_request.is_none());
    }

    #[test]
    fn shutdown_reaches_terminal() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        walk_to_watching(&mut fsm, &mut ctx);

        ctx.shutdown_requested = true;
        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_state(), StateId::ShuttingDown);
        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_state(), StateId::Terminal);
        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_state(), StateId::Terminal);
    }

    #[test]
    fn shutdown_requested_in_idle_skips_startup() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        ctx.shutdown_requested = true;
        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_state(), StateId::ShuttingDown);
        assert!(ctx.pattern_request.is_none());
    }
}
