//! Function-pointer finite state machine driving the control cycle.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  StateTable                                                 │
//! │  ┌───────────────┬──────────┬─────────┬───────────────────┐ │
//! │  │ LoopState     │ on_enter │ on_exit │ on_update         │ │
//! │  ├───────────────┼──────────┼─────────┼───────────────────┤ │
//! │  │ Idle          │ fn(ctx)  │    -    │ fn(ctx)->Option<> │ │
//! │  │ FetchCommands │ fn(ctx)  │    -    │ fn(ctx)->Option<> │ │
//! │  │ ...           │          │         │                   │ │
//! │  │ Shutdown      │ fn(ctx)  │    -    │ fn(ctx)->Option<> │ │
//! │  └───────────────┴──────────┴─────────┴───────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers are pure: they only read and write the [`CycleContext`]
//! blackboard.  The I/O for each phase (fetching, sampling, reporting,
//! driving outputs, sleeping) is done by
//! [`ControlService`](crate::app::service::ControlService) before it
//! ticks the machine.

pub mod context;
pub mod states;

use context::CycleContext;
use log::{debug, info};

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Phases of one control cycle, plus the terminal `Shutdown`.
/// Must stay in sync with [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LoopState {
    Idle = 0,
    FetchCommands = 1,
    ReadSensors = 2,
    Report = 3,
    Decide = 4,
    Actuate = 5,
    Sleep = 6,
    Shutdown = 7,
}

impl LoopState {
    pub const COUNT: usize = 8;

    /// Convert a table index back to `LoopState`.  Out-of-range indices
    /// map to `Shutdown` (debug builds assert).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::FetchCommands,
            2 => Self::ReadSensors,
            3 => Self::Report,
            4 => Self::Decide,
            5 => Self::Actuate,
            6 => Self::Sleep,
            7 => Self::Shutdown,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Shutdown
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// `on_enter` / `on_exit` action, run once per transition.
pub type StateActionFn = fn(&mut CycleContext);

/// Per-tick handler.  `Some(next)` triggers a transition.
pub type StateUpdateFn = fn(&mut CycleContext) -> Option<LoopState>;

/// One row of the state table.
pub struct StateDescriptor {
    pub id: LoopState,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

pub struct Fsm {
    /// Indexed by `LoopState as usize`.
    table: [StateDescriptor; LoopState::COUNT],
    current: usize,
}

impl Fsm {
    pub fn new(table: [StateDescriptor; LoopState::COUNT], initial: LoopState) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter`.  Call once before the first `tick()`.
    pub fn start(&mut self, ctx: &mut CycleContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Call `on_update` for the current state and follow the transition
    /// it returns, if any.
    pub fn tick(&mut self, ctx: &mut CycleContext) {
        if let Some(next) = (self.table[self.current].on_update)(ctx) {
            self.transition(next, ctx);
        }
    }

    pub fn current_state(&self) -> LoopState {
        LoopState::from_index(self.current)
    }

    fn transition(&mut self, next: LoopState, ctx: &mut CycleContext) {
        let next_idx = next as usize;
        debug!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }
        self.current = next_idx;
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
