//! Concrete state handler functions and table builder.
//!
//! ```text
//!  IDLE ──▶ FETCH_COMMANDS ──▶ READ_SENSORS ──▶ REPORT
//!   ▲  │                                          │
//!   │  └─[stop]──▶ SHUTDOWN                       ▼
//!  SLEEP ◀──────── ACTUATE ◀──────────────── DECIDE
//! ```
//!
//! Every phase except `Idle` advances unconditionally: a failure inside a
//! phase is absorbed by the service and never aborts the cycle.

use log::info;

use super::context::CycleContext;
use super::{LoopState, StateDescriptor};
use crate::control::decision;

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; LoopState::COUNT] {
    [
        StateDescriptor {
            id: LoopState::Idle,
            name: "Idle",
            on_enter: None,
            on_exit: None,
            on_update: idle_update,
        },
        StateDescriptor {
            id: LoopState::FetchCommands,
            name: "FetchCommands",
            on_enter: Some(fetch_enter),
            on_exit: None,
            on_update: |_| Some(LoopState::ReadSensors),
        },
        StateDescriptor {
            id: LoopState::ReadSensors,
            name: "ReadSensors",
            on_enter: None,
            on_exit: None,
            on_update: |_| Some(LoopState::Report),
        },
        StateDescriptor {
            id: LoopState::Report,
            name: "Report",
            on_enter: None,
            on_exit: None,
            on_update: |_| Some(LoopState::Decide),
        },
        StateDescriptor {
            id: LoopState::Decide,
            name: "Decide",
            on_enter: Some(decide_enter),
            on_exit: None,
            on_update: |_| Some(LoopState::Actuate),
        },
        StateDescriptor {
            id: LoopState::Actuate,
            name: "Actuate",
            on_enter: None,
            on_exit: None,
            on_update: |_| Some(LoopState::Sleep),
        },
        StateDescriptor {
            id: LoopState::Sleep,
            name: "Sleep",
            on_enter: None,
            on_exit: None,
            on_update: |_| Some(LoopState::Idle),
        },
        StateDescriptor {
            id: LoopState::Shutdown,
            name: "Shutdown",
            on_enter: Some(shutdown_enter),
            on_exit: None,
            on_update: |_| None,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE: cycle boundary, the only place the stop signal is honoured
// ═══════════════════════════════════════════════════════════════════════════

fn idle_update(ctx: &mut CycleContext) -> Option<LoopState> {
    if ctx.stop_requested {
        Some(LoopState::Shutdown)
    } else {
        Some(LoopState::FetchCommands)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  FETCH_COMMANDS: first phase of a new cycle
// ═══════════════════════════════════════════════════════════════════════════

fn fetch_enter(ctx: &mut CycleContext) {
    ctx.begin_cycle();
}

// ═══════════════════════════════════════════════════════════════════════════
//  DECIDE
// ═══════════════════════════════════════════════════════════════════════════

fn decide_enter(ctx: &mut CycleContext) {
    ctx.decision = decision::decide(&ctx.frame, &ctx.state, &ctx.thresholds);
}

// ═══════════════════════════════════════════════════════════════════════════
//  SHUTDOWN: terminal
// ═══════════════════════════════════════════════════════════════════════════

fn shutdown_enter(ctx: &mut CycleContext) {
    info!("SHUTDOWN: stop requested after {} cycle(s)", ctx.cycle);
}
