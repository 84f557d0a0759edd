//! Control core: pure policy, no I/O.
//!
//! [`state`] holds the policy toggles and the report ledger,
//! [`interpreter`] applies remote directives to it, and [`decision`]
//! turns a sensor frame into actuator targets.

pub mod decision;
pub mod interpreter;
pub mod state;
