//! Application core: the control loop and its port boundary.
//!
//! [`service::ControlService`] runs the cycle.  All interaction with
//! sensors, outputs, the network and the clock happens through the
//! **port traits** in [`ports`], so the whole loop runs on the host
//! against mocks.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
