//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, remote endpoints, event sinks,
//! clock) implement these traits.  The
//! [`ControlService`](super::service::ControlService) consumes them via
//! generics, so the control core never touches hardware or sockets
//! directly.
//!
//! Every fallible port returns a typed `Result`; none of them panic.

use core::time::Duration;

use crate::app::commands::ControlCommand;
use crate::control::decision::IndicatorLevel;
use crate::control::state::{Metric, MetricValue};
use crate::error::RemoteError;
use crate::sensors::SensorFrame;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per cycle.
pub trait SensorPort {
    /// Sample every sensor.  Never fails as a whole; each field of the
    /// frame carries its own fault.
    fn read_frame(&mut self) -> SensorFrame;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to drive the outputs.
pub trait ActuatorPort {
    /// Switch the fan.  Idempotent.
    fn set_fan(&mut self, on: bool);

    /// Light exactly one indicator level, or none for
    /// [`IndicatorLevel::Off`].
    fn set_indicator(&mut self, level: IndicatorLevel);

    /// Fan off, indicator off: safe shutdown.
    fn all_off(&mut self);

    /// Hand device handles back to the platform.  Called once, after
    /// [`all_off`](Self::all_off), when the loop exits.
    fn release(&mut self) {}
}

// ───────────────────────────────────────────────────────────────
// Remote ports (driven adapters: domain ↔ network)
// ───────────────────────────────────────────────────────────────

/// Source of operator directives.
pub trait CommandSource {
    /// Fetch pending directives, newest first.  `Ok(vec![])` means there
    /// is nothing new.  Sources may drop everything but the newest.
    fn fetch_latest(&mut self) -> Result<Vec<ControlCommand>, RemoteError>;
}

/// Collector that receives changed sensor values.
pub trait TelemetrySink {
    /// Report one observation.  `Ok(())` only when the collector
    /// acknowledged it.
    fn report(&mut self, metric: Metric, value: MetricValue) -> Result<(), RemoteError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock / cancellation
// ───────────────────────────────────────────────────────────────

/// Blocking delay and a monotonic uptime reading.
pub trait ClockPort {
    /// Block the calling task for `period`.
    fn delay(&mut self, period: Duration);

    /// Milliseconds since boot.
    fn uptime_ms(&self) -> u64;
}

/// External cancellation request, polled at cycle boundaries only.
pub trait StopSignal {
    fn stop_requested(&self) -> bool;
}
