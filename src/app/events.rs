//! Outbound application events.
//!
//! The [`ControlService`](super::service::ControlService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them; the stock one writes a
//! tagged log line per event.

use crate::control::decision::IndicatorLevel;
use crate::control::interpreter::Applied;
use crate::control::state::{Metric, MetricValue};
use crate::error::RemoteError;
use crate::sensors::SensorFrame;

/// Structured events emitted by the control loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The loop is about to run its first cycle.
    Started { cycle_interval_ms: u32 },

    /// The newest fetched directive was interpreted.
    CommandApplied(Applied),

    /// The command source could not be read; treated as "no directive".
    CommandFetchFailed(RemoteError),

    /// The collector acknowledged a changed value.
    TelemetrySent { metric: Metric, value: MetricValue },

    /// A report failed; the same delta is retried next cycle.
    TelemetryFailed {
        metric: Metric,
        value: MetricValue,
        error: RemoteError,
    },

    /// Automatic control switched the fan.
    FanChanged { on: bool },

    /// The indicator moved to a different level.
    IndicatorChanged {
        from: IndicatorLevel,
        to: IndicatorLevel,
    },

    /// End-of-cycle status line.
    CycleSummary(CycleSummary),

    /// The loop left through `Shutdown`; outputs are off.
    Stopped { cycles: u64 },
}

/// Snapshot of one finished cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleSummary {
    pub cycle: u64,
    pub uptime_ms: u64,
    pub frame: SensorFrame,
    pub auto_fan_enabled: bool,
    pub indicator_enabled: bool,
    pub fan_on: bool,
    pub indicator: IndicatorLevel,
}
