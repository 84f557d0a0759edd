//! Control state: the single mutable record that lives for the whole
//! process.
//!
//! Owned by [`ControlService`](crate::app::service::ControlService) and
//! lent out by `&mut` to the command interpreter and the reporting step.
//! Nothing here is global; a restart begins from [`ControlState::default`].

use core::fmt;

use heapless::FnvIndexMap;
use log::warn;

/// A reportable sensor quantity.  The wire name is the collector's
/// `sensorType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Temperature,
    Humidity,
    Pm25,
}

impl Metric {
    /// Reporting order within a cycle.
    pub const ALL: [Metric; 3] = [Metric::Temperature, Metric::Humidity, Metric::Pm25];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Pm25 => "pm25",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sensor value as it is compared and reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    /// Continuous reading (°C, %RH).
    Float(f32),
    /// Particle count (µg/m³).
    Count(u16),
}

impl fmt::Display for MetricValue {
    /// Floats always keep a decimal place (`31.0`, `40.5`) so the
    /// collector can tell them from counts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Count(v) => write!(f, "{v}"),
        }
    }
}

/// Policy toggles plus the change-suppression ledger.
#[derive(Debug, Clone)]
pub struct ControlState {
    /// Fan follows the temperature / PM2.5 thresholds.
    pub auto_fan_enabled: bool,
    /// Indicator shows air quality; when false it is forced off.
    pub indicator_enabled: bool,
    /// Last value the fan output was driven to.
    pub fan_on: bool,
    /// Last value successfully acknowledged by the collector, per metric.
    last_sent: FnvIndexMap<Metric, MetricValue, 4>,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            auto_fan_enabled: true,
            indicator_enabled: true,
            fan_on: false,
            last_sent: FnvIndexMap::new(),
        }
    }
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if `value` has never been acknowledged for `metric`, or
    /// differs from what was.
    pub fn needs_report(&self, metric: Metric, value: MetricValue) -> bool {
        self.last_sent.get(&metric) != Some(&value)
    }

    /// Record a collector acknowledgement.  Call only after a successful
    /// report.
    pub fn mark_sent(&mut self, metric: Metric, value: MetricValue) {
        if self.last_sent.insert(metric, value).is_err() {
            // Capacity covers every Metric variant.
            warn!("last_sent ledger full, dropping {metric}");
        }
    }

    pub fn last_sent(&self, metric: Metric) -> Option<MetricValue> {
        self.last_sent.get(&metric).copied()
    }
}
