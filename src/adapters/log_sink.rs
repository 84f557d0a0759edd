//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing one tagged line per application
//! event to the `log` facade (serial / USB-CDC in production).

use log::{info, warn};

use crate::app::events::{AppEvent, CycleSummary};
use crate::app::ports::EventSink;
use crate::control::interpreter::Applied;
use crate::sensors::Reading;

pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

fn on_off(v: bool) -> &'static str {
    if v { "ON" } else { "OFF" }
}

/// `-` for an absent reading.
fn show<T: core::fmt::Display>(r: &Reading<T>) -> String {
    match r {
        Ok(v) => v.to_string(),
        Err(_) => "-".into(),
    }
}

fn summary_line(s: &CycleSummary) -> String {
    format!(
        "#{} up={}s | T={}\u{00b0}C H={}% PM2.5={} gas={} | auto_fan={} led={} | fan={} level={}",
        s.cycle,
        s.uptime_ms / 1000,
        show(&s.frame.temperature),
        show(&s.frame.humidity),
        show(&s.frame.pm25),
        show(&s.frame.gas.map(|g| g.as_digital())),
        on_off(s.auto_fan_enabled),
        on_off(s.indicator_enabled),
        on_off(s.fan_on),
        s.indicator,
    )
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { cycle_interval_ms } => {
                info!("START | cycle every {} ms", cycle_interval_ms);
            }
            AppEvent::CommandApplied(applied) => match applied {
                Applied::IndicatorEnabled(on) => info!("CMD | led -> {}", on_off(*on)),
                Applied::AutoFanEnabled(on) => info!("CMD | autoFan -> {}", on_off(*on)),
                Applied::ManualFan(on) => info!("CMD | fan -> {} (manual)", on_off(*on)),
                Applied::Ignored => info!("CMD | ignored"),
            },
            AppEvent::CommandFetchFailed(e) => {
                warn!("CMD | fetch failed: {}", e);
            }
            AppEvent::TelemetrySent { metric, value } => {
                info!("TELEM | {}={} sent", metric, value);
            }
            AppEvent::TelemetryFailed {
                metric,
                value,
                error,
            } => {
                warn!("TELEM | {}={} failed: {}", metric, value, error);
            }
            AppEvent::FanChanged { on } => {
                info!("FAN | {}", on_off(*on));
            }
            AppEvent::IndicatorChanged { from, to } => {
                info!("LED | {} -> {}", from, to);
            }
            AppEvent::CycleSummary(s) => {
                info!("CYCLE | {}", summary_line(s));
            }
            AppEvent::Stopped { cycles } => {
                info!("STOP | outputs off after {} cycle(s)", cycles);
            }
        }
    }
}
