//! Mock adapters for integration tests.
//!
//! Records every actuator call, report and event so tests can assert on
//! the full history without touching GPIO or the network.

use std::cell::Cell;
use std::collections::VecDeque;
use std::time::Duration;

use airnode::app::commands::{CommandTarget, ControlCommand};
use airnode::app::events::AppEvent;
use airnode::app::ports::{
    ActuatorPort, ClockPort, CommandSource, EventSink, SensorPort, StopSignal, TelemetrySink,
};
use airnode::control::decision::IndicatorLevel;
use airnode::control::state::{Metric, MetricValue};
use airnode::error::{RemoteError, SensorError};
use airnode::sensors::{GasLevel, SensorFrame};

// ── Frame helpers ─────────────────────────────────────────────

pub fn frame(temp: f32, humidity: f32, pm25: u16, gas: GasLevel) -> SensorFrame {
    SensorFrame {
        temperature: Ok(temp),
        humidity: Ok(humidity),
        pm25: Ok(pm25),
        gas: Ok(gas),
    }
}

pub fn dead_frame() -> SensorFrame {
    SensorFrame {
        temperature: Err(SensorError::Timeout),
        humidity: Err(SensorError::Timeout),
        pm25: Err(SensorError::ShortRead),
        gas: Ok(GasLevel::Clean),
    }
}

pub fn cmd(target: CommandTarget, action: &str, source: Option<&str>) -> ControlCommand {
    ControlCommand::new(target, action, source)
}

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    SetFan(bool),
    SetIndicator(IndicatorLevel),
    AllOff,
    Release,
}

// ── MockHardware ──────────────────────────────────────────────

/// Serves scripted frames in order, then repeats the last one.
pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    frames: VecDeque<SensorFrame>,
    last_frame: SensorFrame,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(frames: impl IntoIterator<Item = SensorFrame>) -> Self {
        Self {
            calls: Vec::new(),
            frames: frames.into_iter().collect(),
            last_frame: SensorFrame::default(),
        }
    }

    pub fn fan_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetFan(on) => Some(*on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn indicator(&self) -> IndicatorLevel {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetIndicator(level) => Some(*level),
                ActuatorCall::AllOff => Some(IndicatorLevel::Off),
                _ => None,
            })
            .unwrap_or(IndicatorLevel::Off)
    }

    pub fn fan_calls(&self) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::SetFan(on) => Some(*on),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: &ActuatorCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

impl SensorPort for MockHardware {
    fn read_frame(&mut self) -> SensorFrame {
        if let Some(next) = self.frames.pop_front() {
            self.last_frame = next;
        }
        self.last_frame
    }
}

impl ActuatorPort for MockHardware {
    fn set_fan(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetFan(on));
    }

    fn set_indicator(&mut self, level: IndicatorLevel) {
        self.calls.push(ActuatorCall::SetIndicator(level));
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }

    fn release(&mut self) {
        self.calls.push(ActuatorCall::Release);
    }
}

// ── MockRemote ────────────────────────────────────────────────

/// Scripted command source plus recording collector.
///
/// `fetches` are served in order; once exhausted every fetch returns an
/// empty list.  `report_failures` is consumed one entry per report call;
/// `None` (or an exhausted queue) means the collector accepts.
#[derive(Default)]
pub struct MockRemote {
    pub fetches: VecDeque<Result<Vec<ControlCommand>, RemoteError>>,
    pub report_failures: VecDeque<Option<RemoteError>>,
    pub fetch_count: usize,
    pub attempted: Vec<(Metric, MetricValue)>,
    pub accepted: Vec<(Metric, MetricValue)>,
}

#[allow(dead_code)]
impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fetches(
        fetches: impl IntoIterator<Item = Result<Vec<ControlCommand>, RemoteError>>,
    ) -> Self {
        Self {
            fetches: fetches.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn accepted_for(&self, metric: Metric) -> Vec<MetricValue> {
        self.accepted
            .iter()
            .filter(|(m, _)| *m == metric)
            .map(|(_, v)| *v)
            .collect()
    }
}

impl CommandSource for MockRemote {
    fn fetch_latest(&mut self) -> Result<Vec<ControlCommand>, RemoteError> {
        self.fetch_count += 1;
        self.fetches.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

impl TelemetrySink for MockRemote {
    fn report(&mut self, metric: Metric, value: MetricValue) -> Result<(), RemoteError> {
        self.attempted.push((metric, value));
        match self.report_failures.pop_front().flatten() {
            Some(e) => Err(e),
            None => {
                self.accepted.push((metric, value));
                Ok(())
            }
        }
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── FakeClock ─────────────────────────────────────────────────

/// Advances instantly; records every requested delay.
#[derive(Default)]
pub struct FakeClock {
    pub now_ms: u64,
    pub delays: Vec<Duration>,
}

impl ClockPort for FakeClock {
    fn delay(&mut self, period: Duration) {
        self.now_ms += period.as_millis() as u64;
        self.delays.push(period);
    }

    fn uptime_ms(&self) -> u64 {
        self.now_ms
    }
}

// ── StopAfter ─────────────────────────────────────────────────

/// Raises the stop request once it has been polled `cycles` times.
pub struct StopAfter {
    remaining: Cell<u32>,
}

impl StopAfter {
    pub fn cycles(cycles: u32) -> Self {
        Self {
            remaining: Cell::new(cycles),
        }
    }
}

impl StopSignal for StopAfter {
    fn stop_requested(&self) -> bool {
        let left = self.remaining.get();
        if left == 0 {
            return true;
        }
        self.remaining.set(left - 1);
        false
    }
}
