//! Application service: the hexagonal core.
//!
//! [`ControlService`] owns the cycle FSM and its context (which in turn
//! owns the [`ControlState`](crate::control::state::ControlState)).  Each
//! [`step`](ControlService::step) performs the I/O for the current phase
//! through the port traits, then ticks the FSM to the next phase.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//! CommandSource ─▶│      ControlService      │
//!                 │  FSM · Interpreter ·     │ ──▶ TelemetrySink
//! ActuatorPort ◀──│  Decision                │ ◀── ClockPort / StopSignal
//!                 └──────────────────────────┘
//! ```

use core::time::Duration;

use log::{info, warn};

use crate::config::NodeConfig;
use crate::control::interpreter;
use crate::control::state::Metric;
use crate::fsm::context::CycleContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, LoopState};

use super::events::{AppEvent, CycleSummary};
use super::ports::{
    ActuatorPort, ClockPort, CommandSource, EventSink, SensorPort, StopSignal, TelemetrySink,
};

pub struct ControlService {
    fsm: Fsm,
    ctx: CycleContext,
    cycle_interval: Duration,
    cycle_interval_ms: u32,
}

impl ControlService {
    /// Construct the service.  Does **not** start the FSM; call
    /// [`start`](Self::start) or [`run`](Self::run).
    pub fn new(config: &NodeConfig) -> Self {
        Self {
            fsm: Fsm::new(build_state_table(), LoopState::Idle),
            ctx: CycleContext::new(config.thresholds),
            cycle_interval: Duration::from_millis(u64::from(config.cycle_interval_ms)),
            cycle_interval_ms: config.cycle_interval_ms,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started {
            cycle_interval_ms: self.cycle_interval_ms,
        });
    }

    /// Run cycles until the stop signal is observed at a cycle boundary.
    /// Outputs are off and device handles released on return.
    pub fn run(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        remote: &mut (impl CommandSource + TelemetrySink),
        sink: &mut impl EventSink,
        clock: &mut impl ClockPort,
        stop: &impl StopSignal,
    ) {
        self.start(sink);
        while self.step(hw, remote, sink, clock, stop) != LoopState::Shutdown {}
    }

    // ── Per-phase orchestration ───────────────────────────────

    /// Do the I/O for the current phase, then advance the FSM.  Returns
    /// the phase the FSM moved to.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`], and `remote` both [`CommandSource`] and
    /// [`TelemetrySink`], to avoid double mutable borrows of one adapter.
    pub fn step(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        remote: &mut (impl CommandSource + TelemetrySink),
        sink: &mut impl EventSink,
        clock: &mut impl ClockPort,
        stop: &impl StopSignal,
    ) -> LoopState {
        let phase = self.fsm.current_state();
        match phase {
            LoopState::Idle => self.ctx.stop_requested = stop.stop_requested(),
            LoopState::FetchCommands => self.fetch_and_apply(hw, remote, sink),
            LoopState::ReadSensors => self.ctx.frame = hw.read_frame(),
            LoopState::Report => self.report_changes(remote, sink),
            // Targets were computed on entry.
            LoopState::Decide => {}
            LoopState::Actuate => self.actuate(hw, sink),
            LoopState::Sleep => {
                self.emit_summary(clock, sink);
                clock.delay(self.cycle_interval);
            }
            LoopState::Shutdown => return phase,
        }

        self.fsm.tick(&mut self.ctx);

        let next = self.fsm.current_state();
        if next == LoopState::Shutdown {
            hw.all_off();
            hw.release();
            sink.emit(&AppEvent::Stopped {
                cycles: self.ctx.cycle,
            });
        }
        next
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn phase(&self) -> LoopState {
        self.fsm.current_state()
    }

    pub fn context(&self) -> &CycleContext {
        &self.ctx
    }

    // ── Internal ──────────────────────────────────────────────

    fn fetch_and_apply(
        &mut self,
        hw: &mut impl ActuatorPort,
        remote: &mut impl CommandSource,
        sink: &mut impl EventSink,
    ) {
        self.ctx.commands = match remote.fetch_latest() {
            Ok(commands) => commands,
            Err(e) => {
                warn!("command fetch failed: {e}");
                sink.emit(&AppEvent::CommandFetchFailed(e));
                Vec::new()
            }
        };

        if let Some(applied) = interpreter::apply(&self.ctx.commands, &mut self.ctx.state, hw) {
            sink.emit(&AppEvent::CommandApplied(applied));
        }
    }

    /// One call per metric whose fresh value differs from the last
    /// acknowledged one.  The ledger only moves on success.
    fn report_changes(&mut self, remote: &mut impl TelemetrySink, sink: &mut impl EventSink) {
        for metric in Metric::ALL {
            let Some(value) = self.ctx.frame.metric(metric) else {
                continue;
            };
            if !self.ctx.state.needs_report(metric, value) {
                continue;
            }
            match remote.report(metric, value) {
                Ok(()) => {
                    self.ctx.state.mark_sent(metric, value);
                    sink.emit(&AppEvent::TelemetrySent { metric, value });
                }
                Err(error) => {
                    warn!("report {metric}={value} failed: {error}");
                    sink.emit(&AppEvent::TelemetryFailed {
                        metric,
                        value,
                        error,
                    });
                }
            }
        }
    }

    fn actuate(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        let decision = self.ctx.decision;

        if self.ctx.state.auto_fan_enabled {
            hw.set_fan(decision.fan_on);
            if decision.fan_on != self.ctx.state.fan_on {
                info!("Auto fan: {}", if decision.fan_on { "ON" } else { "OFF" });
                sink.emit(&AppEvent::FanChanged {
                    on: decision.fan_on,
                });
            }
            self.ctx.state.fan_on = decision.fan_on;
        }

        hw.set_indicator(decision.indicator);
        if decision.indicator != self.ctx.indicator {
            sink.emit(&AppEvent::IndicatorChanged {
                from: self.ctx.indicator,
                to: decision.indicator,
            });
            self.ctx.indicator = decision.indicator;
        }
    }

    fn emit_summary(&self, clock: &impl ClockPort, sink: &mut impl EventSink) {
        let state = &self.ctx.state;
        sink.emit(&AppEvent::CycleSummary(CycleSummary {
            cycle: self.ctx.cycle,
            uptime_ms: clock.uptime_ms(),
            frame: self.ctx.frame,
            auto_fan_enabled: state.auto_fan_enabled,
            indicator_enabled: state.indicator_enabled,
            fan_on: state.fan_on,
            indicator: self.ctx.indicator,
        }));
    }
}
