//! Shared mutable context threaded through every FSM handler.
//!
//! `CycleContext` is the blackboard for one control cycle: the directives
//! fetched this cycle, the sensor frame sampled this cycle, the targets the
//! decision step computed from them, plus the long-lived [`ControlState`]
//! and thresholds.  The service fills in inputs; handlers derive outputs.

use crate::app::commands::ControlCommand;
use crate::config::Thresholds;
use crate::control::decision::{Decision, IndicatorLevel};
use crate::control::state::ControlState;
use crate::sensors::SensorFrame;

pub struct CycleContext {
    // -- Timing --
    /// Cycles started since boot (1-based once the first cycle begins).
    pub cycle: u64,

    // -- Cancellation --
    /// Latched from the stop signal at the top of each cycle.
    pub stop_requested: bool,

    // -- Inputs (written by the service) --
    /// Directives fetched this cycle, newest first.
    pub commands: Vec<ControlCommand>,
    /// Sensor frame sampled this cycle.
    pub frame: SensorFrame,

    // -- Outputs (written by handlers) --
    /// Targets computed on entering `Decide`.
    pub decision: Decision,
    /// Level the indicator was last driven to.
    pub indicator: IndicatorLevel,

    // -- Long-lived --
    pub state: ControlState,
    pub thresholds: Thresholds,
}

impl CycleContext {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            cycle: 0,
            stop_requested: false,
            commands: Vec::new(),
            frame: SensorFrame::default(),
            decision: Decision {
                fan_on: false,
                indicator: IndicatorLevel::Off,
            },
            indicator: IndicatorLevel::Off,
            state: ControlState::new(),
            thresholds,
        }
    }

    /// Drop everything gathered by the previous cycle.
    pub fn begin_cycle(&mut self) {
        self.cycle += 1;
        self.commands.clear();
        self.frame = SensorFrame::default();
    }
}
