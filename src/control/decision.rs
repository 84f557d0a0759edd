//! Decision engine: maps a sensor frame plus the policy toggles to the
//! fan target and indicator level.
//!
//! Pure: no I/O, no mutation.  Outputs pinned by a manual command are
//! honoured by reading them back from [`ControlState`].

use core::fmt;

use crate::config::Thresholds;
use crate::control::state::ControlState;
use crate::sensors::{GasLevel, SensorFrame};

/// Discrete air-quality level shown on the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorLevel {
    Good,
    Moderate,
    Bad,
    Off,
}

impl IndicatorLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Bad => "bad",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for IndicatorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Targets computed for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub fan_on: bool,
    pub indicator: IndicatorLevel,
}

/// Compute both targets.
pub fn decide(frame: &SensorFrame, state: &ControlState, t: &Thresholds) -> Decision {
    let fan_on = if state.auto_fan_enabled {
        auto_fan_target(frame, t)
    } else {
        state.fan_on
    };

    let indicator = if state.indicator_enabled {
        indicator_level(frame, t)
    } else {
        IndicatorLevel::Off
    };

    Decision { fan_on, indicator }
}

/// Fan runs when it is hot or dusty.  Absent readings never trigger it.
pub fn auto_fan_target(frame: &SensorFrame, t: &Thresholds) -> bool {
    let hot = matches!(frame.temperature, Ok(c) if c >= t.fan_temperature_c);
    let dusty = matches!(frame.pm25, Ok(pm) if pm >= t.fan_pm25);
    hot || dusty
}

/// Quantize PM2.5 and the gas signal.  `good` is tested before the wider
/// `moderate` predicate.
pub fn indicator_level(frame: &SensorFrame, t: &Thresholds) -> IndicatorLevel {
    let Ok(pm25) = frame.pm25 else {
        return IndicatorLevel::Off;
    };
    let clean_gas = frame.gas == Ok(GasLevel::Clean);

    if clean_gas && pm25 < t.good_pm25_below {
        IndicatorLevel::Good
    } else if clean_gas || pm25 < t.moderate_pm25_below {
        IndicatorLevel::Moderate
    } else {
        IndicatorLevel::Bad
    }
}
