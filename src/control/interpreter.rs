//! Command interpreter: applies the newest fetched directive to the
//! control state.
//!
//! Only `commands[0]` is looked at.  Older directives in the same fetch
//! are dropped, not merged or queued.  A user-issued fan directive is
//! the one place where an actuator is driven outside the decision step:
//! it takes effect immediately and disables auto-fan.

use log::{debug, info};

use crate::app::commands::{CommandTarget, ControlCommand};
use crate::app::ports::ActuatorPort;
use crate::control::state::ControlState;

/// What the newest directive changed, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    IndicatorEnabled(bool),
    AutoFanEnabled(bool),
    ManualFan(bool),
    /// Unknown target, or a fan directive not issued by the user.
    Ignored,
}

/// Apply the newest directive.  Returns `None` when `commands` is empty.
pub fn apply(
    commands: &[ControlCommand],
    state: &mut ControlState,
    hw: &mut impl ActuatorPort,
) -> Option<Applied> {
    let newest = commands.first()?;
    if commands.len() > 1 {
        debug!("{} older directive(s) superseded", commands.len() - 1);
    }

    let applied = match newest.target {
        CommandTarget::Led => {
            state.indicator_enabled = newest.action == "on";
            Applied::IndicatorEnabled(state.indicator_enabled)
        }
        CommandTarget::AutoFan => {
            state.auto_fan_enabled = newest.action == "enable";
            Applied::AutoFanEnabled(state.auto_fan_enabled)
        }
        CommandTarget::Fan if newest.is_from_user() => {
            let on = newest.action == "on";
            state.auto_fan_enabled = false;
            hw.set_fan(on);
            state.fan_on = on;
            info!("Manual fan override: {}", if on { "ON" } else { "OFF" });
            Applied::ManualFan(on)
        }
        CommandTarget::Fan | CommandTarget::Unknown => Applied::Ignored,
    };
    Some(applied)
}
