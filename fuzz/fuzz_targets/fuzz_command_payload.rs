//! Fuzz target: `wire::decode_newest`
//!
//! Feeds arbitrary response bodies to the command decoder and then runs
//! the decoded directive through the interpreter against a no-op
//! actuator.  Neither step may panic.
//!
//! cargo fuzz run fuzz_command_payload

#![no_main]

use airnode::app::ports::ActuatorPort;
use airnode::control::decision::IndicatorLevel;
use airnode::control::interpreter;
use airnode::control::state::ControlState;
use airnode::remote::wire::decode_newest;
use libfuzzer_sys::fuzz_target;

struct NullActuator;

impl ActuatorPort for NullActuator {
    fn set_fan(&mut self, _on: bool) {}
    fn set_indicator(&mut self, _level: IndicatorLevel) {}
    fn all_off(&mut self) {}
}

fuzz_target!(|data: &[u8]| {
    let Ok(newest) = decode_newest(data) else {
        return;
    };
    let commands: Vec<_> = newest.into_iter().collect();
    let mut state = ControlState::new();
    let applied = interpreter::apply(&commands, &mut state, &mut NullActuator);
    assert_eq!(applied.is_some(), !commands.is_empty());
});
