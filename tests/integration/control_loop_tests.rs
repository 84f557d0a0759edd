//! ControlService integration tests.
//!
//! Whole cycles are driven through `run` against the mock adapters; the
//! stop signal is raised after a fixed number of cycle boundaries.

use std::time::Duration;

use airnode::app::commands::CommandTarget;
use airnode::app::events::AppEvent;
use airnode::app::service::ControlService;
use airnode::config::NodeConfig;
use airnode::control::decision::IndicatorLevel;
use airnode::control::interpreter::Applied;
use airnode::control::state::{Metric, MetricValue};
use airnode::error::{RemoteError, SensorError};
use airnode::fsm::LoopState;
use airnode::sensors::{GasLevel, SensorFrame};

use crate::mock_hw::{
    ActuatorCall, FakeClock, MockHardware, MockRemote, RecordingSink, StopAfter, cmd, dead_frame,
    frame,
};

struct Run {
    svc: ControlService,
    hw: MockHardware,
    remote: MockRemote,
    sink: RecordingSink,
    clock: FakeClock,
}

fn run_cycles(cycles: u32, hw: MockHardware, remote: MockRemote) -> Run {
    let mut run = Run {
        svc: ControlService::new(&NodeConfig::default()),
        hw,
        remote,
        sink: RecordingSink::new(),
        clock: FakeClock::default(),
    };
    run.svc.run(
        &mut run.hw,
        &mut run.remote,
        &mut run.sink,
        &mut run.clock,
        &StopAfter::cycles(cycles),
    );
    run
}

// ── Decision scenarios ────────────────────────────────────────

#[test]
fn hot_clean_air_runs_fan_and_shows_good() {
    let hw = MockHardware::new([frame(31.0, 40.0, 20, GasLevel::Clean)]);
    let r = run_cycles(1, hw, MockRemote::new());

    assert!(r.hw.fan_calls().contains(&true));
    assert!(r.hw.calls.contains(&ActuatorCall::SetIndicator(IndicatorLevel::Good)));
    assert!(r.sink.events.contains(&AppEvent::FanChanged { on: true }));
    assert_eq!(
        r.remote.accepted,
        vec![
            (Metric::Temperature, MetricValue::Float(31.0)),
            (Metric::Humidity, MetricValue::Float(40.0)),
            (Metric::Pm25, MetricValue::Count(20)),
        ]
    );
}

#[test]
fn dust_alone_triggers_fan_and_bad_level() {
    let dusty = SensorFrame {
        temperature: Err(SensorError::Timeout),
        humidity: Err(SensorError::Timeout),
        pm25: Ok(80),
        gas: Ok(GasLevel::Polluted),
    };
    let r = run_cycles(1, MockHardware::new([dusty]), MockRemote::new());

    assert!(r.hw.fan_calls().contains(&true));
    assert!(r.hw.calls.contains(&ActuatorCall::SetIndicator(IndicatorLevel::Bad)));
    assert_eq!(r.remote.attempted, vec![(Metric::Pm25, MetricValue::Count(80))]);
}

#[test]
fn missing_pm25_forces_indicator_off() {
    let r = run_cycles(1, MockHardware::new([dead_frame()]), MockRemote::new());

    assert!(r.hw.calls.contains(&ActuatorCall::SetIndicator(IndicatorLevel::Off)));
    assert!(!r.hw.calls.contains(&ActuatorCall::SetIndicator(IndicatorLevel::Good)));
    assert!(r.remote.attempted.is_empty());
    // Off -> Off is not a change.
    assert_eq!(
        r.sink.count(|e| matches!(e, AppEvent::IndicatorChanged { .. })),
        0
    );
}

#[test]
fn cool_clean_air_keeps_fan_off() {
    let hw = MockHardware::new([frame(22.0, 45.0, 10, GasLevel::Clean)]);
    let r = run_cycles(2, hw, MockRemote::new());

    assert_eq!(r.hw.fan_calls(), vec![false, false]);
    assert_eq!(r.sink.count(|e| matches!(e, AppEvent::FanChanged { .. })), 0);
}

// ── Directives ────────────────────────────────────────────────

#[test]
fn user_fan_off_overrides_auto_control() {
    let hw = MockHardware::new([frame(35.0, 40.0, 90, GasLevel::Polluted)]);
    let remote =
        MockRemote::with_fetches([Ok(vec![cmd(CommandTarget::Fan, "off", Some("user"))])]);
    let r = run_cycles(3, hw, remote);

    // Driven once by the directive, never again by auto control.
    assert_eq!(r.hw.fan_calls(), vec![false]);
    let state = &r.svc.context().state;
    assert!(!state.auto_fan_enabled);
    assert!(!state.fan_on);
    assert!(r.sink.events.contains(&AppEvent::CommandApplied(Applied::ManualFan(false))));
}

#[test]
fn fan_directive_from_scheduler_is_ignored() {
    let hw = MockHardware::new([frame(22.0, 40.0, 10, GasLevel::Clean)]);
    let remote =
        MockRemote::with_fetches([Ok(vec![cmd(CommandTarget::Fan, "on", Some("scheduler"))])]);
    let r = run_cycles(1, hw, remote);

    assert!(r.svc.context().state.auto_fan_enabled);
    assert_eq!(r.hw.fan_calls(), vec![false]);
    assert!(r.sink.events.contains(&AppEvent::CommandApplied(Applied::Ignored)));
}

#[test]
fn re_enabling_auto_fan_hands_control_back() {
    let hw = MockHardware::new([frame(22.0, 40.0, 10, GasLevel::Clean)]);
    let remote = MockRemote::with_fetches([
        Ok(vec![cmd(CommandTarget::Fan, "on", Some("user"))]),
        Ok(vec![cmd(CommandTarget::AutoFan, "enable", None)]),
    ]);
    let r = run_cycles(2, hw, remote);

    // Manual on in cycle 1, auto off in cycle 2.
    assert_eq!(r.hw.fan_calls(), vec![true, false]);
    assert!(r.svc.context().state.auto_fan_enabled);
    assert!(!r.svc.context().state.fan_on);
    assert!(r.sink.events.contains(&AppEvent::FanChanged { on: false }));
}

#[test]
fn only_newest_directive_is_applied() {
    let hw = MockHardware::new([frame(22.0, 40.0, 10, GasLevel::Clean)]);
    let remote = MockRemote::with_fetches([Ok(vec![
        cmd(CommandTarget::AutoFan, "disable", None),
        cmd(CommandTarget::Led, "off", None),
    ])]);
    let r = run_cycles(1, hw, remote);

    let state = &r.svc.context().state;
    assert!(!state.auto_fan_enabled);
    assert!(state.indicator_enabled);
    assert!(r.hw.fan_calls().is_empty());
}

#[test]
fn led_off_blanks_indicator_until_turned_back_on() {
    let hw = MockHardware::new([frame(22.0, 40.0, 10, GasLevel::Clean)]);
    let remote = MockRemote::with_fetches([
        Ok(vec![cmd(CommandTarget::Led, "off", None)]),
        Ok(Vec::new()),
        Ok(vec![cmd(CommandTarget::Led, "on", None)]),
    ]);
    let r = run_cycles(3, hw, remote);

    let levels: Vec<IndicatorLevel> = r
        .hw
        .calls
        .iter()
        .filter_map(|c| match c {
            ActuatorCall::SetIndicator(l) => Some(*l),
            _ => None,
        })
        .collect();
    assert_eq!(
        levels,
        vec![IndicatorLevel::Off, IndicatorLevel::Off, IndicatorLevel::Good]
    );
}

#[test]
fn fetch_failure_is_treated_as_no_directive() {
    let hw = MockHardware::new([frame(22.0, 40.0, 10, GasLevel::Clean)]);
    let remote = MockRemote::with_fetches([Err(RemoteError::Timeout)]);
    let r = run_cycles(2, hw, remote);

    assert_eq!(r.remote.fetch_count, 2);
    assert!(r
        .sink
        .events
        .contains(&AppEvent::CommandFetchFailed(RemoteError::Timeout)));
    assert_eq!(r.sink.count(|e| matches!(e, AppEvent::CommandApplied(_))), 0);
    assert!(r.svc.context().state.auto_fan_enabled);
    // The rest of the cycle still ran.
    assert_eq!(r.remote.accepted.len(), 3);
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn unchanged_values_are_reported_once() {
    let hw = MockHardware::new([frame(24.0, 50.0, 12, GasLevel::Clean)]);
    let r = run_cycles(4, hw, MockRemote::new());

    assert_eq!(r.remote.attempted.len(), 3);
}

#[test]
fn only_changed_metric_is_reported_again() {
    let hw = MockHardware::new([
        frame(24.0, 50.0, 12, GasLevel::Clean),
        frame(24.5, 50.0, 12, GasLevel::Clean),
    ]);
    let r = run_cycles(3, hw, MockRemote::new());

    assert_eq!(
        r.remote.accepted_for(Metric::Temperature),
        vec![MetricValue::Float(24.0), MetricValue::Float(24.5)]
    );
    assert_eq!(r.remote.accepted_for(Metric::Humidity).len(), 1);
    assert_eq!(r.remote.accepted_for(Metric::Pm25).len(), 1);
}

#[test]
fn failed_report_is_retried_next_cycle() {
    let hw = MockHardware::new([frame(24.0, 50.0, 12, GasLevel::Clean)]);
    let mut remote = MockRemote::new();
    remote.report_failures.push_back(Some(RemoteError::Status(500)));
    let r = run_cycles(2, hw, remote);

    assert_eq!(
        r.remote
            .attempted
            .iter()
            .filter(|(m, _)| *m == Metric::Temperature)
            .count(),
        2
    );
    assert_eq!(r.remote.accepted_for(Metric::Temperature).len(), 1);
    assert_eq!(
        r.svc.context().state.last_sent(Metric::Temperature),
        Some(MetricValue::Float(24.0))
    );
    assert_eq!(
        r.sink.count(|e| matches!(e, AppEvent::TelemetryFailed { .. })),
        1
    );
}

#[test]
fn readings_that_drop_out_keep_the_last_acknowledged_value() {
    let hw = MockHardware::new([frame(24.0, 50.0, 12, GasLevel::Clean), dead_frame()]);
    let r = run_cycles(2, hw, MockRemote::new());

    assert_eq!(r.remote.attempted.len(), 3);
    assert_eq!(
        r.svc.context().state.last_sent(Metric::Pm25),
        Some(MetricValue::Count(12))
    );
}

// ── Lifecycle ─────────────────────────────────────────────────

#[test]
fn every_cycle_sleeps_the_configured_interval() {
    let hw = MockHardware::new([frame(22.0, 40.0, 10, GasLevel::Clean)]);
    let r = run_cycles(3, hw, MockRemote::new());

    assert_eq!(r.clock.delays, vec![Duration::from_millis(5_000); 3]);
    assert_eq!(r.sink.count(|e| matches!(e, AppEvent::CycleSummary(_))), 3);
}

#[test]
fn shutdown_turns_outputs_off_and_releases_once() {
    let hw = MockHardware::new([frame(35.0, 40.0, 90, GasLevel::Polluted)]);
    let r = run_cycles(2, hw, MockRemote::new());

    let tail = &r.hw.calls[r.hw.calls.len() - 2..];
    assert_eq!(tail, [ActuatorCall::AllOff, ActuatorCall::Release]);
    assert_eq!(r.hw.count(&ActuatorCall::AllOff), 1);
    assert_eq!(r.hw.count(&ActuatorCall::Release), 1);
    assert!(!r.hw.fan_on());
    assert_eq!(r.hw.indicator(), IndicatorLevel::Off);
    assert_eq!(r.svc.phase(), LoopState::Shutdown);
    assert_eq!(r.sink.events.last(), Some(&AppEvent::Stopped { cycles: 2 }));
}

#[test]
fn stop_before_first_cycle_skips_all_io() {
    let hw = MockHardware::new([frame(35.0, 40.0, 90, GasLevel::Polluted)]);
    let r = run_cycles(0, hw, MockRemote::new());

    assert_eq!(r.remote.fetch_count, 0);
    assert!(r.remote.attempted.is_empty());
    assert!(r.clock.delays.is_empty());
    assert_eq!(r.hw.calls, vec![ActuatorCall::AllOff, ActuatorCall::Release]);
    assert_eq!(
        r.sink.events,
        vec![
            AppEvent::Started {
                cycle_interval_ms: 5_000
            },
            AppEvent::Stopped { cycles: 0 },
        ]
    );
}
