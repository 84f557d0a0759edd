//! AirNode firmware entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  HardwareAdapter    RemoteClient<EspHttpTransport>           │
//! │  (Sensor+Actuator)  (CommandSource+TelemetrySink)            │
//! │  LogEventSink       SystemClock        WifiStation           │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │           ControlService (pure logic)              │      │
//! │  │  cycle FSM · interpreter · decision                │      │
//! │  └────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use core::time::Duration;

use anyhow::Result;
use log::{error, info};

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;

use airnode::adapters::esp_http::EspHttpTransport;
use airnode::adapters::hardware::HardwareAdapter;
use airnode::adapters::log_sink::LogEventSink;
use airnode::adapters::time::SystemClock;
use airnode::adapters::wifi::WifiStation;
use airnode::app::service::ControlService;
use airnode::config::NodeConfig;
use airnode::drivers::hw_init;
use airnode::remote::RemoteClient;
use airnode::signal;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  AirNode v{}                         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = NodeConfig::load().inspect_err(|e| error!("config rejected: {e}"))?;
    info!(
        "collector={} commands={} interval={}ms",
        config.collector_url, config.command_url, config.cycle_interval_ms
    );

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals().map_err(|e| startup_failure("peripheral init", e))?;
    hw_init::init_isr_service().map_err(|e| startup_failure("shutdown button", e))?;

    // ── 4. Network ────────────────────────────────────────────
    let peripherals = Peripherals::take().map_err(|e| startup_failure("peripherals", e))?;
    let sys_loop = EspSystemEventLoop::take().map_err(|e| startup_failure("event loop", e))?;
    let nvs = EspDefaultNvsPartition::take().map_err(|e| startup_failure("nvs partition", e))?;
    let _wifi = WifiStation::connect(
        peripherals.modem,
        sys_loop,
        nvs,
        &config.wifi_ssid,
        &config.wifi_pass,
    )
    .map_err(|e| startup_failure("wifi", e))?;

    let transport = EspHttpTransport::new(Duration::from_millis(u64::from(config.http_timeout_ms)))
        .map_err(|e| startup_failure("http client", e))?;
    let mut remote = RemoteClient::from_config(transport, &config);

    // ── 5. Control loop ───────────────────────────────────────
    let mut hw = HardwareAdapter::from_board();
    let mut sink = LogEventSink::new();
    let mut clock = SystemClock::new();

    ControlService::new(&config).run(
        &mut hw,
        &mut remote,
        &mut sink,
        &mut clock,
        &signal::SHUTDOWN_REQUESTED,
    );

    info!("AirNode stopped");
    Ok(())
}

/// Log a startup resource failure and hand the pins back before exiting.
fn startup_failure<E>(what: &str, e: E) -> anyhow::Error
where
    E: core::fmt::Display + Into<anyhow::Error>,
{
    error!("{what} failed: {e}");
    hw_init::release_peripherals();
    e.into()
}
