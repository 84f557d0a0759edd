//! Node configuration parameters
//!
//! Endpoints and credentials default to values baked in by `build.rs`
//! (`COLLECTOR_URL`, `COMMAND_URL`, `WIFI_SSID`, `WIFI_PASS`).  A JSON
//! document may override any field; it is validated before use.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Thresholds used by the decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Auto-fan turns on at or above this temperature (°C).
    pub fan_temperature_c: f32,
    /// Auto-fan turns on at or above this PM2.5 concentration (µg/m³).
    pub fan_pm25: u16,
    /// Indicator shows `good` below this PM2.5 (with clean gas reading).
    pub good_pm25_below: u16,
    /// Indicator shows at most `moderate` below this PM2.5.
    pub moderate_pm25_below: u16,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            fan_temperature_c: 30.0,
            fan_pm25: 75,
            good_pm25_below: 35,
            moderate_pm25_below: 75,
        }
    }
}

/// Core node configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    // --- Remote endpoints ---
    /// Telemetry collector; one POST per changed metric.
    pub collector_url: String,
    /// Command source; GET returns newest-first directives.
    pub command_url: String,
    /// Per-request timeout (milliseconds).
    pub http_timeout_ms: u32,

    // --- WiFi ---
    pub wifi_ssid: String,
    pub wifi_pass: String,

    // --- Timing ---
    /// Flat delay after every cycle (milliseconds).
    pub cycle_interval_ms: u32,

    // --- Policy ---
    pub thresholds: Thresholds,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            collector_url: env!("AIRNODE_COLLECTOR_URL").into(),
            command_url: env!("AIRNODE_COMMAND_URL").into(),
            http_timeout_ms: 5_000,

            wifi_ssid: env!("AIRNODE_WIFI_SSID").into(),
            wifi_pass: env!("AIRNODE_WIFI_PASS").into(),

            cycle_interval_ms: 5_000,

            thresholds: Thresholds::default(),
        }
    }
}

/// Override document baked in by `build.rs` from the file named by the
/// `CONFIG_JSON` build variable.
const BAKED_OVERRIDE: Option<&str> = option_env!("AIRNODE_CONFIG_JSON");

impl NodeConfig {
    /// The config the firmware boots with: the baked-in override if the
    /// build carried one, else the defaults.  Validated either way.
    pub fn load() -> Result<Self, ConfigError> {
        Self::resolve(BAKED_OVERRIDE)
    }

    fn resolve(doc: Option<&str>) -> Result<Self, ConfigError> {
        match doc {
            Some(json) => Self::from_json(json.as_bytes()),
            None => {
                let cfg = Self::default();
                cfg.validate()?;
                Ok(cfg)
            }
        }
    }

    /// Parse and validate a JSON config document.  Missing fields take
    /// their defaults.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_slice(bytes).map_err(|_| ConfigError::Corrupted)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_http_url(&self.collector_url) {
            return Err(ConfigError::ValidationFailed(
                "collector_url must be an http:// or https:// URL",
            ));
        }
        if !is_http_url(&self.command_url) {
            return Err(ConfigError::ValidationFailed(
                "command_url must be an http:// or https:// URL",
            ));
        }
        if !(500..=30_000).contains(&self.http_timeout_ms) {
            return Err(ConfigError::ValidationFailed(
                "http_timeout_ms must be 500–30000",
            ));
        }
        if !(1_000..=3_600_000).contains(&self.cycle_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "cycle_interval_ms must be 1000–3600000",
            ));
        }

        let t = &self.thresholds;
        if !(-40.0..=80.0).contains(&t.fan_temperature_c) {
            return Err(ConfigError::ValidationFailed(
                "fan_temperature_c must be -40.0–80.0",
            ));
        }
        if t.fan_pm25 == 0 || t.fan_pm25 > 1000 {
            return Err(ConfigError::ValidationFailed("fan_pm25 must be 1–1000"));
        }
        if t.good_pm25_below == 0 || t.good_pm25_below > t.moderate_pm25_below {
            return Err(ConfigError::ValidationFailed(
                "good_pm25_below must be 1..=moderate_pm25_below",
            ));
        }
        if t.moderate_pm25_below > 1000 {
            return Err(ConfigError::ValidationFailed(
                "moderate_pm25_below must be <= 1000",
            ));
        }
        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"));
    matches!(rest, Some(host) if !host.is_empty())
}
