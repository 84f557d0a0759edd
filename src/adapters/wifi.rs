//! WiFi station bring-up.
//!
//! The node needs the network before the first command fetch, so the
//! station is connected once at startup; failure there is a startup
//! resource failure and `main` exits.  A dropped link later on is not
//! handled here: remote calls simply fail with
//! [`RemoteError::Transport`](crate::error::RemoteError) until the
//! ESP-IDF driver re-associates.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `esp_idf_svc::wifi::BlockingWifi`.
//! - **all other targets**: credential validation only.

use core::fmt;

use log::info;
#[cfg(target_os = "espidf")]
use log::warn;

#[cfg(target_os = "espidf")]
use esp_idf_svc::{
    eventloop::EspSystemEventLoop,
    hal::modem::Modem,
    nvs::EspDefaultNvsPartition,
    wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityError {
    NoCredentials,
    InvalidSsid,
    InvalidPassword,
    DriverInit,
    ConnectionFailed,
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCredentials => write!(f, "no WiFi credentials configured"),
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)"),
            Self::DriverInit => write!(f, "WiFi driver init failed"),
            Self::ConnectionFailed => write!(f, "WiFi connection failed"),
        }
    }
}

impl core::error::Error for ConnectivityError {}

const CONNECT_ATTEMPTS: u32 = 3;
#[cfg(target_os = "espidf")]
const RETRY_DELAY: core::time::Duration = core::time::Duration::from_secs(2);

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), ConnectivityError> {
    if ssid.is_empty() {
        return Err(ConnectivityError::NoCredentials);
    }
    if ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(ConnectivityError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ConnectivityError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConnectivityError::InvalidPassword);
    }
    Ok(())
}

pub fn validate_credentials(ssid: &str, password: &str) -> Result<(), ConnectivityError> {
    validate_ssid(ssid)?;
    validate_password(password)
}

// ───────────────────────────────────────────────────────────────
// Station
// ───────────────────────────────────────────────────────────────

/// A connected station.  Dropping it tears the link down.
pub struct WifiStation {
    ssid: heapless::String<32>,
    #[cfg(target_os = "espidf")]
    wifi: BlockingWifi<EspWifi<'static>>,
}

impl WifiStation {
    #[cfg(target_os = "espidf")]
    pub fn connect(
        modem: Modem,
        sys_loop: EspSystemEventLoop,
        nvs: EspDefaultNvsPartition,
        ssid: &str,
        password: &str,
    ) -> Result<Self, ConnectivityError> {
        validate_credentials(ssid, password)?;
        let ssid_buf: heapless::String<32> =
            ssid.try_into().map_err(|_| ConnectivityError::InvalidSsid)?;

        let esp_wifi = EspWifi::new(modem, sys_loop.clone(), Some(nvs))
            .map_err(|_| ConnectivityError::DriverInit)?;
        let mut wifi =
            BlockingWifi::wrap(esp_wifi, sys_loop).map_err(|_| ConnectivityError::DriverInit)?;

        let auth_method = if password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPAWPA2Personal
        };
        wifi.set_configuration(&Configuration::Client(ClientConfiguration {
            ssid: ssid.try_into().map_err(|_| ConnectivityError::InvalidSsid)?,
            password: password
                .try_into()
                .map_err(|_| ConnectivityError::InvalidPassword)?,
            auth_method,
            ..Default::default()
        }))
        .map_err(|_| ConnectivityError::DriverInit)?;
        wifi.start().map_err(|_| ConnectivityError::DriverInit)?;
        info!("wifi started, connecting to `{}`", ssid);

        for attempt in 1..=CONNECT_ATTEMPTS {
            match wifi.connect().and_then(|()| wifi.wait_netif_up()) {
                Ok(()) => {
                    info!("wifi connected on attempt {attempt}");
                    return Ok(Self {
                        ssid: ssid_buf,
                        wifi,
                    });
                }
                Err(e) => {
                    warn!("wifi connect attempt {attempt}/{CONNECT_ATTEMPTS} failed: {e}");
                    let _ = wifi.disconnect();
                    if attempt < CONNECT_ATTEMPTS {
                        std::thread::sleep(RETRY_DELAY);
                    }
                }
            }
        }
        Err(ConnectivityError::ConnectionFailed)
    }

    /// Simulation: validates credentials and reports an instant link.
    #[cfg(not(target_os = "espidf"))]
    pub fn connect(ssid: &str, password: &str) -> Result<Self, ConnectivityError> {
        validate_credentials(ssid, password)?;
        let ssid_buf: heapless::String<32> =
            ssid.try_into().map_err(|_| ConnectivityError::InvalidSsid)?;
        info!("wifi(sim): connected to `{}` after 1/{} attempt(s)", ssid, CONNECT_ATTEMPTS);
        Ok(Self { ssid: ssid_buf })
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    #[cfg(target_os = "espidf")]
    pub fn is_connected(&self) -> bool {
        self.wifi.is_connected().unwrap_or(false)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn is_connected(&self) -> bool {
        true
    }
}
