//! DHT11 single-wire thermo-hygrometer.
//!
//! The device answers a start pulse with 40 bits: humidity integer,
//! humidity decimal, temperature integer, temperature decimal, checksum.
//! Bit 7 of the temperature integer byte is the sign.  The checksum is the
//! low byte of the sum of the first four bytes.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: the bit capture runs in hw_init (timing-critical).
//! On host/test: returns whatever payload [`sim_set_dht_payload`] injected;
//! `None` simulates a silent bus.

use crate::error::SensorError;
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
static SIM_DHT_PAYLOAD: std::sync::Mutex<Option<[u8; 5]>> = std::sync::Mutex::new(None);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_dht_payload(payload: Option<[u8; 5]>) {
    if let Ok(mut p) = SIM_DHT_PAYLOAD.lock() {
        *p = payload;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermoReading {
    pub celsius: f32,
    pub humidity: f32,
}

/// Decode a raw 5-byte payload.
pub fn decode_dht11(raw: [u8; 5]) -> Result<ThermoReading, SensorError> {
    let sum = raw[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != raw[4] {
        return Err(SensorError::Checksum);
    }

    let humidity = raw[0] as f32 + raw[1] as f32 / 10.0;
    let magnitude = (raw[2] & 0x7F) as f32 + raw[3] as f32 / 10.0;
    let celsius = if raw[2] & 0x80 != 0 { -magnitude } else { magnitude };

    Ok(ThermoReading { celsius, humidity })
}

pub struct ThermoSensor {
    _gpio: i32,
}

impl ThermoSensor {
    pub fn new(gpio: i32) -> Self {
        Self { _gpio: gpio }
    }

    pub fn read(&mut self) -> Result<ThermoReading, SensorError> {
        self.capture().and_then(decode_dht11)
    }

    #[cfg(target_os = "espidf")]
    fn capture(&self) -> Result<[u8; 5], SensorError> {
        hw_init::dht_capture(self._gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    fn capture(&self) -> Result<[u8; 5], SensorError> {
        SIM_DHT_PAYLOAD
            .lock()
            .map_err(|_| SensorError::NotInitialized)?
            .ok_or(SensorError::Timeout)
    }
}
