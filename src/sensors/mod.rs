//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces a [`SensorFrame`] each
//! cycle.  Each field degrades to `Err` independently; one flaky sensor
//! never hides the others.

pub mod gas;
pub mod particulate;
pub mod thermo;

use log::debug;

use crate::control::state::{Metric, MetricValue};
use crate::error::SensorError;
use gas::GasSensor;
use particulate::ParticulateSensor;
use thermo::ThermoSensor;

/// One sensor field: the value, or why it is absent this cycle.
pub type Reading<T> = Result<T, SensorError>;

/// Digital gas-sensor output.  A low level means no gas above the
/// module's trip point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasLevel {
    Clean,
    Polluted,
}

impl GasLevel {
    pub fn from_level(high: bool) -> Self {
        if high { Self::Polluted } else { Self::Clean }
    }

    /// Raw digital value as wired (`0` or `1`).
    pub const fn as_digital(self) -> u8 {
        match self {
            Self::Clean => 0,
            Self::Polluted => 1,
        }
    }
}

/// A point-in-time sample of every sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorFrame {
    /// °C.
    pub temperature: Reading<f32>,
    /// %RH.
    pub humidity: Reading<f32>,
    /// PM2.5 concentration, µg/m³.
    pub pm25: Reading<u16>,
    pub gas: Reading<GasLevel>,
}

impl Default for SensorFrame {
    fn default() -> Self {
        Self {
            temperature: Err(SensorError::NotInitialized),
            humidity: Err(SensorError::NotInitialized),
            pm25: Err(SensorError::NotInitialized),
            gas: Err(SensorError::NotInitialized),
        }
    }
}

impl SensorFrame {
    /// The reportable value for `metric`, if it was read this cycle.
    pub fn metric(&self, metric: Metric) -> Option<MetricValue> {
        match metric {
            Metric::Temperature => self.temperature.ok().map(MetricValue::Float),
            Metric::Humidity => self.humidity.ok().map(MetricValue::Float),
            Metric::Pm25 => self.pm25.ok().map(MetricValue::Count),
        }
    }
}

/// Aggregates all sensor drivers and produces a unified frame.
pub struct SensorHub {
    pub thermo: ThermoSensor,
    pub particulate: ParticulateSensor,
    pub gas: GasSensor,
}

impl SensorHub {
    /// Pass in pre-built drivers (built in main where peripheral
    /// ownership is established).
    pub fn new(thermo: ThermoSensor, particulate: ParticulateSensor, gas: GasSensor) -> Self {
        Self {
            thermo,
            particulate,
            gas,
        }
    }

    /// Sample every sensor once.
    pub fn read_all(&mut self) -> SensorFrame {
        let (temperature, humidity) = match self.thermo.read() {
            Ok(r) => (Ok(r.celsius), Ok(r.humidity)),
            Err(e) => {
                debug!("thermo read failed: {e}");
                (Err(e), Err(e))
            }
        };

        let pm25 = self.particulate.read();
        if let Err(e) = pm25 {
            debug!("particulate read failed: {e}");
        }

        SensorFrame {
            temperature,
            humidity,
            pm25,
            gas: Ok(self.gas.read()),
        }
    }
}
