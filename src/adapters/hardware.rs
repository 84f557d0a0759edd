//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and both actuator drivers, exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  On non-espidf targets
//! the underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::control::decision::IndicatorLevel;
use crate::drivers::fan::FanDriver;
use crate::drivers::hw_init;
use crate::drivers::indicator::{IndicatorDriver, IndicatorPins};
use crate::pins;
use crate::sensors::gas::GasSensor;
use crate::sensors::particulate::ParticulateSensor;
use crate::sensors::thermo::ThermoSensor;
use crate::sensors::{SensorFrame, SensorHub};

pub struct HardwareAdapter {
    sensor_hub: SensorHub,
    fan: FanDriver,
    indicator: IndicatorDriver,
}

impl HardwareAdapter {
    pub fn new(sensor_hub: SensorHub, fan: FanDriver, indicator: IndicatorDriver) -> Self {
        Self {
            sensor_hub,
            fan,
            indicator,
        }
    }

    /// Build every driver on the board's pin map.  Call after
    /// [`hw_init::init_peripherals`].
    pub fn from_board() -> Self {
        Self::new(
            SensorHub::new(
                ThermoSensor::new(pins::DHT_DATA_GPIO),
                ParticulateSensor::new(pins::PMS_UART_PORT),
                GasSensor::new(pins::GAS_DIGITAL_GPIO),
            ),
            FanDriver::new(pins::FAN_GPIO),
            IndicatorDriver::new(IndicatorPins {
                good: pins::LED_GOOD_GPIO,
                moderate: pins::LED_MODERATE_GPIO,
                bad: pins::LED_BAD_GPIO,
            }),
        )
    }

    pub fn fan(&self) -> &FanDriver {
        &self.fan
    }

    pub fn indicator(&self) -> &IndicatorDriver {
        &self.indicator
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_frame(&mut self) -> SensorFrame {
        self.sensor_hub.read_all()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_fan(&mut self, on: bool) {
        self.fan.set(on);
    }

    fn set_indicator(&mut self, level: IndicatorLevel) {
        self.indicator.set(level);
    }

    fn all_off(&mut self) {
        self.fan.off();
        self.indicator.off();
    }

    fn release(&mut self) {
        hw_init::release_peripherals();
    }
}
