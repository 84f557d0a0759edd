//! Three-level air-quality indicator: good / moderate / bad LEDs.
//!
//! At most one LED is lit after any call.  The lit LED is switched off
//! before the new one is switched on, so there is no instant with two
//! levels showing.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives three GPIOs via hw_init.
//! On host/test: writes land in the hw_init simulated output latches.

use crate::control::decision::IndicatorLevel;
use crate::drivers::hw_init;

/// GPIOs for the three lit levels.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorPins {
    pub good: i32,
    pub moderate: i32,
    pub bad: i32,
}

pub struct IndicatorDriver {
    pins: IndicatorPins,
    level: IndicatorLevel,
}

impl IndicatorDriver {
    pub fn new(pins: IndicatorPins) -> Self {
        Self {
            pins,
            level: IndicatorLevel::Off,
        }
    }

    pub fn set(&mut self, level: IndicatorLevel) {
        let target = self.pin_for(level);
        for pin in [self.pins.good, self.pins.moderate, self.pins.bad] {
            if Some(pin) != target {
                hw_init::gpio_write(pin, false);
            }
        }
        if let Some(pin) = target {
            hw_init::gpio_write(pin, true);
        }
        self.level = level;
    }

    pub fn off(&mut self) {
        self.set(IndicatorLevel::Off);
    }

    pub fn level(&self) -> IndicatorLevel {
        self.level
    }

    /// Pin currently driven high, if any.
    pub fn lit(&self) -> Option<i32> {
        self.pin_for(self.level)
    }

    fn pin_for(&self, level: IndicatorLevel) -> Option<i32> {
        match level {
            IndicatorLevel::Good => Some(self.pins.good),
            IndicatorLevel::Moderate => Some(self.pins.moderate),
            IndicatorLevel::Bad => Some(self.pins.bad),
            IndicatorLevel::Off => None,
        }
    }
}
