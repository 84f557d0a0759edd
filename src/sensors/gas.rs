//! MQ-135 gas module, digital output only.
//!
//! The module's comparator trips at a threshold set by its on-board
//! potentiometer; the firmware just reads the pin level.  There is no
//! failure path.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the GPIO level via hw_init.
//! On host/test: reads a static `AtomicBool` (defaults to clean air).

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

use super::GasLevel;
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
static SIM_GAS_HIGH: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_gas_high(high: bool) {
    SIM_GAS_HIGH.store(high, Ordering::Relaxed);
}

pub struct GasSensor {
    _gpio: i32,
}

impl GasSensor {
    pub fn new(gpio: i32) -> Self {
        Self { _gpio: gpio }
    }

    pub fn read(&mut self) -> GasLevel {
        GasLevel::from_level(self.read_pin())
    }

    #[cfg(target_os = "espidf")]
    fn read_pin(&self) -> bool {
        hw_init::gpio_read(self._gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_pin(&self) -> bool {
        SIM_GAS_HIGH.load(Ordering::Relaxed)
    }
}
