//! Fan driver: one digital output into a relay or low-side MOSFET.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIO via hw_init.
//! On host/test: writes land in the hw_init simulated output latches.

use crate::drivers::hw_init;

pub struct FanDriver {
    gpio: i32,
    on: bool,
}

impl FanDriver {
    /// The output is assumed low (off) at construction; hw_init drives
    /// every output low during bring-up.
    pub fn new(gpio: i32) -> Self {
        Self { gpio, on: false }
    }

    /// Idempotent: writing the current level again is harmless.
    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(self.gpio, on);
        self.on = on;
    }

    pub fn off(&mut self) {
        self.set(false);
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
