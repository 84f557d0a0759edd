//! Clock adapter.
//!
//! Implements [`ClockPort`]: a blocking delay plus monotonic uptime.
//!
//! - **`target_os = "espidf"`**: uptime from `esp_timer_get_time()`;
//!   `std::thread::sleep` maps onto a FreeRTOS task delay.
//! - **`not(target_os = "espidf")`**: `std::time::Instant` for host-side
//!   runs.

use core::time::Duration;

use crate::app::ports::ClockPort;

pub struct SystemClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl ClockPort for SystemClock {
    fn delay(&mut self, period: Duration) {
        std::thread::sleep(period);
    }

    #[cfg(target_os = "espidf")]
    fn uptime_ms(&self) -> u64 {
        // SAFETY: reads the monotonic high-resolution timer; no side effects.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000
    }

    #[cfg(not(target_os = "espidf"))]
    fn uptime_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}
