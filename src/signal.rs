//! ISR-safe stop flag.
//!
//! The shutdown button ISR (or any other context) raises the flag; the
//! control loop polls it once per cycle boundary.  Lock-free, so
//! `request_shutdown` is safe to call from interrupt context.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::app::ports::StopSignal;

/// Process-wide stop request raised by the shutdown button.
pub static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Raise the process-wide stop request.
pub fn request_shutdown() {
    SHUTDOWN_REQUESTED.store(true, Ordering::Release);
}

impl StopSignal for AtomicBool {
    fn stop_requested(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}
