//! GPIO / peripheral pin assignments for the AirNode board (ESP32-S3).
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// DHT11 thermo-hygrometer single-wire data line (open-drain, pulled up).
pub const DHT_DATA_GPIO: i32 = 4;

/// MQ-135 gas module digital output.  LOW = below the module's trip
/// point (clean air), HIGH = above it.
pub const GAS_DIGITAL_GPIO: i32 = 5;

/// PMS7003 particulate sensor on UART1 (9600 8N1).
pub const PMS_UART_PORT: i32 = 1;
pub const PMS_UART_TX_GPIO: i32 = 17;
pub const PMS_UART_RX_GPIO: i32 = 18;
pub const PMS_UART_BAUD: i32 = 9600;

// ---------------------------------------------------------------------------
// Actuators
// ---------------------------------------------------------------------------

/// Fan relay / MOSFET gate.  HIGH = running.
pub const FAN_GPIO: i32 = 10;

/// Air-quality indicator LEDs: exactly one lit at a time.
pub const LED_GOOD_GPIO: i32 = 11;
pub const LED_MODERATE_GPIO: i32 = 12;
pub const LED_BAD_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// User input
// ---------------------------------------------------------------------------

/// Momentary push-button (active-low, internal pull-up).  Pressing it
/// requests an orderly shutdown at the next cycle boundary.
pub const SHUTDOWN_BUTTON_GPIO: i32 = 0;
