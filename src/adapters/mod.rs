//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements              | Connects to                 |
//! |-------------|-------------------------|-----------------------------|
//! | `hardware`  | SensorPort, ActuatorPort| DHT11, PMS UART, MQ-135, GPIO|
//! | `log_sink`  | EventSink               | Serial log output           |
//! | `esp_http`  | HttpTransport           | esp_http_client             |
//! | `time`      | ClockPort               | ESP32 system timer          |
//! | `wifi`      |:                       | ESP-IDF WiFi STA            |

#[cfg(target_os = "espidf")]
pub mod esp_http;
pub mod hardware;
pub mod log_sink;
pub mod time;
pub mod wifi;
