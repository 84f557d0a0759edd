//! One-shot hardware peripheral initialization and teardown.
//!
//! Configures GPIO directions, the particulate-sensor UART and the
//! DHT11 data line using raw ESP-IDF sys calls.  Called once from
//! `main()` before the control loop starts; [`release_peripherals`]
//! undoes it when the loop exits.

use core::sync::atomic::{AtomicBool, Ordering};
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::AtomicU64;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::error::SensorError;
#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    UartInitFailed(i32),
    IsrInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::UartInitFailed(rc) => write!(f, "UART init failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

static RELEASED: AtomicBool = AtomicBool::new(false);

/// Map a raw `esp_err_t` onto one of our init errors.
#[cfg(target_os = "espidf")]
fn check(ret: esp_err_t, err: fn(i32) -> HwInitError) -> Result<(), HwInitError> {
    esp!(ret).map_err(|e| err(e.code()))
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_gpio_inputs()?;
        init_gpio_outputs()?;
        init_dht_line()?;
        init_pms_uart()?;
    }
    RELEASED.store(false, Ordering::Release);
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    RELEASED.store(false, Ordering::Release);
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    let gas_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::GAS_DIGITAL_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    check(unsafe { gpio_config(&gas_cfg) }, HwInitError::GpioConfigFailed)?;

    let btn_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::SHUTDOWN_BUTTON_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
    };
    check(unsafe { gpio_config(&btn_cfg) }, HwInitError::GpioConfigFailed)?;

    info!("hw_init: GPIO inputs configured (gas, shutdown button)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: register read on an already-configured input pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    false
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
const OUTPUT_PINS: [i32; 4] = [
    pins::FAN_GPIO,
    pins::LED_GOOD_GPIO,
    pins::LED_MODERATE_GPIO,
    pins::LED_BAD_GPIO,
];

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    for &pin in &OUTPUT_PINS {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        check(unsafe { gpio_config(&cfg) }, HwInitError::GpioConfigFailed)?;
        // Fan and indicator start low.
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured (fan, 3x indicator)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: pin was configured as an output in init_gpio_outputs().
    // Main-loop only.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

/// Host stand-in for the output latches: bit `n` is the level last
/// written to GPIO `n`.
#[cfg(not(target_os = "espidf"))]
static SIM_OUTPUTS: AtomicU64 = AtomicU64::new(0);

#[cfg(not(target_os = "espidf"))]
fn sim_mask(pin: i32) -> Option<u64> {
    u32::try_from(pin).ok().and_then(|bit| 1u64.checked_shl(bit))
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    let Some(mask) = sim_mask(pin) else {
        return;
    };
    if high {
        SIM_OUTPUTS.fetch_or(mask, Ordering::AcqRel);
    } else {
        SIM_OUTPUTS.fetch_and(!mask, Ordering::AcqRel);
    }
}

/// Level last written to `pin` with [`gpio_write`].
#[cfg(not(target_os = "espidf"))]
pub fn sim_output_level(pin: i32) -> bool {
    sim_mask(pin).is_some_and(|mask| SIM_OUTPUTS.load(Ordering::Acquire) & mask != 0)
}

// ── PMS UART ──────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
const PMS_RX_BUFFER: i32 = 1024;

#[cfg(target_os = "espidf")]
unsafe fn init_pms_uart() -> Result<(), HwInitError> {
    let cfg = uart_config_t {
        baud_rate: pins::PMS_UART_BAUD,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };
    let port = pins::PMS_UART_PORT as uart_port_t;
    check(
        unsafe { uart_driver_install(port, PMS_RX_BUFFER, 0, 0, core::ptr::null_mut(), 0) },
        HwInitError::UartInitFailed,
    )?;
    check(unsafe { uart_param_config(port, &cfg) }, HwInitError::UartInitFailed)?;
    check(
        unsafe {
            uart_set_pin(
                port,
                pins::PMS_UART_TX_GPIO,
                pins::PMS_UART_RX_GPIO,
                UART_PIN_NO_CHANGE,
                UART_PIN_NO_CHANGE,
            )
        },
        HwInitError::UartInitFailed,
    )?;

    info!("hw_init: UART{} configured for PMS ({} baud)", pins::PMS_UART_PORT, pins::PMS_UART_BAUD);
    Ok(())
}

/// Bytes waiting in the UART RX ring buffer.
#[cfg(target_os = "espidf")]
pub fn uart_buffered_len(port: i32) -> Result<usize, SensorError> {
    let mut len: usize = 0;
    // SAFETY: driver installed in init_pms_uart(); out-pointer is a local.
    esp!(unsafe { uart_get_buffered_data_len(port as uart_port_t, &mut len) })
        .map_err(|_| SensorError::NotInitialized)?;
    Ok(len)
}

/// Non-blocking read of up to `buf.len()` bytes.
#[cfg(target_os = "espidf")]
pub fn uart_read(port: i32, buf: &mut [u8]) -> Result<usize, SensorError> {
    // SAFETY: buf is a valid, exclusively borrowed slice for the call.
    let n = unsafe {
        uart_read_bytes(port as uart_port_t, buf.as_mut_ptr().cast(), buf.len() as u32, 0)
    };
    if n < 0 {
        return Err(SensorError::NotInitialized);
    }
    Ok(n as usize)
}

// ── DHT11 single-wire line ────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_dht_line() -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::DHT_DATA_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT_OUTPUT_OD,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    check(unsafe { gpio_config(&cfg) }, HwInitError::GpioConfigFailed)?;
    // Idle high.
    unsafe { gpio_set_level(pins::DHT_DATA_GPIO, 1) };
    Ok(())
}

/// Busy-wait while the line sits at `level`.  Returns the time spent (µs).
#[cfg(target_os = "espidf")]
fn wait_while(pin: i32, level: bool, timeout_us: i64) -> Result<i64, SensorError> {
    // SAFETY: timer and register reads only.
    unsafe {
        let start = esp_timer_get_time();
        while (gpio_get_level(pin) != 0) == level {
            if esp_timer_get_time() - start > timeout_us {
                return Err(SensorError::Timeout);
            }
        }
        Ok(esp_timer_get_time() - start)
    }
}

/// Capture the raw 40-bit DHT11 payload.  Blocks for ~25 ms.
#[cfg(target_os = "espidf")]
pub fn dht_capture(pin: i32) -> Result<[u8; 5], SensorError> {
    // Start pulse: hold low >= 18 ms, then release.
    // SAFETY: pin configured open-drain in init_dht_line(); main-loop only.
    unsafe {
        gpio_set_level(pin, 0);
        esp_rom_delay_us(20_000);
        gpio_set_level(pin, 1);
        esp_rom_delay_us(30);
    }

    // Response: sensor pulls low 80 µs, then high 80 µs.
    wait_while(pin, true, 100)?;
    wait_while(pin, false, 100)?;
    wait_while(pin, true, 100)?;

    // 40 bits: 50 µs low, then ~27 µs high for 0 or ~70 µs high for 1.
    let mut data = [0u8; 5];
    for bit in 0..40 {
        wait_while(pin, false, 80)?;
        let high_us = wait_while(pin, true, 100)?;
        if high_us > 40 {
            data[bit / 8] |= 1 << (7 - bit % 8);
        }
    }
    Ok(data)
}

// ── Shutdown button ISR ───────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn shutdown_button_isr(_arg: *mut core::ffi::c_void) {
    crate::signal::request_shutdown();
}

/// Install the GPIO ISR service and hook the shutdown button.
/// Call after init_peripherals() and before the control loop.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: ESP_ERR_INVALID_STATE means the service is already installed
    // (acceptable).  The handler only stores to an atomic.
    unsafe {
        if let Err(e) = esp!(gpio_install_isr_service(0)) {
            if e.code() != ESP_ERR_INVALID_STATE as i32 {
                return Err(HwInitError::IsrInstallFailed(e.code()));
            }
        }
        check(
            gpio_isr_handler_add(
                pins::SHUTDOWN_BUTTON_GPIO,
                Some(shutdown_button_isr),
                core::ptr::null_mut(),
            ),
            HwInitError::IsrInstallFailed,
        )?;
        gpio_intr_enable(pins::SHUTDOWN_BUTTON_GPIO);
    }
    info!("hw_init: ISR service installed (shutdown button)");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}

// ── Teardown ──────────────────────────────────────────────────

/// Return every pin and the UART driver to their reset state.
/// Idempotent; only the first call after init does anything.
pub fn release_peripherals() {
    if RELEASED.swap(true, Ordering::AcqRel) {
        return;
    }
    release_hw();
}

#[cfg(target_os = "espidf")]
fn release_hw() {
    // SAFETY: called once from the main task after the loop has exited;
    // no other code touches these peripherals afterwards.
    unsafe {
        gpio_isr_handler_remove(pins::SHUTDOWN_BUTTON_GPIO);
        uart_driver_delete(pins::PMS_UART_PORT as uart_port_t);
        for &pin in &OUTPUT_PINS {
            gpio_set_level(pin, 0);
            gpio_reset_pin(pin);
        }
        gpio_reset_pin(pins::DHT_DATA_GPIO);
    }
    info!("hw_init: peripherals released");
}

#[cfg(not(target_os = "espidf"))]
fn release_hw() {
    log::info!("hw_init(sim): peripherals released");
}

/// `true` once [`release_peripherals`] has run since the last init.
pub fn peripherals_released() -> bool {
    RELEASED.load(Ordering::Acquire)
}
