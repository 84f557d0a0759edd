//! PMS7003-style laser particulate sensor on a UART.
//!
//! The sensor streams 32-byte frames: `0x42 0x4D` magic, then big-endian
//! words.  The atmospheric PM2.5 concentration sits at bytes 12..14.
//! Each cycle takes exactly one 32-byte block off the receive buffer; a
//! short buffer or a block without the magic yields no reading.  There is
//! no re-synchronization across cycles.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the UART driver's RX ring buffer via hw_init.
//! On host/test: reads from a static byte queue filled by
//! [`sim_push_pms_bytes`].

use crate::error::SensorError;
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// One complete frame.
pub const FRAME_LEN: usize = 32;
pub const FRAME_MAGIC: [u8; 2] = [0x42, 0x4D];
/// Offset of the PM2.5 (atmospheric) word.
const PM25_OFFSET: usize = 12;

#[cfg(not(target_os = "espidf"))]
static SIM_PMS_RX: std::sync::Mutex<heapless::Deque<u8, 256>> =
    std::sync::Mutex::new(heapless::Deque::new());

/// Queue bytes as if the sensor had sent them.  Bytes beyond the queue
/// capacity are dropped.
#[cfg(not(target_os = "espidf"))]
pub fn sim_push_pms_bytes(bytes: &[u8]) {
    if let Ok(mut rx) = SIM_PMS_RX.lock() {
        for &b in bytes {
            if rx.push_back(b).is_err() {
                break;
            }
        }
    }
}

/// Decode the PM2.5 concentration from one block.
///
/// Pure: no buffering, no state.  `block` must hold at least
/// [`FRAME_LEN`] bytes and start with [`FRAME_MAGIC`].
pub fn decode_frame(block: &[u8]) -> Result<u16, SensorError> {
    if block.len() < FRAME_LEN {
        return Err(SensorError::ShortRead);
    }
    if block[..2] != FRAME_MAGIC {
        return Err(SensorError::BadFrame);
    }
    Ok(u16::from_be_bytes([block[PM25_OFFSET], block[PM25_OFFSET + 1]]))
}

pub struct ParticulateSensor {
    _uart_port: i32,
}

impl ParticulateSensor {
    pub fn new(uart_port: i32) -> Self {
        Self { _uart_port: uart_port }
    }

    pub fn read(&mut self) -> Result<u16, SensorError> {
        let mut block = [0u8; FRAME_LEN];
        self.take_block(&mut block)?;
        decode_frame(&block)
    }

    #[cfg(target_os = "espidf")]
    fn take_block(&mut self, block: &mut [u8; FRAME_LEN]) -> Result<(), SensorError> {
        if hw_init::uart_buffered_len(self._uart_port)? < FRAME_LEN {
            return Err(SensorError::ShortRead);
        }
        if hw_init::uart_read(self._uart_port, block)? < FRAME_LEN {
            return Err(SensorError::ShortRead);
        }
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn take_block(&mut self, block: &mut [u8; FRAME_LEN]) -> Result<(), SensorError> {
        let mut rx = SIM_PMS_RX.lock().map_err(|_| SensorError::NotInitialized)?;
        if rx.len() < FRAME_LEN {
            return Err(SensorError::ShortRead);
        }
        for slot in block.iter_mut() {
            *slot = rx.pop_front().unwrap_or_default();
        }
        Ok(())
    }
}
