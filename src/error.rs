//! Unified error types for the AirNode firmware.
//!
//! One enum per failure domain, all `Copy`, so a fault can travel from a
//! transducer or the network adapter up to the control loop without
//! allocation.  Nothing in the control path panics on these; every
//! component hands them back to its caller in a `Result`.

use core::fmt;

// ---------------------------------------------------------------------------
// Transducer faults
// ---------------------------------------------------------------------------

/// Per-sensor, per-cycle read failure.  Degrades one field of the
/// [`SensorFrame`](crate::sensors::SensorFrame) to absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The device handle was never acquired (init failed at boot).
    NotInitialized,
    /// The bus did not respond within the protocol's timing window.
    Timeout,
    /// Fewer bytes are buffered than one complete frame.
    ShortRead,
    /// The frame does not start with the expected magic marker.
    BadFrame,
    /// The frame checksum does not match its payload.
    Checksum,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "sensor not initialized"),
            Self::Timeout => write!(f, "bus timeout"),
            Self::ShortRead => write!(f, "incomplete frame buffered"),
            Self::BadFrame => write!(f, "frame magic mismatch"),
            Self::Checksum => write!(f, "checksum mismatch"),
        }
    }
}

// ---------------------------------------------------------------------------
// Remote (telemetry + command) faults
// ---------------------------------------------------------------------------

/// Failure talking to the collector or the command source.
///
/// Every variant is non-fatal: the loop logs it, skips the affected
/// report or treats the fetch as empty, and tries again next cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteError {
    /// The server answered with something other than the success code.
    Status(u16),
    /// Connection, DNS or socket failure.
    Transport,
    /// The request did not complete within the configured timeout.
    Timeout,
    /// The response body could not be decoded.
    MalformedPayload,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "unexpected HTTP status {code}"),
            Self::Transport => write!(f, "transport error"),
            Self::Timeout => write!(f, "request timed out"),
            Self::MalformedPayload => write!(f, "malformed response body"),
        }
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(_: serde_json::Error) -> Self {
        Self::MalformedPayload
    }
}

// ---------------------------------------------------------------------------
// Configuration faults
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The config document could not be parsed.
    Corrupted,
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl core::error::Error for SensorError {}
impl core::error::Error for RemoteError {}
impl core::error::Error for ConfigError {}
