//! Blocking HTTP transport seam.
//!
//! [`RemoteClient`](super::RemoteClient) speaks the collector/command
//! protocol on top of this trait; the ESP-IDF HTTP client implements it
//! on the device and tests substitute a scripted fake.

use crate::error::RemoteError;

/// Largest response body kept.  Longer bodies are cut to their head.
pub const MAX_BODY_LEN: usize = 4096;

/// Status line and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Append a received chunk, keeping at most [`MAX_BODY_LEN`] bytes of
    /// body.  Returns `false` once anything has been dropped.
    pub fn push_body(&mut self, chunk: &[u8]) -> bool {
        let room = MAX_BODY_LEN.saturating_sub(self.body.len());
        let kept = chunk.len().min(room);
        self.body.extend_from_slice(&chunk[..kept]);
        kept == chunk.len()
    }
}

/// One request per call, bounded by the transport's own timeout.  No
/// retries at this layer.
pub trait HttpTransport {
    fn get(&mut self, url: &str) -> Result<HttpResponse, RemoteError>;

    /// POST `body` with `Content-Type: application/json`.
    fn post_json(&mut self, url: &str, body: &[u8]) -> Result<HttpResponse, RemoteError>;
}
