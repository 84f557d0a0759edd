//! Remote endpoints: the command source and the telemetry collector.
//!
//! [`RemoteClient`] implements both [`CommandSource`] and
//! [`TelemetrySink`] over any [`HttpTransport`].  Every failure comes
//! back as a [`RemoteError`]; nothing here retries.

pub mod transport;
pub mod wire;

use log::debug;

use crate::app::commands::ControlCommand;
use crate::app::ports::{CommandSource, TelemetrySink};
use crate::config::NodeConfig;
use crate::control::state::{Metric, MetricValue};
use crate::error::RemoteError;
pub use transport::{HttpResponse, HttpTransport};

/// Success status for a command fetch.
pub const FETCH_OK: u16 = 200;
/// Success status for a telemetry report.
pub const REPORT_CREATED: u16 = 201;

pub struct RemoteClient<T> {
    transport: T,
    collector_url: String,
    command_url: String,
}

impl<T: HttpTransport> RemoteClient<T> {
    pub fn new(
        transport: T,
        collector_url: impl Into<String>,
        command_url: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            collector_url: collector_url.into(),
            command_url: command_url.into(),
        }
    }

    pub fn from_config(transport: T, config: &NodeConfig) -> Self {
        Self::new(transport, config.collector_url.as_str(), config.command_url.as_str())
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: HttpTransport> CommandSource for RemoteClient<T> {
    fn fetch_latest(&mut self) -> Result<Vec<ControlCommand>, RemoteError> {
        let resp = self.transport.get(&self.command_url)?;
        if resp.status != FETCH_OK {
            return Err(RemoteError::Status(resp.status));
        }
        let newest = wire::decode_newest(&resp.body)?;
        debug!("fetched newest directive: {newest:?}");
        Ok(newest.into_iter().collect())
    }
}

impl<T: HttpTransport> TelemetrySink for RemoteClient<T> {
    fn report(&mut self, metric: Metric, value: MetricValue) -> Result<(), RemoteError> {
        let body = wire::encode_report(metric, value)?;
        let resp = self.transport.post_json(&self.collector_url, &body)?;
        if resp.status != REPORT_CREATED {
            return Err(RemoteError::Status(resp.status));
        }
        Ok(())
    }
}
