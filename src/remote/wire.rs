//! JSON payloads exchanged with the collector and the command source.

use serde::Serialize;
use serde_json::Value;

use crate::app::commands::ControlCommand;
use crate::control::state::{Metric, MetricValue};
use crate::error::RemoteError;

/// Body of one telemetry POST.  The value travels as a string.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SensorReport<'a> {
    sensor_type: &'a str,
    value: String,
}

pub fn encode_report(metric: Metric, value: MetricValue) -> Result<Vec<u8>, RemoteError> {
    let report = SensorReport {
        sensor_type: metric.as_str(),
        value: value.to_string(),
    };
    Ok(serde_json::to_vec(&report)?)
}

/// Decode the newest directive from a command-source body: a
/// newest-first JSON array.
///
/// Only the first element is parsed.  Whatever follows it is never
/// looked at, so malformed older entries or a body cut short at the
/// transport's size cap do not hide the newest one.  An empty body,
/// `null` or `[]` means no directive.
pub fn decode_newest(body: &[u8]) -> Result<Option<ControlCommand>, RemoteError> {
    let body = body.trim_ascii();
    if body.is_empty() || body == b"null" {
        return Ok(None);
    }
    let Some(items) = body.strip_prefix(b"[") else {
        return Err(RemoteError::MalformedPayload);
    };
    let items = items.trim_ascii_start();
    if items.starts_with(b"]") {
        return Ok(None);
    }

    let newest = serde_json::Deserializer::from_slice(items)
        .into_iter::<Value>()
        .next()
        .ok_or(RemoteError::MalformedPayload)??;
    Ok(Some(ControlCommand::from_value(&newest)))
}
