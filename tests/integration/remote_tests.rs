//! RemoteClient tests over a scripted HTTP transport.

use std::collections::VecDeque;

use airnode::app::commands::CommandTarget;
use airnode::app::ports::{CommandSource, TelemetrySink};
use airnode::control::state::{Metric, MetricValue};
use airnode::error::RemoteError;
use airnode::remote::transport::MAX_BODY_LEN;
use airnode::remote::{HttpResponse, HttpTransport, RemoteClient};

const COLLECTOR: &str = "http://collector.local/api/sensors";
const COMMANDS: &str = "http://collector.local/api/logs/control/latest";

#[derive(Debug, Clone, PartialEq)]
enum Request {
    Get(String),
    Post(String, String),
}

#[derive(Default)]
struct FakeTransport {
    responses: VecDeque<Result<HttpResponse, RemoteError>>,
    requests: Vec<Request>,
}

impl FakeTransport {
    fn replying(responses: impl IntoIterator<Item = Result<HttpResponse, RemoteError>>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            requests: Vec::new(),
        }
    }

    fn next(&mut self) -> Result<HttpResponse, RemoteError> {
        self.responses
            .pop_front()
            .unwrap_or(Err(RemoteError::Transport))
    }
}

impl HttpTransport for FakeTransport {
    fn get(&mut self, url: &str) -> Result<HttpResponse, RemoteError> {
        self.requests.push(Request::Get(url.into()));
        self.next()
    }

    fn post_json(&mut self, url: &str, body: &[u8]) -> Result<HttpResponse, RemoteError> {
        self.requests.push(Request::Post(
            url.into(),
            String::from_utf8_lossy(body).into_owned(),
        ));
        self.next()
    }
}

fn client(
    responses: impl IntoIterator<Item = Result<HttpResponse, RemoteError>>,
) -> RemoteClient<FakeTransport> {
    RemoteClient::new(FakeTransport::replying(responses), COLLECTOR, COMMANDS)
}

// ── Command source ────────────────────────────────────────────

#[test]
fn fetch_gets_the_command_url_and_keeps_only_the_newest() {
    let body = br#"[{"target":"autoFan","action":"disable"},{"target":"led","action":"off"}]"#;
    let mut c = client([Ok(HttpResponse::new(200, body.as_slice()))]);

    let cmds = c.fetch_latest().unwrap();
    assert_eq!(cmds.len(), 1);
    assert_eq!(cmds[0].target, CommandTarget::AutoFan);
    assert_eq!(cmds[0].action, "disable");
    assert_eq!(c.transport().requests, vec![Request::Get(COMMANDS.into())]);
}

#[test]
fn bad_older_entries_do_not_hide_the_newest() {
    for body in [
        r#"[{"target":"led","action":"off"},{"target":5,"action":"on"}]"#,
        r#"[{"target":"led","action":null}]"#,
    ] {
        let mut c = client([Ok(HttpResponse::new(200, body))]);
        let cmds = c.fetch_latest().unwrap();
        assert_eq!(cmds.len(), 1, "{body}");
        assert_eq!(cmds[0].target, CommandTarget::Led, "{body}");
        assert_eq!(cmds[0].action, if body.contains("null") { "" } else { "off" });
    }

    let mut c = client([Ok(HttpResponse::new(200, r#"[{"target":null,"action":"on"}]"#))]);
    assert_eq!(c.fetch_latest().unwrap()[0].target, CommandTarget::Unknown);
}

#[test]
fn long_history_cut_at_the_body_cap_still_yields_newest() {
    let mut history = String::from("[");
    for id in (0..400).rev() {
        let target = if id == 399 { "led" } else { "autoFan" };
        history.push_str(&format!(
            r#"{{"id":{id},"target":"{target}","action":"off","source":"user","createdAt":"2024-05-01T10:00:00Z"}},"#
        ));
    }
    history.pop();
    history.push(']');
    assert!(history.len() > MAX_BODY_LEN);

    // Delivered the way the device transport stores it: in chunks, capped.
    let mut resp = HttpResponse::new(200, Vec::new());
    let complete = history
        .as_bytes()
        .chunks(256)
        .fold(true, |ok, chunk| resp.push_body(chunk) && ok);
    assert!(!complete);
    assert_eq!(resp.body.len(), MAX_BODY_LEN);

    let mut c = client([Ok(resp)]);
    let cmds = c.fetch_latest().unwrap();
    assert_eq!(cmds.len(), 1);
    assert_eq!(cmds[0].target, CommandTarget::Led);
    assert_eq!(cmds[0].action, "off");
}

#[test]
fn null_body_is_no_directive() {
    let mut c = client([Ok(HttpResponse::new(200, "null"))]);
    assert_eq!(c.fetch_latest(), Ok(vec![]));
}

#[test]
fn non_200_fetch_is_a_status_error() {
    let mut c = client([Ok(HttpResponse::new(404, "[]"))]);
    assert_eq!(c.fetch_latest(), Err(RemoteError::Status(404)));
}

#[test]
fn garbage_fetch_body_is_malformed() {
    let mut c = client([Ok(HttpResponse::new(200, "<html>oops</html>"))]);
    assert_eq!(c.fetch_latest(), Err(RemoteError::MalformedPayload));
}

#[test]
fn transport_errors_pass_through() {
    let mut c = client([Err(RemoteError::Timeout)]);
    assert_eq!(c.fetch_latest(), Err(RemoteError::Timeout));
}

// ── Telemetry sink ────────────────────────────────────────────

#[test]
fn report_posts_string_valued_json_to_collector() {
    let mut c = client([
        Ok(HttpResponse::new(201, "")),
        Ok(HttpResponse::new(201, "")),
    ]);

    c.report(Metric::Humidity, MetricValue::Float(40.5)).unwrap();
    c.report(Metric::Pm25, MetricValue::Count(80)).unwrap();

    assert_eq!(
        c.transport().requests,
        vec![
            Request::Post(
                COLLECTOR.into(),
                r#"{"sensorType":"humidity","value":"40.5"}"#.into()
            ),
            Request::Post(
                COLLECTOR.into(),
                r#"{"sensorType":"pm25","value":"80"}"#.into()
            ),
        ]
    );
}

#[test]
fn report_requires_201() {
    let mut c = client([Ok(HttpResponse::new(200, ""))]);
    assert_eq!(
        c.report(Metric::Temperature, MetricValue::Float(21.0)),
        Err(RemoteError::Status(200))
    );

    let mut c = client([Ok(HttpResponse::new(503, ""))]);
    assert_eq!(
        c.report(Metric::Temperature, MetricValue::Float(21.0)),
        Err(RemoteError::Status(503))
    );
}
