//! ESP-IDF HTTP client transport.
//!
//! Implements [`HttpTransport`] on `esp_http_client` through the
//! `embedded-svc` blocking client.  One connection object is reused for
//! every request; each exchange is bounded by the configured timeout.

use core::time::Duration;

use embedded_svc::http::client::Client as HttpClient;
use embedded_svc::http::{Method, Status};
use embedded_svc::io::{Read, Write};
use esp_idf_svc::http::client::{Configuration as HttpClientConfiguration, EspHttpConnection};
use esp_idf_svc::io::EspIOError;
use esp_idf_svc::sys::{ESP_ERR_HTTP_EAGAIN, ESP_ERR_TIMEOUT, EspError};
use log::{debug, warn};

use crate::error::RemoteError;
use crate::remote::transport::{HttpResponse, HttpTransport, MAX_BODY_LEN};

const CHUNK_LEN: usize = 256;

pub struct EspHttpTransport {
    client: HttpClient<EspHttpConnection>,
}

impl EspHttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, RemoteError> {
        let conf = HttpClientConfiguration {
            timeout: Some(timeout),
            ..Default::default()
        };
        let conn = EspHttpConnection::new(&conf).map_err(map_esp_err)?;
        Ok(Self {
            client: HttpClient::wrap(conn),
        })
    }

    fn exchange(
        &mut self,
        method: Method,
        url: &str,
        body: Option<&[u8]>,
    ) -> Result<HttpResponse, RemoteError> {
        let len = body.map(<[u8]>::len).unwrap_or(0).to_string();
        let headers = [
            ("Content-Type", "application/json"),
            ("Content-Length", len.as_str()),
        ];
        let headers: &[(&str, &str)] = if body.is_some() { &headers } else { &[] };

        let mut request = self.client.request(method, url, headers).map_err(map_io_err)?;
        if let Some(bytes) = body {
            request.write_all(bytes).map_err(map_io_err)?;
            request.flush().map_err(map_io_err)?;
        }
        let mut response = request.submit().map_err(map_io_err)?;
        let status = response.status();

        // Drain the whole body so the connection can be reused; only the
        // head is kept.
        let mut out = HttpResponse::new(status, Vec::new());
        let mut complete = true;
        let mut chunk = [0u8; CHUNK_LEN];
        loop {
            let n = response.read(&mut chunk).map_err(map_io_err)?;
            if n == 0 {
                break;
            }
            complete &= out.push_body(&chunk[..n]);
        }
        if !complete {
            warn!("{} body exceeded {} bytes, kept the head", url, MAX_BODY_LEN);
        }
        debug!("{:?} {} -> {} ({} bytes)", method, url, status, out.body.len());
        Ok(out)
    }
}

impl HttpTransport for EspHttpTransport {
    fn get(&mut self, url: &str) -> Result<HttpResponse, RemoteError> {
        self.exchange(Method::Get, url, None)
    }

    fn post_json(&mut self, url: &str, body: &[u8]) -> Result<HttpResponse, RemoteError> {
        self.exchange(Method::Post, url, Some(body))
    }
}

fn map_io_err(e: EspIOError) -> RemoteError {
    map_esp_err(e.0)
}

fn map_esp_err(e: EspError) -> RemoteError {
    let code = e.code();
    if code == ESP_ERR_TIMEOUT as i32 || code == ESP_ERR_HTTP_EAGAIN as i32 {
        RemoteError::Timeout
    } else {
        RemoteError::Transport
    }
}
