use std::io::Read;
use std::time::Duration;

use httpmon_common::{contains_marker, HttpMonError, ProbeOutcome, Prober, Result};
use reqwest::blocking::{Client, Response};
use reqwest::redirect::Policy;

const READ_CHUNK: usize = 16 * 1024;

/// Blocking HTTP prober bound to one URL; one instance per worker thread.
pub struct HttpProber {
    url: String,
    timeout: Duration,
    http_client: Client,
}

impl HttpProber {
    /// Build a prober whose requests (connect, headers and body) are bounded by `timeout`.
    ///
    /// Redirects are not followed: a 3xx answer is a completed request.
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .build()
            .map_err(|e| HttpMonError::ClientBuild(e.to_string()))?;

        Ok(Self { url: url.to_string(), timeout, http_client })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Prober for HttpProber {
    fn probe(&mut self) -> ProbeOutcome {
        let response = match self.http_client.get(&self.url).send() {
            Ok(r) => r,
            Err(e) => {
                tracing::trace!(url = %self.url, error = %e, "request failed");
                return ProbeOutcome { success: false, recommendation: false };
            }
        };

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            tracing::trace!(url = %self.url, %status, "request returned error status");
            return ProbeOutcome { success: false, recommendation: false };
        }

        scan_body(response)
    }
}

/// Read the whole body, scanning every chunk for the marker byte.
/// A read error (including a timeout mid-body) fails the request but keeps
/// whatever recommendation was already seen.
fn scan_body(mut response: Response) -> ProbeOutcome {
    let mut buf = vec![0u8; READ_CHUNK];
    let mut recommendation = false;

    loop {
        match response.read(&mut buf) {
            Ok(0) => return ProbeOutcome { success: true, recommendation },
            Ok(n) => {
                if !recommendation && contains_marker(&buf[..n]) {
                    recommendation = true;
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::trace!(error = %e, "body read failed");
                return ProbeOutcome { success: false, recommendation };
            }
        }
    }
}
