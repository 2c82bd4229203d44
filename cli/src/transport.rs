//! The single network call.
//!
//! `Transport` is the seam between the pure request/response types in
//! `rexreq_core` and real I/O, so the dispatch flow can run against a fake.

use rexreq_core::{HttpMethod, HttpRequest, HttpResponse};
use tracing::{debug, instrument};

use crate::error::{CliError, CliResult};

pub trait Transport {
    /// Execute `request` once. HTTP error statuses come back as data; only
    /// failures to get a response at all are errors.
    fn execute(&self, request: HttpRequest) -> CliResult<HttpResponse>;
}

/// Blocking transport backed by a ureq agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    #[instrument(level = "debug", skip_all, fields(method = %request.method, url = %request.url))]
    fn execute(&self, request: HttpRequest) -> CliResult<HttpResponse> {
        let HttpRequest { method, url, headers } = request;

        let result = match method {
            HttpMethod::Get => with_headers(self.agent.get(&url), &headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&url), &headers).call(),
            HttpMethod::Post => with_headers(self.agent.post(&url), &headers).send_empty(),
            HttpMethod::Put => with_headers(self.agent.put(&url), &headers).send_empty(),
        };
        let mut response = result.map_err(|e| CliError::request(&url, e))?;

        let status = response.status().as_u16();
        // Graph listings routinely exceed ureq's default 10 MB read cap.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_string()
            .map_err(|e| CliError::request(&url, e))?;
        debug!(status, bytes = body.len(), "response received");

        Ok(HttpResponse { status, body })
    }
}
