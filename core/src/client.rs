//! Stateless request builder and response parser for the graph gateway.
//!
//! # Design
//! `GraphClient` holds only a `base_url` and carries no mutable state between
//! calls. A command is split into `build_request`, which produces an
//! `HttpRequest`, and `parse_response`, which consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip.

use serde_json::Value;
use tracing::{debug, info};

use crate::auth::Credentials;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Gateway address used when the caller supplies none.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8182";

/// Synchronous, stateless client for the graph gateway's REST surface.
#[derive(Debug, Clone)]
pub struct GraphClient {
    base_url: String,
}

impl Default for GraphClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl GraphClient {
    /// The base URL is kept verbatim; paths are appended to it as-is.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }

    /// Build the single request for `method` on `path`.
    ///
    /// The URL is a plain concatenation of base URL and path. No
    /// normalization or escaping happens; a malformed path is the caller's
    /// problem and surfaces as a transport error.
    pub fn build_request(&self, method: HttpMethod, path: &str, credentials: &Credentials) -> HttpRequest {
        let url = format!("{}{path}", self.base_url);
        debug!(%method, %url, ?credentials, "building gateway request");
        HttpRequest {
            method,
            url,
            headers: vec![("authorization".to_string(), credentials.authorization_header())],
        }
    }

    /// Parse the response body as JSON.
    ///
    /// Error statuses are not failures: the gateway reports problems with a
    /// JSON body, and that body is returned like any other.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, ApiError> {
        if !response.is_success() {
            info!(status = response.status, "gateway answered with an error status");
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::InvalidJson {
            status: response.status,
            message: e.to_string(),
        })
    }
}
