//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network; the binary executes the actual I/O.
//!
//! All fields use owned types (`String`, `Vec`) so values can be handed to any
//! transport without lifetime concerns.

use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// HTTP method for a request. Only the four verbs the gateway accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Command names accepted on the command line, in usage order.
    pub const COMMANDS: [&'static str; 4] = ["get", "put", "post", "delete"];

    /// Uppercase verb as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = ApiError;

    /// Case-sensitive: only the lowercase command names are recognized.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            "put" => Ok(HttpMethod::Put),
            "delete" => Ok(HttpMethod::Delete),
            other => Err(ApiError::InvalidCommand(other.to_string())),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by `GraphClient::build_request`. The caller executes it against the
/// network and returns the corresponding `HttpResponse`. Requests to the
/// gateway never carry a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data. Only the status and body
/// matter to the gateway client.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
