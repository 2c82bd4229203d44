//! Error types for the gateway client.
//!
//! # Design
//! An HTTP error status is not an error here: the gateway explains failures
//! in a JSON body, and that body is the output. Errors are limited to input
//! that cannot become a request and bodies that cannot become JSON.

use std::fmt;

/// Errors returned by `HttpMethod::from_str`, `GraphClient::parse_response`
/// and `render_json`.
#[derive(Debug)]
pub enum ApiError {
    /// The command is not one of `get`, `put`, `post`, `delete`.
    InvalidCommand(String),

    /// The response body is not JSON.
    InvalidJson { status: u16, message: String },

    /// A parsed document could not be written back out.
    Serialization(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidCommand(command) => {
                write!(f, "invalid command {command:?}: expected get, put, post or delete")
            }
            ApiError::InvalidJson { status, message } => {
                write!(f, "HTTP {status} body is not JSON: {message}")
            }
            ApiError::Serialization(msg) => write!(f, "serialization failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
