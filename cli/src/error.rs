//! CLI-level errors (wraps core errors)

use rexreq_core::ApiError;
use thiserror::Error;

use crate::exitcode;

/// Top-level error type. `Display` carries the detail for debug logs;
/// [`CliError::user_message`] is what the user sees.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub fn request(url: &str, reason: impl ToString) -> Self {
        CliError::Request {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Api(ApiError::InvalidCommand(_)) => exitcode::INVALID_INPUT,
            CliError::Api(_) | CliError::Request { .. } => exitcode::REQUEST_FAILURE,
        }
    }

    /// The one-line diagnostic written to stderr.
    pub fn user_message(&self) -> &'static str {
        match self {
            CliError::Api(ApiError::InvalidCommand(_)) => {
                "ERROR: Command must be 'get', 'put', 'post', or 'delete'!"
            }
            // A body that is not JSON counts as a failed request.
            CliError::Api(ApiError::InvalidJson { .. }) | CliError::Request { .. } => {
                "ERROR: Unable to make request on Rexster!"
            }
            CliError::Api(ApiError::Serialization(_)) => "ERROR: Unable to print response from Rexster!",
        }
    }
}
