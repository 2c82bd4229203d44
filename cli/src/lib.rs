//! One-shot REST requests against a Rexster graph gateway.
//!
//! The binary parses `command path token [-b base_url]`, sends exactly one
//! request through a [`transport::Transport`], and prints the JSON answer.

pub mod args;
pub mod dispatch;
pub mod error;
pub mod exitcode;
pub mod logging;
pub mod transport;

pub use args::Cli;
pub use dispatch::{dispatch, run};
pub use error::{CliError, CliResult};
