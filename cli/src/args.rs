//! CLI argument definitions using clap

use clap::{ArgAction, Parser};
use rexreq_core::DEFAULT_BASE_URL;

/// Perform GET, PUT, POST, and DELETE operations on Rexster
#[derive(Parser, Debug)]
#[command(name = "rexreq")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Any lowercase REST method: get, put, post or delete
    // Validated by the dispatcher, not clap, so a bad command exits with 1.
    pub command: String,

    /// Path to resource, for example '/graphs'
    pub path: String,

    /// Base64-encoded security token
    pub token: String,

    /// Protocol, host, and port to use for Rexster
    #[arg(short, long, env = "REXREQ_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Log to stderr; repeat for more detail (-d, -dd, -ddd)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,
}
