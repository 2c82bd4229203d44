//! Request builder and response renderer for a graph-database REST gateway.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The binary crate executes the
//! actual HTTP round-trip, so everything here is deterministic and testable.
//!
//! # Design
//! - `GraphClient` is stateless; it holds only `base_url`.
//! - One command maps to one request: `build_request` produces it,
//!   `parse_response` consumes the answer, `render_json` formats it for output.
//! - Credentials travel as HTTP Basic auth with the token in the username slot.

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod render;

pub use auth::Credentials;
pub use client::{GraphClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use render::render_json;
