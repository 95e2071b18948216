//! HTTP request handlers for the monitor API.
//!
//! - `auth` - bearer API key check in front of every route
//! - `common` - response envelope shared by every handler
//! - `sessions` - activate, deactivate and inspect monitoring sessions
//! - `node` - on-demand reports, metrics and service control

pub mod auth;
pub mod common;
pub mod node;
pub mod sessions;

pub use auth::{require_api_key, validate_api_key};
pub use node::*;
pub use sessions::*;
