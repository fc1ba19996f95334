//! Upstream feed transport
//!
//! This module provides the HTTP seam used by the source adapters:
//! - `FeedTransport`: the trait every adapter talks to
//! - `HttpTransport`: reqwest-backed implementation for the NASA APIs
//! - `MockTransport`: canned responses for tests and offline runs

mod http;
pub mod mock;
#[cfg(test)]
mod tests;

pub use http::HttpTransport;
pub use mock::MockTransport;

use crate::error::Result;
use async_trait::async_trait;

/// Query string as owned key/value pairs
pub type Query = Vec<(String, String)>;

/// Issues a GET and parses the body as JSON.
///
/// Implementations must map a non-success status or an unparseable body to
/// `FeedError::Upstream` (or `FeedError::Network`); shape validation is left
/// to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedTransport: Send + Sync {
    async fn get_json(&self, url: &str, query: &Query) -> Result<serde_json::Value>;
}
