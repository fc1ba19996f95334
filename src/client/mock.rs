//! Mock transport for testing
//!
//! Provides canned upstream responses for:
//! - Unit tests without network calls
//! - Integration tests with injected failures
//! - Offline runs against recorded payloads

use super::{FeedTransport, Query};
use crate::error::{FeedError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

/// A request seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub query: Query,
}

impl RecordedRequest {
    /// Look up a query parameter by name
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
enum Canned {
    Json(Value),
    RawBody(String),
    Status(u16),
}

/// Transport that answers from an in-memory route table keyed by URL suffix
pub struct MockTransport {
    routes: Vec<(String, Canned)>,
    requests: Mutex<Vec<RecordedRequest>>,
    simulate_failures: bool,
    latency_ms: u64,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            requests: Mutex::new(Vec::new()),
            simulate_failures: false,
            latency_ms: 0,
        }
    }

    /// Answer requests whose URL ends with `suffix` with `body`
    pub fn with_json(mut self, suffix: &str, body: Value) -> Self {
        self.routes.push((suffix.to_string(), Canned::Json(body)));
        self
    }

    /// Answer with a body that is not JSON
    pub fn with_raw_body(mut self, suffix: &str, body: &str) -> Self {
        self.routes
            .push((suffix.to_string(), Canned::RawBody(body.to_string())));
        self
    }

    /// Answer with a non-success HTTP status
    pub fn with_status(mut self, suffix: &str, status: u16) -> Self {
        self.routes.push((suffix.to_string(), Canned::Status(status)));
        self
    }

    /// Fail every request
    pub fn with_failures(mut self) -> Self {
        self.simulate_failures = true;
        self
    }

    pub fn with_latency(mut self, ms: u64) -> Self {
        self.latency_ms = ms;
        self
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    async fn simulate_latency(&self) {
        if self.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.latency_ms)).await;
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedTransport for MockTransport {
    async fn get_json(&self, url: &str, query: &Query) -> Result<Value> {
        self.requests.lock().push(RecordedRequest {
            url: url.to_string(),
            query: query.clone(),
        });
        self.simulate_latency().await;

        if self.simulate_failures {
            return Err(FeedError::Upstream("Mock failure".into()));
        }

        let canned = self
            .routes
            .iter()
            .find(|(suffix, _)| url.ends_with(suffix.as_str()))
            .map(|(_, canned)| canned.clone());

        match canned {
            Some(Canned::Json(body)) => Ok(body),
            Some(Canned::RawBody(body)) => serde_json::from_str(&body).map_err(|e| {
                FeedError::Upstream(format!("{} returned a non-JSON body: {}", url, e))
            }),
            Some(Canned::Status(status)) => Err(FeedError::Upstream(format!(
                "{} returned HTTP {}",
                url, status
            ))),
            None => Err(FeedError::Upstream(format!("{} returned HTTP 404", url))),
        }
    }
}
