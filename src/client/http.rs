//! reqwest-backed transport

use super::{FeedTransport, Query};
use crate::config::HttpConfig;
use crate::error::{FeedError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// HTTP transport shared by both feeds
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Create a new transport
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http })
    }
}

#[async_trait]
impl FeedTransport for HttpTransport {
    async fn get_json(&self, url: &str, query: &Query) -> Result<serde_json::Value> {
        debug!("GET {}", url);
        let resp = self.http.get(url).query(query).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Upstream(format!("{} returned HTTP {}", url, status)));
        }

        let body = resp.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| FeedError::Upstream(format!("{} returned a non-JSON body: {}", url, e)))
    }
}
