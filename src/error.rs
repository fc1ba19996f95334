//! Error types for the weather pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FeedError {
    /// True for failures of the transport itself (bad status, unreadable body, I/O).
    pub fn is_upstream(&self) -> bool {
        matches!(self, FeedError::Upstream(_) | FeedError::Network(_))
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
