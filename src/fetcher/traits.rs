//! Fetcher traits and types

use crate::results::ResultList;
use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Reasons a fetch produced no results.
///
/// These never leave the fetcher; they are logged and mapped to an empty
/// result list.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error: {0}")]
    Status(u16),
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Turns a search URL into a result list.
///
/// Implementations are total: every failure degrades to an empty list.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Perform one GET against `url` and return the decoded items
    async fn fetch(&self, url: &Url) -> ResultList;
}
