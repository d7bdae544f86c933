//! iTunes Search API fetcher
//!
//! Issues a GET against the search URL and decodes `{ "results": [...] }`.

use super::traits::*;
use crate::network::HttpClient;
use crate::results::{ResultList, SearchResponse};
use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

/// Fetcher backed by the shared HTTP client
#[derive(Clone)]
pub struct ItunesFetcher {
    client: HttpClient,
}

impl ItunesFetcher {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Fetch and decode, reporting why nothing came back
    pub async fn try_fetch(&self, url: &Url) -> Result<SearchResponse, FetchError> {
        let response = self.client.get(url).await?;

        if !response.is_success() {
            return Err(FetchError::Status(response.status));
        }

        Ok(response.json()?)
    }
}

#[async_trait]
impl Fetcher for ItunesFetcher {
    async fn fetch(&self, url: &Url) -> ResultList {
        match self.try_fetch(url).await {
            Ok(response) => {
                debug!("Fetched {} results from {}", response.results.len(), url);
                response.into_result_list()
            }
            Err(e) => {
                warn!("Fetch failed for {}: {}", url, e);
                ResultList::new()
            }
        }
    }
}
