//! Market news endpoints.

use crate::client::FinnhubClient;
use crate::error::FinnhubResult;
use serde::{Deserialize, Serialize};

/// News API (`/news`).
pub struct NewsApi<'a> {
    client: &'a FinnhubClient,
}

impl<'a> NewsApi<'a> {
    pub(crate) fn new(client: &'a FinnhubClient) -> Self {
        Self { client }
    }

    /// Fetch general market news for a category (`general`, `forex`,
    /// `crypto`, `merger`). Only articles with an id above `min_id` are
    /// returned. Finnhub orders the list most recent first.
    pub async fn general(&self, category: &str, min_id: &str) -> FinnhubResult<Vec<NewsArticle>> {
        self.client
            .http
            .get_with_query("news", &[("category", category), ("minId", min_id)])
            .await
    }
}

/// A single news article.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsArticle {
    pub category: Option<String>,
    /// Publish time (Unix seconds)
    pub datetime: Option<i64>,
    pub headline: Option<String>,
    pub id: Option<i64>,
    pub image: Option<String>,
    /// Related symbols, comma separated
    pub related: Option<String>,
    pub source: Option<String>,
    pub summary: Option<String>,
    pub url: Option<String>,
}
