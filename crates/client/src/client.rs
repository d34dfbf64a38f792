//! Main client for the Finnhub API.

use crate::api::{NewsApi, StockApi};
use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::error::{FinnhubError, FinnhubResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Client for the Finnhub REST API.
#[derive(Debug, Clone)]
pub struct FinnhubClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl FinnhubClient {
    /// Create a client for the public API with the given key.
    pub fn new(api_key: impl Into<String>) -> FinnhubResult<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a new client builder.
    pub fn builder() -> FinnhubClientBuilder {
        FinnhubClientBuilder::new()
    }

    fn from_config(config: ClientConfig) -> FinnhubResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Get the news API.
    pub fn news(&self) -> NewsApi<'_> {
        NewsApi::new(self)
    }

    /// Get the stock API (quotes, profiles, metrics, recommendations).
    pub fn stock(&self) -> StockApi<'_> {
        StockApi::new(self)
    }
}

/// Builder for creating a FinnhubClient.
pub struct FinnhubClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl FinnhubClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: None,
        }
    }

    /// Override the API base URL (defaults to the public endpoint).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the request timeout only when one is given.
    pub fn maybe_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> FinnhubResult<FinnhubClient> {
        let api_key = self
            .api_key
            .ok_or_else(|| FinnhubError::Config("api_key is required".to_string()))?;

        let base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let mut config = ClientConfig::new(base_url, api_key);
        config.timeout = self.timeout;

        FinnhubClient::from_config(config)
    }
}

impl Default for FinnhubClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
