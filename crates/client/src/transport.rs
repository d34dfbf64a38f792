//! HTTP transport layer for the Finnhub client.

use crate::config::ClientConfig;
use crate::error::{FinnhubError, FinnhubResult};
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Header carrying the API key. Keeps the key out of request URLs and logs.
pub const TOKEN_HEADER: &str = "x-finnhub-token";

/// HTTP transport for Finnhub requests. Performs exactly one attempt per call.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> FinnhubResult<Self> {
        let mut token = header::HeaderValue::from_str(&config.api_key)
            .map_err(|_| FinnhubError::Config("Invalid API key format".to_string()))?;
        token.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::HeaderName::from_static(TOKEN_HEADER), token);

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Build a URL for the given path, relative to the configured base.
    fn build_url(&self, path: &str) -> FinnhubResult<url::Url> {
        Ok(self.config.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Execute a GET request with query parameters and decode the JSON body.
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> FinnhubResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request");

        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "Finnhub returned an error status");
            return Err(FinnhubError::from_response(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}
