//! Configuration types for the Finnhub client.

use std::time::Duration;
use url::Url;

/// Public Finnhub REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://finnhub.io/api/v1/";

/// Configuration for the Finnhub client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Finnhub API. Always ends with `/`.
    pub base_url: Url,
    /// API key sent with every request.
    pub api_key: String,
    /// Request timeout. `None` keeps the HTTP library's default.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a new configuration for the given base URL and key.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url: with_trailing_slash(base_url),
            api_key: api_key.into(),
            timeout: None,
        }
    }
}

// `Url::join` replaces the last path segment unless the base ends with '/'.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
