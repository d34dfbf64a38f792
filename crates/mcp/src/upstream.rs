// Per-call Finnhub client construction

use crate::credentials::CredentialResolver;
use crate::envelope::ToolFailure;
use finnhub_mcp_client::{FinnhubClient, DEFAULT_BASE_URL};
use std::time::Duration;

/// Where and how tools reach Finnhub. Holds no connection state: every call
/// resolves its key and builds a fresh client.
#[derive(Debug, Clone)]
pub struct Upstream {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub credentials: CredentialResolver,
}

impl Upstream {
    pub fn new(base_url: impl Into<String>, credentials: CredentialResolver) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
            credentials,
        }
    }

    /// Resolve the key for this call and build a client bound to it.
    pub fn connect(&self, api_key: Option<&str>) -> Result<FinnhubClient, ToolFailure> {
        let credential = self.credentials.resolve(api_key)?;

        let client = FinnhubClient::builder()
            .base_url(self.base_url.as_str())
            .api_key(credential.expose())
            .maybe_timeout(self.timeout)
            .build()?;

        Ok(client)
    }
}

impl Default for Upstream {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, CredentialResolver::default())
    }
}
