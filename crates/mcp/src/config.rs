// Configuration for the Finnhub tools, loaded from an optional TOML file

use crate::credentials::{CredentialResolver, DEFAULT_API_KEY_ENV};
use crate::upstream::Upstream;
use anyhow::{Context, Result};
use finnhub_mcp_client::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct McpConfig {
    #[serde(default)]
    pub finnhub: FinnhubConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinnhubConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable holding the fallback API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Upstream request timeout; unset leaves the HTTP client default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

impl Default for FinnhubConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: None,
        }
    }
}

impl McpConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        // Load config file if it exists, otherwise use defaults
        if !config_path.exists() {
            tracing::info!(
                "Configuration file {} not found, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(config_path).context("Failed to read configuration file")?;
        toml::from_str(&content).context("Failed to parse configuration file")
    }

    /// Upstream settings the tools build their per-call clients from.
    pub fn upstream(&self) -> Upstream {
        Upstream {
            base_url: self.finnhub.base_url.clone(),
            timeout: self.finnhub.timeout_secs.map(Duration::from_secs),
            credentials: CredentialResolver::new(&self.finnhub.api_key_env),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = McpConfig::load(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.finnhub.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.finnhub.api_key_env, "FINNHUB_API_KEY");
        assert!(config.finnhub.timeout_secs.is_none());
    }

    #[test]
    fn test_load_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[finnhub]\nbase_url = \"http://localhost:9000\"\napi_key_env = \"MY_KEY\"\ntimeout_secs = 5"
        )
        .unwrap();

        let config = McpConfig::load(file.path()).unwrap();
        let upstream = config.upstream();

        assert_eq!(upstream.base_url, "http://localhost:9000");
        assert_eq!(upstream.timeout, Some(Duration::from_secs(5)));
        assert_eq!(upstream.credentials.env_var(), "MY_KEY");
    }

    #[test]
    fn test_partial_table_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[finnhub]\ntimeout_secs = 10").unwrap();

        let config = McpConfig::load(file.path()).unwrap();
        assert_eq!(config.finnhub.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.finnhub.timeout_secs, Some(10));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[finnhub\nbase_url = ").unwrap();

        assert!(McpConfig::load(file.path()).is_err());
    }
}
