// API key resolution: per-call override first, then the environment

use std::fmt;

/// Environment variable consulted when a call carries no key.
pub const DEFAULT_API_KEY_ENV: &str = "FINNHUB_API_KEY";

/// A Finnhub API key. Lives for a single tool call.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// No key was supplied with the call and none is configured.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{env_var} environment variable is required")]
pub struct MissingCredential {
    pub env_var: String,
}

/// Resolves the key for a call. The environment is read on every call, never
/// cached, so a per-call override always wins and env changes are picked up.
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    env_var: String,
}

impl CredentialResolver {
    pub fn new(env_var: impl Into<String>) -> Self {
        Self {
            env_var: env_var.into(),
        }
    }

    /// Name of the fallback environment variable.
    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    pub fn resolve(&self, override_key: Option<&str>) -> Result<Credential, MissingCredential> {
        if let Some(key) = override_key.filter(|k| !k.is_empty()) {
            return Ok(Credential(key.to_string()));
        }

        match std::env::var(&self.env_var) {
            Ok(key) if !key.is_empty() => Ok(Credential(key)),
            _ => Err(MissingCredential {
                env_var: self.env_var.clone(),
            }),
        }
    }
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::new(DEFAULT_API_KEY_ENV)
    }
}
