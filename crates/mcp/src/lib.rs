// MCP (Model Context Protocol) adapter for the Finnhub market data API.
// Exposes five tools and a usage skill to agent clients over HTTP or stdio.

pub mod config;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod tools;
pub mod upstream;

pub use config::{FinnhubConfig, McpConfig};
pub use credentials::{Credential, CredentialResolver, MissingCredential, DEFAULT_API_KEY_ENV};
pub use envelope::{ErrorEnvelope, ToolFailure, ToolOutcome};
pub use error::{McpError, McpResult};
pub use resources::{ResourceCatalog, SKILL_URI};
pub use server::{McpServer, SERVER_NAME};
pub use tools::{finnhub_tools, Tool, ToolRegistry};
pub use upstream::Upstream;
