// Finnhub MCP server over stdio

use anyhow::Result;
use finnhub_mcp::{McpConfig, McpServer};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = std::env::var("FINNHUB_MCP_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("finnhub-mcp.toml"));
    let config = McpConfig::load(&config_path)?;

    tracing::info!(
        base_url = %config.finnhub.base_url,
        api_key_env = %config.finnhub.api_key_env,
        "Finnhub MCP server starting"
    );

    let server = McpServer::from_config(&config);
    tracing::info!("Registered {} tools", server.registry().len());

    server.serve_stdio().await
}
