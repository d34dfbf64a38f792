use anyhow::Result;
use clap::Parser;
use finnhub_mcp::McpConfig;
use finnhub_mcp_server::{api, AppState};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "finnhub-mcp-server")]
#[command(about = "Finnhub market data tools over MCP streamable HTTP", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "FINNHUB_MCP_CONFIG", default_value = "finnhub-mcp.toml")]
    config: PathBuf,

    /// Port to listen on
    #[arg(short, long, env = "FINNHUB_MCP_PORT", default_value = "8000")]
    port: u16,

    /// Host to bind to
    #[arg(long, env = "FINNHUB_MCP_HOST", default_value = "0.0.0.0")]
    host: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finnhub_mcp=info,finnhub_mcp_server=info,tower_http=debug".into()),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let args = Args::parse();

    tracing::info!("Starting Finnhub MCP Server");

    let config = McpConfig::load(&args.config)?;
    tracing::info!(
        base_url = %config.finnhub.base_url,
        api_key_env = %config.finnhub.api_key_env,
        "Upstream configured"
    );

    let state = AppState::new(&config);

    let addr = format!("{}:{}", args.host, args.port);
    tracing::info!("Starting API server on {}", addr);

    api::serve(&addr, state).await?;

    Ok(())
}
