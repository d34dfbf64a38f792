use finnhub_mcp::{McpConfig, McpServer};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub mcp: Arc<McpServer>,
}

impl AppState {
    pub fn new(config: &McpConfig) -> Self {
        Self::with_server(McpServer::from_config(config))
    }

    pub fn with_server(server: McpServer) -> Self {
        Self {
            mcp: Arc::new(server),
        }
    }
}
