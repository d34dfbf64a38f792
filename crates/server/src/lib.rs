// HTTP transport for the Finnhub MCP server: `POST /mcp` and `GET /health`.

pub mod api;
pub mod config;

pub use api::{create_router, serve};
pub use config::AppState;
