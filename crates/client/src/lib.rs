//! # Finnhub client
//!
//! Async client for the subset of the [Finnhub](https://finnhub.io/docs/api)
//! REST API used by the MCP tools: general market news, quotes, company
//! profiles, basic financials and analyst recommendation trends.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use finnhub_mcp_client::{FinnhubClient, FinnhubResult};
//!
//! #[tokio::main]
//! async fn main() -> FinnhubResult<()> {
//!     let client = FinnhubClient::builder()
//!         .api_key("your-finnhub-key")
//!         .build()?;
//!
//!     let quote = client.stock().quote("AAPL").await?;
//!     println!("AAPL last traded at {:?}", quote.current_price);
//!
//!     let news = client.news().general("general", "0").await?;
//!     println!("Fetched {} articles", news.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! The client never retries and never caches. Each request carries the API
//! key in the `X-Finnhub-Token` header.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use api::news::NewsArticle;
pub use api::stock::{BasicFinancials, CompanyProfile, Quote, RecommendationTrend};
pub use client::{FinnhubClient, FinnhubClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{FinnhubError, FinnhubResult};
