//! Fetch a quote and the latest headlines.
//!
//! Run with: FINNHUB_API_KEY=... cargo run --example quote -- AAPL

use finnhub_mcp_client::{FinnhubClient, FinnhubError, FinnhubResult};

#[tokio::main]
async fn main() -> FinnhubResult<()> {
    tracing_subscriber::fmt::init();

    let api_key = std::env::var("FINNHUB_API_KEY")
        .map_err(|_| FinnhubError::Config("FINNHUB_API_KEY is not set".to_string()))?;
    let symbol = std::env::args().nth(1).unwrap_or_else(|| "AAPL".to_string());

    let client = FinnhubClient::new(api_key)?;

    let quote = client.stock().quote(&symbol).await?;
    println!(
        "{}: {:?} ({:?}%)",
        symbol, quote.current_price, quote.percent_change
    );

    let news = client.news().general("general", "0").await?;
    for article in news.iter().take(5) {
        println!("  - {}", article.headline.as_deref().unwrap_or("(no headline)"));
    }

    Ok(())
}
