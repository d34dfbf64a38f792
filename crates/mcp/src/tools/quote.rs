// Stock quote tool

use super::{api_key_property, json_schema_object, json_schema_string, parse_arguments, Tool};
use crate::envelope::{epoch_to_iso, now_iso, ErrorEnvelope, ToolFailure, ToolOutcome};
use crate::error::McpResult;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::upstream::Upstream;
use finnhub_mcp_client::Quote;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const NAME: &str = "get_stock_quote";

/// Current price snapshot for one symbol.
pub struct StockQuoteTool {
    upstream: Arc<Upstream>,
}

impl StockQuoteTool {
    pub fn new(upstream: Arc<Upstream>) -> Self {
        Self { upstream }
    }

    async fn fetch(&self, args: &StockQuoteArgs) -> Result<QuoteRecord, ToolFailure> {
        let client = self.upstream.connect(args.api_key.as_deref())?;
        let quote = client.stock().quote(&args.symbol).await?;
        QuoteRecord::from_quote(&args.symbol, quote)
    }
}

#[derive(Debug, Deserialize)]
struct StockQuoteArgs {
    symbol: String,
    #[serde(default)]
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuoteRecord {
    pub symbol: String,
    pub current_price: f64,
    pub change: f64,
    pub percent_change: f64,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub previous_close: f64,
    /// Last trade time; null when Finnhub reports none
    pub timestamp: Option<String>,
    pub retrieved_at: String,
}

impl QuoteRecord {
    fn from_quote(symbol: &str, quote: Quote) -> Result<Self, ToolFailure> {
        let timestamp = match quote.timestamp {
            Some(t) if t != 0 => Some(epoch_to_iso(t)?),
            _ => None,
        };

        Ok(Self {
            symbol: symbol.to_string(),
            current_price: quote.current_price.unwrap_or(0.0),
            change: quote.change.unwrap_or(0.0),
            percent_change: quote.percent_change.unwrap_or(0.0),
            high: quote.high.unwrap_or(0.0),
            low: quote.low.unwrap_or(0.0),
            open: quote.open.unwrap_or(0.0),
            previous_close: quote.previous_close.unwrap_or(0.0),
            timestamp,
            retrieved_at: now_iso(),
        })
    }
}

#[async_trait::async_trait]
impl Tool for StockQuoteTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: "Get current stock quote for a symbol".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "symbol": json_schema_string("Stock symbol, e.g. AAPL"),
                    "api_key": api_key_property(&self.upstream)
                }),
                vec!["symbol"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> McpResult<CallToolResult> {
        let args: StockQuoteArgs = parse_arguments(NAME, arguments)?;
        tracing::info!(tool = NAME, symbol = %args.symbol, "Fetching stock quote");

        ToolOutcome::capture(self.fetch(&args).await, |e| {
            tracing::warn!(
                tool = NAME,
                symbol = %args.symbol,
                error = %e,
                "Stock quote failed"
            );
            ErrorEnvelope::new(format!(
                "Error fetching stock quote for {}: {}",
                args.symbol, e
            ))
            .echo("symbol", args.symbol.as_str())
        })
        .into_call_result()
    }
}
