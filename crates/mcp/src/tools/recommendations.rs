// Analyst recommendation trends tool

use super::{api_key_property, json_schema_object, json_schema_string, parse_arguments, Tool};
use crate::envelope::{now_iso, ErrorEnvelope, ToolFailure, ToolOutcome};
use crate::error::McpResult;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::upstream::Upstream;
use finnhub_mcp_client::RecommendationTrend;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const NAME: &str = "get_recommendation_trends";

pub struct RecommendationTrendsTool {
    upstream: Arc<Upstream>,
}

impl RecommendationTrendsTool {
    pub fn new(upstream: Arc<Upstream>) -> Self {
        Self { upstream }
    }

    async fn fetch(&self, args: &RecommendationArgs) -> Result<RecommendationRecord, ToolFailure> {
        let client = self.upstream.connect(args.api_key.as_deref())?;
        let trends = client.stock().recommendations(&args.symbol).await?;
        Ok(RecommendationRecord::from_trends(&args.symbol, trends))
    }
}

#[derive(Debug, Deserialize)]
struct RecommendationArgs {
    symbol: String,
    #[serde(default)]
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationRecord {
    pub symbol: String,
    pub recommendations: Vec<PeriodRecord>,
    pub periods_available: usize,
    pub retrieved_at: String,
}

#[derive(Debug, Serialize)]
pub struct PeriodRecord {
    pub period: String,
    pub strong_buy: i64,
    pub buy: i64,
    pub hold: i64,
    pub sell: i64,
    pub strong_sell: i64,
}

impl From<RecommendationTrend> for PeriodRecord {
    fn from(trend: RecommendationTrend) -> Self {
        Self {
            period: trend.period.unwrap_or_default(),
            strong_buy: trend.strong_buy.unwrap_or(0),
            buy: trend.buy.unwrap_or(0),
            hold: trend.hold.unwrap_or(0),
            sell: trend.sell.unwrap_or(0),
            strong_sell: trend.strong_sell.unwrap_or(0),
        }
    }
}

impl RecommendationRecord {
    fn from_trends(symbol: &str, trends: Vec<RecommendationTrend>) -> Self {
        let recommendations: Vec<PeriodRecord> = trends.into_iter().map(Into::into).collect();

        Self {
            symbol: symbol.to_string(),
            periods_available: recommendations.len(),
            recommendations,
            retrieved_at: now_iso(),
        }
    }
}

#[async_trait::async_trait]
impl Tool for RecommendationTrendsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: "Get analyst recommendation trends for a stock".to_string(),
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
        let args: RecommendationArgs = parse_arguments(NAME, arguments)?;
        tracing::info!(tool = NAME, symbol = %args.symbol, "Fetching recommendation trends");

        ToolOutcome::capture(self.fetch(&args).await, |e| {
            tracing::warn!(
                tool = NAME,
                symbol = %args.symbol,
                error = %e,
                "Recommendation trends failed"
            );
            ErrorEnvelope::new(format!(
                "Error fetching recommendation trends for {}: {}",
                args.symbol, e
            ))
            .echo("symbol", args.symbol.as_str())
        })
        .into_call_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{parse_text, unreachable_upstream, upstream_for, UNSET_ENV};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_every_period_is_kept() {
        let server = MockServer::start().await;

        let periods: Vec<serde_json::Value> = (1..=12)
            .map(|month| {
                serde_json::json!({
                    "symbol": "AAPL",
                    "period": format!("2024-{:02}-01", month),
                    "strongBuy": month,
                    "buy": 20,
                    "hold": 8,
                    "sell": 1,
                    "strongSell": 0
                })
            })
            .collect();

        Mock::given(method("GET"))
            .and(path("/stock/recommendation"))
            .and(query_param("symbol", "AAPL"))
            .respond_with(ResponseTemplate::new(200).set_body_json(periods))
            .expect(1)
            .mount(&server)
            .await;

        let tool = RecommendationTrendsTool::new(upstream_for(&server));
        let result = tool
            .execute(serde_json::json!({"symbol": "AAPL", "api_key": "k"}))
            .await
            .unwrap();
        let data = parse_text(&result);

        assert_eq!(data["periods_available"], 12);
        assert_eq!(data["recommendations"].as_array().unwrap().len(), 12);
        assert_eq!(data["recommendations"][0]["period"], "2024-01-01");
        assert_eq!(data["recommendations"][0]["strong_buy"], 1);
        assert_eq!(data["recommendations"][11]["strong_buy"], 12);
        assert_eq!(data["recommendations"][0]["strong_sell"], 0);
    }

    #[tokio::test]
    async fn test_missing_counts_default_to_zero() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stock/recommendation"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"period": "2024-01-01", "buy": 3}])),
            )
            .mount(&server)
            .await;

        let tool = RecommendationTrendsTool::new(upstream_for(&server));
        let result = tool
            .execute(serde_json::json!({"symbol": "AAPL", "api_key": "k"}))
            .await
            .unwrap();
        let period = &parse_text(&result)["recommendations"][0];

        assert_eq!(period["buy"], 3);
        assert_eq!(period["hold"], 0);
        assert_eq!(period["strong_sell"], 0);
    }

    #[tokio::test]
    async fn test_missing_credential_yields_envelope() {
        let tool = RecommendationTrendsTool::new(unreachable_upstream());
        let result = tool
            .execute(serde_json::json!({"symbol": "TSLA"}))
            .await
            .unwrap();
        let data = parse_text(&result);

        assert!(data["error"].as_str().unwrap().contains(UNSET_ENV));
        assert_eq!(data["symbol"], "TSLA");
        assert!(data.get("recommendations").is_none());
    }
}
