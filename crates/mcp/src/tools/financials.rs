// Basic financials tool

use super::{
    api_key_property, json_schema_object, json_schema_string, json_schema_string_with_default,
    parse_arguments, Tool,
};
use crate::envelope::{now_iso, ErrorEnvelope, ToolFailure, ToolOutcome};
use crate::error::McpResult;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::upstream::Upstream;
use finnhub_mcp_client::BasicFinancials;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const NAME: &str = "get_basic_financials";

/// Metric group requested upstream. The key metrics span several groups, so
/// the full set is always fetched.
const METRIC_GROUP: &str = "all";

pub struct BasicFinancialsTool {
    upstream: Arc<Upstream>,
}

impl BasicFinancialsTool {
    pub fn new(upstream: Arc<Upstream>) -> Self {
        Self { upstream }
    }

    async fn fetch(&self, args: &BasicFinancialsArgs) -> Result<FinancialsRecord, ToolFailure> {
        let client = self.upstream.connect(args.api_key.as_deref())?;
        let financials = client.stock().metrics(&args.symbol, METRIC_GROUP).await?;
        Ok(FinancialsRecord::from_financials(&args.symbol, &financials))
    }
}

#[derive(Debug, Deserialize)]
struct BasicFinancialsArgs {
    symbol: String,
    #[serde(default = "default_metric")]
    metric: String,
    #[serde(default)]
    api_key: Option<String>,
}

fn default_metric() -> String {
    METRIC_GROUP.to_string()
}

#[derive(Debug, Serialize)]
pub struct FinancialsRecord {
    pub symbol: String,
    pub key_metrics: KeyMetrics,
    pub all_metrics_available: bool,
    pub total_metrics: usize,
    pub retrieved_at: String,
}

/// Selected ratios; null when Finnhub does not report them.
#[derive(Debug, Serialize)]
pub struct KeyMetrics {
    #[serde(rename = "52_week_high")]
    pub week_52_high: Option<f64>,
    #[serde(rename = "52_week_low")]
    pub week_52_low: Option<f64>,
    pub beta: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub eps: Option<f64>,
    pub market_cap: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub roe: Option<f64>,
    pub roa: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub current_ratio: Option<f64>,
    pub gross_margin: Option<f64>,
    pub operating_margin: Option<f64>,
    pub net_margin: Option<f64>,
}

impl KeyMetrics {
    fn from_financials(financials: &BasicFinancials) -> Self {
        let m = |name: &str| financials.metric_f64(name);

        Self {
            week_52_high: m("52WeekHigh"),
            week_52_low: m("52WeekLow"),
            beta: m("beta"),
            pe_ratio: m("peBasicExclExtraTTM"),
            eps: m("epsBasicExclExtraTTM"),
            market_cap: m("marketCapitalization"),
            dividend_yield: m("currentDividendYieldTTM"),
            roe: m("roeTTM"),
            roa: m("roaTTM"),
            debt_to_equity: m("totalDebt/totalEquityQuarterly"),
            current_ratio: m("currentRatioQuarterly"),
            gross_margin: m("grossMarginTTM"),
            operating_margin: m("operatingMarginTTM"),
            net_margin: m("netProfitMarginTTM"),
        }
    }
}

impl FinancialsRecord {
    fn from_financials(symbol: &str, financials: &BasicFinancials) -> Self {
        let total_metrics = financials.metric.len();

        Self {
            symbol: symbol.to_string(),
            key_metrics: KeyMetrics::from_financials(financials),
            all_metrics_available: total_metrics > 0,
            total_metrics,
            retrieved_at: now_iso(),
        }
    }
}

#[async_trait::async_trait]
impl Tool for BasicFinancialsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: "Get basic financial metrics for a company".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "symbol": json_schema_string("Stock symbol, e.g. AAPL"),
                    "metric": json_schema_string_with_default(
                        "Metric group. The full set is always fetched",
                        METRIC_GROUP
                    ),
                    "api_key": api_key_property(&self.upstream)
                }),
                vec!["symbol"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> McpResult<CallToolResult> {
        let args: BasicFinancialsArgs = parse_arguments(NAME, arguments)?;
        tracing::info!(
            tool = NAME,
            symbol = %args.symbol,
            requested_metric = %args.metric,
            "Fetching basic financials"
        );

        ToolOutcome::capture(self.fetch(&args).await, |e| {
            tracing::warn!(
                tool = NAME,
                symbol = %args.symbol,
                error = %e,
                "Basic financials failed"
            );
            ErrorEnvelope::new(format!(
                "Error fetching basic financials for {}: {}",
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
    async fn test_key_metrics_projection() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stock/metric"))
            .and(query_param("symbol", "AAPL"))
            .and(query_param("metric", "all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "symbol": "AAPL",
                "metricType": "all",
                "metric": {
                    "52WeekHigh": 199.62,
                    "52WeekLow": 164.08,
                    "52WeekHighDate": "2023-12-14",
                    "beta": 1.29,
                    "peBasicExclExtraTTM": 30.1,
                    "totalDebt/totalEquityQuarterly": 1.45,
                    "netProfitMarginTTM": 25.3
                },
                "series": {}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tool = BasicFinancialsTool::new(upstream_for(&server));
        let result = tool
            .execute(serde_json::json!({"symbol": "AAPL", "metric": "price", "api_key": "k"}))
            .await
            .unwrap();
        let data = parse_text(&result);
        let metrics = &data["key_metrics"];

        assert_eq!(data["symbol"], "AAPL");
        assert_eq!(metrics["52_week_high"], 199.62);
        assert_eq!(metrics["52_week_low"], 164.08);
        assert_eq!(metrics["beta"], 1.29);
        assert_eq!(metrics["pe_ratio"], 30.1);
        assert_eq!(metrics["debt_to_equity"], 1.45);
        assert_eq!(metrics["net_margin"], 25.3);
        assert!(metrics["roe"].is_null());
        assert!(metrics["dividend_yield"].is_null());
        assert_eq!(metrics.as_object().unwrap().len(), 14);
        assert_eq!(data["total_metrics"], 7);
        assert_eq!(data["all_metrics_available"], true);
    }

    #[tokio::test]
    async fn test_empty_metrics() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stock/metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let tool = BasicFinancialsTool::new(upstream_for(&server));
        let result = tool
            .execute(serde_json::json!({"symbol": "ZZZZ", "api_key": "k"}))
            .await
            .unwrap();
        let data = parse_text(&result);

        assert_eq!(data["total_metrics"], 0);
        assert_eq!(data["all_metrics_available"], false);
        assert!(data["key_metrics"]["beta"].is_null());
    }

    #[tokio::test]
    async fn test_missing_credential_yields_envelope() {
        let tool = BasicFinancialsTool::new(unreachable_upstream());
        let result = tool
            .execute(serde_json::json!({"symbol": "AAPL"}))
            .await
            .unwrap();
        let data = parse_text(&result);

        assert!(data["error"]
            .as_str()
            .unwrap()
            .starts_with("Error fetching basic financials for AAPL: "));
        assert!(data["error"].as_str().unwrap().contains(UNSET_ENV));
        assert!(data.get("key_metrics").is_none());
    }
}
