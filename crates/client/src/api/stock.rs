//! Per-symbol stock endpoints.

use crate::client::FinnhubClient;
use crate::error::FinnhubResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stock API (`/quote`, `/stock/*`).
pub struct StockApi<'a> {
    client: &'a FinnhubClient,
}

impl<'a> StockApi<'a> {
    pub(crate) fn new(client: &'a FinnhubClient) -> Self {
        Self { client }
    }

    /// Real-time quote for a symbol.
    pub async fn quote(&self, symbol: &str) -> FinnhubResult<Quote> {
        self.client
            .http
            .get_with_query("quote", &[("symbol", symbol)])
            .await
    }

    /// Company profile (`/stock/profile2`). Unknown symbols yield an empty profile.
    pub async fn profile(&self, symbol: &str) -> FinnhubResult<CompanyProfile> {
        self.client
            .http
            .get_with_query("stock/profile2", &[("symbol", symbol)])
            .await
    }

    /// Basic financials (`/stock/metric`). `metric` is the metric group,
    /// usually `all`.
    pub async fn metrics(&self, symbol: &str, metric: &str) -> FinnhubResult<BasicFinancials> {
        self.client
            .http
            .get_with_query("stock/metric", &[("symbol", symbol), ("metric", metric)])
            .await
    }

    /// Analyst recommendation trends, one entry per monthly period.
    pub async fn recommendations(&self, symbol: &str) -> FinnhubResult<Vec<RecommendationTrend>> {
        self.client
            .http
            .get_with_query("stock/recommendation", &[("symbol", symbol)])
            .await
    }
}

/// Response from `/quote`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "c")]
    pub current_price: Option<f64>,
    #[serde(rename = "d")]
    pub change: Option<f64>,
    #[serde(rename = "dp")]
    pub percent_change: Option<f64>,
    #[serde(rename = "h")]
    pub high: Option<f64>,
    #[serde(rename = "l")]
    pub low: Option<f64>,
    #[serde(rename = "o")]
    pub open: Option<f64>,
    #[serde(rename = "pc")]
    pub previous_close: Option<f64>,
    /// Last trade time (Unix seconds). Zero when Finnhub has no data.
    #[serde(rename = "t")]
    pub timestamp: Option<i64>,
}

/// Response from `/stock/profile2`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub country: Option<String>,
    pub currency: Option<String>,
    pub exchange: Option<String>,
    pub finnhub_industry: Option<String>,
    /// IPO date, `YYYY-MM-DD`
    pub ipo: Option<String>,
    pub logo: Option<String>,
    /// Market capitalization in millions
    pub market_capitalization: Option<f64>,
    pub name: Option<String>,
    pub phone: Option<String>,
    /// Shares outstanding in millions
    pub share_outstanding: Option<f64>,
    pub ticker: Option<String>,
    pub weburl: Option<String>,
}

/// Response from `/stock/metric`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicFinancials {
    pub symbol: Option<String>,
    pub metric_type: Option<String>,
    /// Flat map of metric name to value. Values are mostly numbers but
    /// Finnhub also sends strings (dates) and nulls.
    #[serde(default)]
    pub metric: Map<String, Value>,
    /// Historical series, passed through untouched.
    #[serde(default)]
    pub series: Value,
}

impl BasicFinancials {
    /// Numeric value of a metric, `None` when absent or not a number.
    pub fn metric_f64(&self, name: &str) -> Option<f64> {
        self.metric.get(name).and_then(Value::as_f64)
    }
}

/// One period of `/stock/recommendation`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationTrend {
    pub symbol: Option<String>,
    /// Period start, `YYYY-MM-DD`
    pub period: Option<String>,
    pub strong_buy: Option<i64>,
    pub buy: Option<i64>,
    pub hold: Option<i64>,
    pub sell: Option<i64>,
    pub strong_sell: Option<i64>,
}
