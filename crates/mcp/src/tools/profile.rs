// Company profile tool

use super::{api_key_property, json_schema_object, json_schema_string, parse_arguments, Tool};
use crate::envelope::{now_iso, ErrorEnvelope, ToolFailure, ToolOutcome};
use crate::error::McpResult;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::upstream::Upstream;
use finnhub_mcp_client::CompanyProfile;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const NAME: &str = "get_company_profile";

pub struct CompanyProfileTool {
    upstream: Arc<Upstream>,
}

impl CompanyProfileTool {
    pub fn new(upstream: Arc<Upstream>) -> Self {
        Self { upstream }
    }

    async fn fetch(&self, args: &CompanyProfileArgs) -> Result<ProfileRecord, ToolFailure> {
        let client = self.upstream.connect(args.api_key.as_deref())?;
        let profile = client.stock().profile(&args.symbol).await?;
        Ok(ProfileRecord::from_profile(&args.symbol, profile))
    }
}

#[derive(Debug, Deserialize)]
struct CompanyProfileArgs {
    symbol: String,
    #[serde(default)]
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileRecord {
    pub symbol: String,
    pub name: String,
    pub country: String,
    pub currency: String,
    pub exchange: String,
    pub industry: String,
    pub logo: String,
    pub market_cap: f64,
    pub phone: String,
    pub share_outstanding: f64,
    pub ticker: String,
    pub web_url: String,
    pub ipo_date: String,
    pub retrieved_at: String,
}

impl ProfileRecord {
    fn from_profile(symbol: &str, profile: CompanyProfile) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: profile.name.unwrap_or_default(),
            country: profile.country.unwrap_or_default(),
            currency: profile.currency.unwrap_or_default(),
            exchange: profile.exchange.unwrap_or_default(),
            industry: profile.finnhub_industry.unwrap_or_default(),
            logo: profile.logo.unwrap_or_default(),
            market_cap: profile.market_capitalization.unwrap_or(0.0),
            phone: profile.phone.unwrap_or_default(),
            share_outstanding: profile.share_outstanding.unwrap_or(0.0),
            ticker: profile.ticker.unwrap_or_default(),
            web_url: profile.weburl.unwrap_or_default(),
            ipo_date: profile.ipo.unwrap_or_default(),
            retrieved_at: now_iso(),
        }
    }
}

#[async_trait::async_trait]
impl Tool for CompanyProfileTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: "Get company profile information for a stock symbol".to_string(),
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
        let args: CompanyProfileArgs = parse_arguments(NAME, arguments)?;
        tracing::info!(tool = NAME, symbol = %args.symbol, "Fetching company profile");

        ToolOutcome::capture(self.fetch(&args).await, |e| {
            tracing::warn!(
                tool = NAME,
                symbol = %args.symbol,
                error = %e,
                "Company profile failed"
            );
            ErrorEnvelope::new(format!(
                "Error fetching company profile for {}: {}",
                args.symbol, e
            ))
            .echo("symbol", args.symbol.as_str())
        })
        .into_call_result()
    }
}
