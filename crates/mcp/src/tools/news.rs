// Market news tool

use super::{
    api_key_property, json_schema_object, json_schema_string_with_default, parse_arguments, Tool,
};
use crate::envelope::{epoch_to_iso, now_iso, ErrorEnvelope, ToolFailure, ToolOutcome};
use crate::error::McpResult;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::upstream::Upstream;
use finnhub_mcp_client::NewsArticle;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const NAME: &str = "get_market_news";

/// Articles kept from the upstream list, which is ordered most recent first.
pub const MAX_ARTICLES: usize = 10;

/// Latest general market news for a category.
pub struct MarketNewsTool {
    upstream: Arc<Upstream>,
}

impl MarketNewsTool {
    pub fn new(upstream: Arc<Upstream>) -> Self {
        Self { upstream }
    }

    async fn fetch(&self, args: &MarketNewsArgs) -> Result<NewsRecord, ToolFailure> {
        let client = self.upstream.connect(args.api_key.as_deref())?;
        let articles = client.news().general(&args.category, &args.min_id).await?;
        NewsRecord::from_articles(&args.category, articles)
    }
}

#[derive(Debug, Deserialize)]
struct MarketNewsArgs {
    #[serde(default = "default_category")]
    category: String,
    #[serde(default = "default_min_id")]
    min_id: String,
    #[serde(default)]
    api_key: Option<String>,
}

fn default_category() -> String {
    "general".to_string()
}

fn default_min_id() -> String {
    "0".to_string()
}

#[derive(Debug, Serialize)]
pub struct NewsRecord {
    pub news: Vec<ArticleRecord>,
    pub category: String,
    pub count: usize,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ArticleRecord {
    pub headline: String,
    pub summary: String,
    pub url: String,
    pub datetime: String,
    pub source: String,
    pub category: String,
}

impl NewsRecord {
    fn from_articles(category: &str, articles: Vec<NewsArticle>) -> Result<Self, ToolFailure> {
        let news = articles
            .into_iter()
            .take(MAX_ARTICLES)
            .map(ArticleRecord::from_article)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            count: news.len(),
            news,
            category: category.to_string(),
            timestamp: now_iso(),
        })
    }
}

impl ArticleRecord {
    fn from_article(article: NewsArticle) -> Result<Self, ToolFailure> {
        Ok(Self {
            headline: article.headline.unwrap_or_default(),
            summary: article.summary.unwrap_or_default(),
            url: article.url.unwrap_or_default(),
            datetime: epoch_to_iso(article.datetime.unwrap_or(0))?,
            source: article.source.unwrap_or_default(),
            category: article.category.unwrap_or_default(),
        })
    }
}

#[async_trait::async_trait]
impl Tool for MarketNewsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: "Get latest market news from Finnhub".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "category": json_schema_string_with_default(
                        "News category: general, forex, crypto or merger",
                        "general"
                    ),
                    "min_id": json_schema_string_with_default(
                        "Only return articles with an id greater than this",
                        "0"
                    ),
                    "api_key": api_key_property(&self.upstream)
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> McpResult<CallToolResult> {
        let args: MarketNewsArgs = parse_arguments(NAME, arguments)?;
        tracing::info!(
            tool = NAME,
            category = %args.category,
            min_id = %args.min_id,
            "Fetching market news"
        );

        ToolOutcome::capture(self.fetch(&args).await, |e| {
            tracing::warn!(
                tool = NAME,
                category = %args.category,
                error = %e,
                "Market news failed"
            );
            ErrorEnvelope::new(format!("Error fetching market news: {}", e))
                .echo("category", args.category.as_str())
        })
        .into_call_result()
    }
}
