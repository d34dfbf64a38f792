pub mod financials;
pub mod news;
pub mod profile;
pub mod quote;
pub mod recommendations;
mod registry;

pub use financials::BasicFinancialsTool;
pub use news::MarketNewsTool;
pub use profile::CompanyProfileTool;
pub use quote::StockQuoteTool;
pub use recommendations::RecommendationTrendsTool;
pub use registry::{
    json_schema_object, json_schema_string, json_schema_string_with_default, parse_arguments,
    Tool, ToolRegistry,
};

use crate::upstream::Upstream;
use std::sync::Arc;

/// Registry with all five Finnhub tools sharing one upstream description.
pub fn finnhub_tools(upstream: Upstream) -> ToolRegistry {
    let upstream = Arc::new(upstream);
    let mut registry = ToolRegistry::new();

    registry.register(Arc::new(MarketNewsTool::new(upstream.clone())));
    registry.register(Arc::new(StockQuoteTool::new(upstream.clone())));
    registry.register(Arc::new(CompanyProfileTool::new(upstream.clone())));
    registry.register(Arc::new(BasicFinancialsTool::new(upstream.clone())));
    registry.register(Arc::new(RecommendationTrendsTool::new(upstream)));

    registry
}

/// Schema for the optional per-call key every tool accepts.
fn api_key_property(upstream: &Upstream) -> serde_json::Value {
    json_schema_string(&format!(
        "Finnhub API key. Defaults to the {} environment variable",
        upstream.credentials.env_var()
    ))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::credentials::CredentialResolver;
    use crate::upstream::Upstream;
    use std::sync::Arc;
    use wiremock::MockServer;

    /// Environment variable no test ever sets.
    pub const UNSET_ENV: &str = "FINNHUB_MCP_TEST_TOOLS_NEVER_SET";

    pub fn upstream_for(server: &MockServer) -> Arc<Upstream> {
        Arc::new(Upstream::new(server.uri(), CredentialResolver::new(UNSET_ENV)))
    }

    pub fn unreachable_upstream() -> Arc<Upstream> {
        Arc::new(Upstream::new(
            "http://127.0.0.1:9",
            CredentialResolver::new(UNSET_ENV),
        ))
    }

    pub fn parse_text(result: &crate::protocol::CallToolResult) -> serde_json::Value {
        serde_json::from_str(result.first_text().unwrap()).unwrap()
    }
}
