// Static MCP resources served alongside the tools

use crate::error::{McpError, McpResult};
use crate::protocol::{ReadResourceResult, ResourceContents, ResourceSchema};

pub const SKILL_URI: &str = "skill://finnhub/usage";

const SKILL_MARKDOWN: &str = include_str!("../resources/finnhub-usage.md");

struct StaticResource {
    uri: &'static str,
    name: &'static str,
    description: &'static str,
    mime_type: &'static str,
    text: &'static str,
}

/// Fixed set of readable resources.
pub struct ResourceCatalog {
    entries: Vec<StaticResource>,
}

impl ResourceCatalog {
    /// Catalog holding the Finnhub usage skill.
    pub fn finnhub() -> Self {
        Self {
            entries: vec![StaticResource {
                uri: SKILL_URI,
                name: "finnhub-usage",
                description: "How to pick and combine the Finnhub tools",
                mime_type: "text/markdown",
                text: SKILL_MARKDOWN,
            }],
        }
    }

    pub fn list(&self) -> Vec<ResourceSchema> {
        self.entries
            .iter()
            .map(|r| ResourceSchema {
                uri: r.uri.to_string(),
                name: r.name.to_string(),
                description: r.description.to_string(),
                mime_type: r.mime_type.to_string(),
            })
            .collect()
    }

    pub fn read(&self, uri: &str) -> McpResult<ReadResourceResult> {
        let resource = self
            .entries
            .iter()
            .find(|r| r.uri == uri)
            .ok_or_else(|| McpError::UnknownResource(uri.to_string()))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents {
                uri: resource.uri.to_string(),
                mime_type: resource.mime_type.to_string(),
                text: resource.text.to_string(),
            }],
        })
    }
}

impl Default for ResourceCatalog {
    fn default() -> Self {
        Self::finnhub()
    }
}
