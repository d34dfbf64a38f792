// Protocol-level errors. These surface as JSON-RPC errors, unlike tool
// failures which are reported inside a successful tool result.

use crate::protocol::{error_codes, JsonRpcError};

#[derive(Debug, thiserror::Error)]
pub enum McpError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    /// JSON-RPC error code for this error.
    pub fn code(&self) -> i32 {
        match self {
            Self::UnknownTool(_)
            | Self::InvalidArguments { .. }
            | Self::InvalidParams(_)
            | Self::UnknownResource(_) => error_codes::INVALID_PARAMS,
            Self::MethodNotFound(_) => error_codes::METHOD_NOT_FOUND,
            Self::Json(_) => error_codes::INTERNAL_ERROR,
        }
    }
}

impl From<McpError> for JsonRpcError {
    fn from(err: McpError) -> Self {
        JsonRpcError::custom(err.code(), err.to_string())
    }
}

pub type McpResult<T> = Result<T, McpError>;
