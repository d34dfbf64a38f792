// JSON-RPC dispatcher shared by the HTTP and stdio transports

use crate::config::McpConfig;
use crate::error::{McpError, McpResult};
use crate::protocol::*;
use crate::resources::{ResourceCatalog, SKILL_URI};
use crate::tools::{finnhub_tools, ToolRegistry};
use anyhow::{Context, Result};
use bytes::BytesMut;
use futures::{SinkExt, StreamExt};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{Decoder, FramedRead, FramedWrite, LinesCodec, LinesCodecError};

pub const SERVER_NAME: &str = "Finnhub MCP Server";

/// Longest stdio message accepted, in bytes.
pub const MAX_LINE_LENGTH: usize = 8 * 1024 * 1024;

/// Server-level guidance returned from `initialize`.
pub fn instructions() -> String {
    format!(
        "Finnhub market data tools: quotes, company profiles, basic financials, \
         analyst recommendation trends and market news. Read the {} resource \
         for guidance on which tool to use.",
        SKILL_URI
    )
}

pub struct McpServer {
    registry: ToolRegistry,
    resources: ResourceCatalog,
}

impl McpServer {
    pub fn new(registry: ToolRegistry, resources: ResourceCatalog) -> Self {
        Self {
            registry,
            resources,
        }
    }

    /// Server with the five Finnhub tools and the usage skill.
    pub fn from_config(config: &McpConfig) -> Self {
        Self::new(finnhub_tools(config.upstream()), ResourceCatalog::finnhub())
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one raw message. Returns `None` when no reply is due.
    pub async fn handle_text(&self, text: &str) -> Option<JsonRpcResponse> {
        self.handle_bytes(text.as_bytes()).await
    }

    /// Like [`handle_text`](Self::handle_text), for bodies that may not be UTF-8.
    pub async fn handle_bytes(&self, bytes: &[u8]) -> Option<JsonRpcResponse> {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(message) => self.handle_message(message).await,
            Err(e) => {
                tracing::debug!(error = %e, "Unparseable JSON-RPC message");
                Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()))
            }
        }
    }

    /// Handle one decoded message. Notifications and client responses get no reply.
    pub async fn handle_message(&self, message: Value) -> Option<JsonRpcResponse> {
        let id = message.get("id").cloned().unwrap_or(Value::Null);

        if message.get("method").is_none() {
            if message.get("result").is_some() || message.get("error").is_some() {
                tracing::debug!("Ignoring client response");
                return None;
            }
            return Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request("missing method"),
            ));
        }

        let request: JsonRpcRequest = match serde_json::from_value(message) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_request(e.to_string()),
                ))
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request(format!(
                    "unsupported jsonrpc version: {}",
                    request.jsonrpc
                )),
            ));
        }

        let id = match request.id {
            Some(id) if !id.is_null() => id,
            _ => {
                tracing::debug!(method = %request.method, "Notification received");
                return None;
            }
        };

        let response = match self.dispatch(&request.method, request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                tracing::debug!(method = %request.method, error = %e, "Request failed");
                JsonRpcResponse::error(id, e.into())
            }
        };

        Some(response)
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> McpResult<Value> {
        match method {
            "initialize" => {
                let params: InitializeParams = parse_params(params)?;
                if let Some(client) = &params.client_info {
                    tracing::info!(client = %client.name, version = %client.version, "Client connected");
                }

                let result = InitializeResult {
                    protocol_version: negotiate_version(params.protocol_version.as_deref())
                        .to_string(),
                    capabilities: ServerCapabilities {
                        tools: Some(ToolsCapability {
                            list_changed: false,
                        }),
                        resources: Some(ResourcesCapability {
                            subscribe: false,
                            list_changed: false,
                        }),
                    },
                    server_info: ServerInfo {
                        name: SERVER_NAME.to_string(),
                        version: env!("CARGO_PKG_VERSION").to_string(),
                    },
                    instructions: Some(instructions()),
                };
                Ok(serde_json::to_value(result)?)
            }
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => {
                let result = ListToolsResult {
                    tools: self.registry.list_schemas(),
                };
                Ok(serde_json::to_value(result)?)
            }
            "tools/call" => {
                let params: CallToolParams = required_params(params)?;
                let result = self.registry.call(&params.name, params.arguments).await?;
                Ok(serde_json::to_value(result)?)
            }
            "resources/list" => {
                let result = ListResourcesResult {
                    resources: self.resources.list(),
                };
                Ok(serde_json::to_value(result)?)
            }
            "resources/read" => {
                let params: ReadResourceParams = required_params(params)?;
                Ok(serde_json::to_value(self.resources.read(&params.uri)?)?)
            }
            other => Err(McpError::MethodNotFound(other.to_string())),
        }
    }

    /// Serve newline-delimited JSON-RPC until the reader closes.
    pub async fn serve_lines<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        self.serve_framed(reader, writer, MAX_LINE_LENGTH).await
    }

    async fn serve_framed<R, W>(&self, reader: R, writer: W, max_length: usize) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut frames = FramedRead::new(reader, MessageCodec::new(max_length));
        let mut sink = FramedWrite::new(writer, LinesCodec::new());

        while let Some(frame) = frames.next().await {
            let reply = match frame.context("Failed to read message")? {
                Frame::Line(line) if line.trim().is_empty() => continue,
                Frame::Line(line) => self.handle_text(&line).await,
                Frame::Malformed(reason) => {
                    tracing::debug!(%reason, "Unreadable stdio message");
                    Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()))
                }
            };

            if let Some(response) = reply {
                let encoded =
                    serde_json::to_string(&response).context("Failed to encode response")?;
                sink.send(encoded).await.context("Failed to write response")?;
            }
        }

        tracing::info!("Input closed, stopping");
        Ok(())
    }

    /// Serve over the process's stdin and stdout.
    pub async fn serve_stdio(&self) -> Result<()> {
        tracing::info!(tools = self.registry.len(), "MCP stdio server started");
        self.serve_lines(tokio::io::stdin(), tokio::io::stdout()).await
    }
}

/// One stdio line, or a line that could not be read as text.
#[derive(Debug)]
enum Frame {
    Line(String),
    Malformed(String),
}

/// `LinesCodec` that reports undecodable or oversized lines as frames, so
/// one bad line does not end the stream.
struct MessageCodec {
    lines: LinesCodec,
}

impl MessageCodec {
    fn new(max_length: usize) -> Self {
        Self {
            lines: LinesCodec::new_with_max_length(max_length),
        }
    }

    fn recover(
        result: Result<Option<String>, LinesCodecError>,
    ) -> Result<Option<Frame>, LinesCodecError> {
        match result {
            Ok(line) => Ok(line.map(Frame::Line)),
            Err(LinesCodecError::MaxLineLengthExceeded) => {
                Ok(Some(Frame::Malformed("line too long".to_string())))
            }
            // The offending line has already been consumed from the buffer
            Err(LinesCodecError::Io(e)) if e.kind() == std::io::ErrorKind::InvalidData => {
                Ok(Some(Frame::Malformed(e.to_string())))
            }
            Err(e) => Err(e),
        }
    }
}

impl Decoder for MessageCodec {
    type Item = Frame;
    type Error = LinesCodecError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Frame>, LinesCodecError> {
        Self::recover(self.lines.decode(buf))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Frame>, LinesCodecError> {
        Self::recover(self.lines.decode_eof(buf))
    }
}

fn parse_params<T: DeserializeOwned + Default>(params: Option<Value>) -> McpResult<T> {
    match params {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => {
            serde_json::from_value(value).map_err(|e| McpError::InvalidParams(e.to_string()))
        }
    }
}

fn required_params<T: DeserializeOwned>(params: Option<Value>) -> McpResult<T> {
    let value = params.ok_or_else(|| McpError::InvalidParams("missing params".to_string()))?;
    serde_json::from_value(value).map_err(|e| McpError::InvalidParams(e.to_string()))
}
