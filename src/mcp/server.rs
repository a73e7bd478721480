use crate::app::App;
use crate::errors::{ErrorCode, McpError, ToolError, ToolErrorKind};
use crate::mcp::catalog::{list_tools, validate_tool_args};
use crate::mcp::protocol::{CallToolResult, JsonRpcRequest, JsonRpcResponse};
use crate::services::config::{load_env_file, ClockodoConfig};
use crate::utils::tool_errors::render_tool_error;
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};

const PROTOCOL_VERSION: &str = "2025-06-18";
const SERVER_NAME: &str = "clockodo";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct McpServer {
    app: Arc<App>,
}

impl McpServer {
    pub fn new(app: App) -> Self {
        Self { app: Arc::new(app) }
    }

    pub fn from_config(config: ClockodoConfig) -> Result<Self, ToolError> {
        Ok(Self::new(App::initialize(config)?))
    }

    fn handle_initialize(&self) -> Value {
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {"tools": {"listChanged": false}},
            "serverInfo": {"name": SERVER_NAME, "version": SERVER_VERSION},
        })
    }

    /// Validation failures become JSON-RPC errors; every other tool failure is
    /// reported in-band as an `isError` result.
    pub async fn handle_tools_call(&self, name: &str, raw_args: Value) -> Result<Value, McpError> {
        let args = if raw_args.is_null() {
            Value::Object(Default::default())
        } else {
            raw_args
        };
        validate_tool_args(name, &args)?;

        let result = match self.app.tool_executor.execute(name, args).await {
            Ok(text) => CallToolResult::text(text),
            Err(err) if err.kind == ToolErrorKind::InvalidParams => {
                return Err(McpError::invalid_params(render_tool_error(&err)));
            }
            Err(err) => CallToolResult::error(render_tool_error(&err)),
        };
        serde_json::to_value(result)
            .map_err(|err| McpError::new(ErrorCode::InternalError, err.to_string()))
    }

    /// One protocol line in, at most one response out.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        let parsed: Value = match serde_json::from_str(trimmed) {
            Ok(value) => value,
            Err(_) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    ErrorCode::ParseError.as_i32(),
                    "Parse error".to_string(),
                ))
            }
        };

        let request: JsonRpcRequest = match serde_json::from_value(parsed) {
            Ok(req) => req,
            Err(_) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    ErrorCode::InvalidRequest.as_i32(),
                    "Invalid request".to_string(),
                ))
            }
        };

        match request.method.as_str() {
            _ if request.method.starts_with("notifications/") => None,
            "initialize" => request
                .id
                .map(|id| JsonRpcResponse::success(id, self.handle_initialize())),
            "ping" => request
                .id
                .map(|id| JsonRpcResponse::success(id, serde_json::json!({}))),
            "tools/list" => request
                .id
                .map(|id| JsonRpcResponse::success(id, list_tools())),
            "tools/call" => {
                let id = request.id?;
                let params = request.params.as_object().cloned().unwrap_or_default();
                let name = params.get("name").and_then(|v| v.as_str()).unwrap_or("");
                if name.is_empty() {
                    return Some(JsonRpcResponse::failure(
                        id,
                        ErrorCode::InvalidParams.as_i32(),
                        "Missing tool name".to_string(),
                    ));
                }
                let args = params.get("arguments").cloned().unwrap_or(Value::Null);
                Some(match self.handle_tools_call(name, args).await {
                    Ok(result) => JsonRpcResponse::success(id, result),
                    Err(err) => JsonRpcResponse::failure(id, err.code.as_i32(), err.message),
                })
            }
            _ => request.id.map(|id| {
                JsonRpcResponse::failure(
                    id,
                    ErrorCode::MethodNotFound.as_i32(),
                    "Method not found".to_string(),
                )
            }),
        }
    }

    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<(), ToolError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut writer = BufWriter::new(writer);

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|err| ToolError::internal(err.to_string()))?
        {
            if let Some(response) = self.handle_line(&line).await {
                let payload = serde_json::to_string(&response)
                    .map_err(|err| ToolError::internal(err.to_string()))?;
                writer.write_all(payload.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        self.app.logger.info("stdin closed", None);
        Ok(())
    }

    pub async fn run_stdio(&self) -> Result<(), ToolError> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }
}

pub async fn run_stdio() -> Result<(), ToolError> {
    load_env_file()?;
    let config = ClockodoConfig::from_env()?;
    let server = McpServer::from_config(config)?;
    server.run_stdio().await
}
