// src/mcp/server.rs
//! JSON-RPC over stdio.
//!
//! One request per line on stdin, one response per line on stdout.
//! Notifications get no response. Logging never touches stdout.

use super::dispatch::McpMethod;
use super::tools::ToolRegistry;
use crate::error::AppError;
use crate::operations::BookStack;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// MCP protocol revision this server speaks.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

const SERVER_NAME: &str = env!("CARGO_PKG_NAME");

const INSTRUCTIONS: &str = "Tools for a BookStack knowledge base. Records come back as JSON \
with added url, summary and relative-time fields. Write tools fail unless the server was \
started with BOOKSTACK_ENABLE_WRITE=true; call get_capabilities to check.";

type DispatchResult = Result<Value, (i32, String)>;

pub struct McpServer {
    tools: ToolRegistry,
}

impl McpServer {
    pub fn new(service: Arc<BookStack>) -> Self {
        Self {
            tools: ToolRegistry::new(service),
        }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Serves stdin until it closes.
    pub async fn run_stdio(&self) -> Result<(), AppError> {
        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(stdin).lines();

        log::info!("Listening for MCP requests on stdio");

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_request(&line).await {
                stdout.write_all(response.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        log::info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handles one raw request line. `None` for notifications.
    pub async fn handle_request(&self, request: &str) -> Option<String> {
        let req: JsonRpcRequest = match serde_json::from_str(request) {
            Ok(req) => req,
            Err(e) => {
                log::warn!("Unparseable request: {}", e);
                return Some(format_error(None, -32700, &format!("Parse error: {}", e)));
            }
        };

        let method = McpMethod::from(req.method.as_str());
        if method.is_notification() || req.id.is_none() {
            log::debug!("Notification: {}", method);
            return None;
        }

        if let Some(id) = &req.id {
            log::debug!("Request {}: {}", id, method);
        }
        let result = self.dispatch_method(method, req.params).await;
        Some(format_response(req.id, result))
    }

    async fn dispatch_method(&self, method: McpMethod, params: Option<Value>) -> DispatchResult {
        match method {
            McpMethod::Initialize => Ok(self.handle_initialize()),
            McpMethod::ListTools => self.handle_list_tools(),
            McpMethod::CallTool => self.handle_call_tool(params).await,
            McpMethod::Ping => Ok(json!({})),
            McpMethod::Notification(name) | McpMethod::Unknown(name) => {
                Err((-32601, format!("Method not found: {}", name)))
            }
        }
    }

    fn handle_initialize(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            },
            "instructions": INSTRUCTIONS
        })
    }

    fn handle_list_tools(&self) -> DispatchResult {
        let tools = serde_json::to_value(self.tools.list_tools())
            .map_err(|e| (-32603, format!("Internal error: {}", e)))?;
        Ok(json!({ "tools": tools }))
    }

    async fn handle_call_tool(&self, params: Option<Value>) -> DispatchResult {
        let params = params.ok_or((-32602, "Missing params".to_string()))?;

        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or((-32602, "Missing tool name".to_string()))?;

        let arguments = match params.get("arguments") {
            Some(Value::Null) | None => json!({}),
            Some(args) => args.clone(),
        };

        let result = self
            .tools
            .execute(name, arguments)
            .await
            .ok_or_else(|| (-32602, format!("Unknown tool: {}", name)))?;

        Ok(json!({
            "content": result.content,
            "isError": result.is_error
        }))
    }
}

fn format_response(id: Option<Value>, result: DispatchResult) -> String {
    match result {
        Ok(value) => {
            let response = JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id,
                result: Some(value),
                error: None,
            };
            serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
        }
        Err((code, message)) => format_error(id, code, &message),
    }
}

fn format_error(id: Option<Value>, code: i32, message: &str) -> String {
    let response = JsonRpcResponse {
        jsonrpc: "2.0".to_string(),
        id,
        result: None,
        error: Some(JsonRpcError {
            code,
            message: message.to_string(),
            data: None,
        }),
    };
    serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
}

#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[serde(rename = "jsonrpc", default)]
    _jsonrpc: String,
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Option<Value>,
}

#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_carry_code_and_id() {
        let text = format_error(Some(json!(3)), -32601, "Method not found: x");
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["id"], json!(3));
        assert_eq!(value["error"]["code"], json!(-32601));
        assert!(value.get("result").is_none());
    }

    #[test]
    fn results_omit_error() {
        let text = format_response(Some(json!("a")), Ok(json!({})));
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["jsonrpc"], json!("2.0"));
        assert_eq!(value["result"], json!({}));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn requests_without_params_parse() {
        let req: JsonRpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#).unwrap();
        assert_eq!(req.method, "ping");
        assert!(req.params.is_none());
    }
}
