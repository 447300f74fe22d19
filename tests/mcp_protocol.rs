// tests/mcp_protocol.rs
//! JSON-RPC handling, from raw request line to raw response line.

mod common;

use bookstack_mcp::api::transport::{HttpResponse, Method};
use bookstack_mcp::operations::{READ_OPERATIONS, WRITE_OPERATIONS};
use bookstack_mcp::{McpServer, WRITE_DISABLED_MARKER};
use common::{bookstack, ScriptedTransport};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;

fn server(transport: Arc<ScriptedTransport>, write_enabled: bool) -> McpServer {
    McpServer::new(Arc::new(bookstack(transport, write_enabled)))
}

async fn call(server: &McpServer, request: Value) -> Value {
    let line = server
        .handle_request(&request.to_string())
        .await
        .expect("requests with an id get a response");
    serde_json::from_str(&line).unwrap()
}

async fn call_tool(server: &McpServer, name: &str, arguments: Value) -> Value {
    call(
        server,
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": {"name": name, "arguments": arguments}
        }),
    )
    .await
}

fn tool_text(response: &Value) -> &str {
    response["result"]["content"][0]["text"].as_str().unwrap()
}

#[tokio::test]
async fn initialize_reports_protocol_and_server() {
    let server = server(ScriptedTransport::new(), false);

    let response = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 0, "method": "initialize", "params": {}}),
    )
    .await;

    assert_eq!(response["id"], json!(0));
    assert_eq!(response["result"]["protocolVersion"], json!("2024-11-05"));
    assert_eq!(response["result"]["serverInfo"]["name"], json!("bookstack-mcp"));
    assert!(response["result"]["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn tools_list_names_every_operation() {
    let server = server(ScriptedTransport::new(), false);

    let response = call(&server, json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).await;

    let tools = response["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    let expected: Vec<&str> = READ_OPERATIONS
        .iter()
        .chain(WRITE_OPERATIONS.iter())
        .copied()
        .collect();
    assert_eq!(names, expected);
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == json!("object")));
}

#[tokio::test]
async fn notifications_get_no_response() {
    let server = server(ScriptedTransport::new(), false);

    let initialized = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
    assert_eq!(server.handle_request(&initialized.to_string()).await, None);

    let no_id = json!({"jsonrpc": "2.0", "method": "ping"});
    assert_eq!(server.handle_request(&no_id.to_string()).await, None);
}

#[tokio::test]
async fn protocol_errors_use_json_rpc_codes() {
    let server = server(ScriptedTransport::new(), false);

    let parse = server.handle_request("{not json").await.unwrap();
    let parse: Value = serde_json::from_str(&parse).unwrap();
    assert_eq!(parse["error"]["code"], json!(-32700));

    let unknown = call(&server, json!({"jsonrpc": "2.0", "id": 3, "method": "resources/list"})).await;
    assert_eq!(unknown["error"]["code"], json!(-32601));

    let no_params = call(&server, json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call"})).await;
    assert_eq!(no_params["error"]["code"], json!(-32602));

    let no_tool = call_tool(&server, "get_everything", json!({})).await;
    assert_eq!(no_tool["error"]["code"], json!(-32602));
}

#[tokio::test]
async fn ping_answers_with_an_empty_object() {
    let server = server(ScriptedTransport::new(), false);
    let response = call(&server, json!({"jsonrpc": "2.0", "id": "p", "method": "ping"})).await;
    assert_eq!(response["result"], json!({}));
}

#[tokio::test]
async fn tool_results_are_pretty_json_records() {
    let transport = ScriptedTransport::new();
    transport.on_json(
        Method::Get,
        "books/3",
        json!({"id": 3, "name": "Guide", "slug": "guide", "description": "How to"}),
    );
    let server = server(transport, false);

    let response = call_tool(&server, "get_book", json!({"id": 3})).await;

    assert_eq!(response["result"]["isError"], json!(false));
    let record: Value = serde_json::from_str(tool_text(&response)).unwrap();
    assert_eq!(record["name"], json!("Guide"));
    assert_eq!(record["url"], json!("https://docs.example.com/books/guide"));
    assert_eq!(record["description_preview"], json!("How to"));
}

#[tokio::test]
async fn text_exports_come_back_verbatim() {
    let transport = ScriptedTransport::new();
    transport.on(
        Method::Get,
        "chapters/4/export/markdown",
        HttpResponse::new(200, "# Basics").with_header("content-type", "text/markdown"),
    );
    let server = server(transport, false);

    let response = call_tool(&server, "export_chapter", json!({"id": 4, "format": "markdown"})).await;

    assert_eq!(tool_text(&response), "# Basics");
}

#[tokio::test]
async fn operation_failures_are_tool_errors() {
    let server = server(ScriptedTransport::new(), false);

    let missing = call_tool(&server, "get_page", json!({"id": 404})).await;
    assert_eq!(missing["result"]["isError"], json!(true));
    assert!(tool_text(&missing).starts_with("Not found"));

    let disabled = call_tool(&server, "delete_book", json!({"id": 1})).await;
    assert_eq!(disabled["result"]["isError"], json!(true));
    assert!(tool_text(&disabled).contains(WRITE_DISABLED_MARKER));

    let bad_args = call_tool(&server, "get_book", json!({"id": "three"})).await;
    assert_eq!(bad_args["result"]["isError"], json!(true));
    assert!(tool_text(&bad_args).starts_with("Invalid request for get_book"));

    let bad_format = call_tool(&server, "export_page", json!({"id": 1, "format": "docx"})).await;
    assert_eq!(bad_format["result"]["isError"], json!(true));
}

#[tokio::test]
async fn list_tools_accept_missing_arguments() {
    let transport = ScriptedTransport::new();
    transport.on_json(Method::Get, "shelves", json!({"data": [], "total": 0}));
    let server = server(transport.clone(), false);

    let response = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 9, "method": "tools/call", "params": {"name": "get_shelves"}}),
    )
    .await;

    assert_eq!(response["result"]["isError"], json!(false));
    assert_eq!(transport.calls_to("shelves"), 1);
}

#[tokio::test]
async fn capabilities_tool_reports_write_mode() {
    let server = server(ScriptedTransport::new(), true);

    let response = call_tool(&server, "get_capabilities", json!({})).await;

    let capabilities: Value = serde_json::from_str(tool_text(&response)).unwrap();
    assert_eq!(capabilities["write_enabled"], json!(true));
    assert_eq!(
        capabilities["write_operations"].as_array().map(Vec::len),
        Some(WRITE_OPERATIONS.len())
    );
}
