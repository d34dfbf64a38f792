// Router integration tests for the streamable HTTP transport

use axum::body::Body;
use axum::http::{Request, StatusCode};
use finnhub_mcp::{finnhub_tools, CredentialResolver, McpServer, ResourceCatalog, Upstream};
use finnhub_mcp_server::{create_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UNSET_ENV: &str = "FINNHUB_MCP_TEST_ROUTER_NEVER_SET";

fn state_for(base_url: &str) -> AppState {
    let upstream = Upstream::new(base_url, CredentialResolver::new(UNSET_ENV));
    AppState::with_server(McpServer::new(
        finnhub_tools(upstream),
        ResourceCatalog::finnhub(),
    ))
}

fn offline_state() -> AppState {
    state_for("http://127.0.0.1:9")
}

fn post_mcp(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn rpc(state: AppState, message: Value) -> Value {
    let response = create_router(state)
        .oneshot(post_mcp(message.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await
}

fn tool_payload(reply: &Value) -> Value {
    serde_json::from_str(reply["result"]["content"][0]["text"].as_str().unwrap()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = create_router(offline_state())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"status": "healthy"}));
}

#[tokio::test]
async fn test_initialize() {
    let reply = rpc(
        offline_state(),
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {"protocolVersion": "2025-06-18", "capabilities": {}}
        }),
    )
    .await;

    assert_eq!(reply["id"], 1);
    assert_eq!(reply["result"]["serverInfo"]["name"], "Finnhub MCP Server");
    assert!(reply["result"]["instructions"]
        .as_str()
        .unwrap()
        .contains("skill://finnhub/usage"));
}

#[tokio::test]
async fn test_notification_is_accepted() {
    let response = create_router(offline_state())
        .oneshot(post_mcp(
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let bytes = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_parse_error() {
    let response = create_router(offline_state())
        .oneshot(post_mcp("not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let reply = json_body(response).await;
    assert_eq!(reply["error"]["code"], -32700);
    assert!(reply["id"].is_null());
}

#[tokio::test]
async fn test_invalid_utf8_body_is_parse_error() {
    let response = create_router(offline_state())
        .oneshot(post_mcp(vec![0xffu8, 0xfe]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let reply = json_body(response).await;
    assert_eq!(reply["jsonrpc"], "2.0");
    assert_eq!(reply["error"]["code"], -32700);
    assert!(reply["id"].is_null());
}

#[tokio::test]
async fn test_tools_list() {
    let reply = rpc(
        offline_state(),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
    )
    .await;
    let names: Vec<&str> = reply["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();

    assert_eq!(names.len(), 5);
    for expected in [
        "get_market_news",
        "get_stock_quote",
        "get_company_profile",
        "get_basic_financials",
        "get_recommendation_trends",
    ] {
        assert!(names.contains(&expected), "{} not listed", expected);
    }
}

#[tokio::test]
async fn test_unknown_tool() {
    let reply = rpc(
        offline_state(),
        json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": {"name": "invalid_tool", "arguments": {}}
        }),
    )
    .await;

    assert_eq!(reply["error"]["code"], -32602);
    assert!(reply.get("result").is_none());
}

#[tokio::test]
async fn test_missing_symbol_fails_before_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&upstream)
        .await;

    let reply = rpc(
        state_for(&upstream.uri()),
        json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": {"name": "get_company_profile", "arguments": {"api_key": "k"}}
        }),
    )
    .await;

    assert_eq!(reply["error"]["code"], -32602);
    assert!(reply["error"]["message"].as_str().unwrap().contains("symbol"));
}

#[tokio::test]
async fn test_stock_quote_end_to_end() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quote"))
        .and(query_param("symbol", "AAPL"))
        .and(header("x-finnhub-token", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "c": 150.0, "d": 2.5, "dp": 1.69, "h": 152.0,
            "l": 148.0, "o": 149.0, "pc": 147.5, "t": 1640995200
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let reply = rpc(
        state_for(&upstream.uri()),
        json!({
            "jsonrpc": "2.0",
            "id": 5,
            "method": "tools/call",
            "params": {
                "name": "get_stock_quote",
                "arguments": {"symbol": "AAPL", "api_key": "test-key"}
            }
        }),
    )
    .await;
    let quote = tool_payload(&reply);

    assert_eq!(quote["current_price"], 150.0);
    assert_eq!(quote["change"], 2.5);
    assert_eq!(quote["percent_change"], 1.69);
    assert_eq!(quote["timestamp"], "2022-01-01T00:00:00");
    assert!(quote["retrieved_at"].is_string());
    assert!(quote.get("error").is_none());
}

#[tokio::test]
async fn test_missing_credential_for_every_tool() {
    let state = offline_state();

    for (name, arguments) in [
        ("get_market_news", json!({})),
        ("get_stock_quote", json!({"symbol": "AAPL"})),
        ("get_company_profile", json!({"symbol": "AAPL"})),
        ("get_basic_financials", json!({"symbol": "AAPL"})),
        ("get_recommendation_trends", json!({"symbol": "AAPL"})),
    ] {
        let reply = rpc(
            state.clone(),
            json!({
                "jsonrpc": "2.0",
                "id": name,
                "method": "tools/call",
                "params": {"name": name, "arguments": arguments}
            }),
        )
        .await;
        let payload = tool_payload(&reply);

        assert!(
            payload["error"]
                .as_str()
                .unwrap()
                .contains("FINNHUB_MCP_TEST_ROUTER_NEVER_SET environment variable is required"),
            "{}",
            name
        );
        assert!(payload["timestamp"].is_string());
    }
}

#[tokio::test]
async fn test_get_on_mcp_is_rejected() {
    let response = create_router(offline_state())
        .oneshot(Request::builder().uri("/mcp").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
