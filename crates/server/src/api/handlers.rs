use crate::config::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Health check endpoint. Does not probe Finnhub.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Single JSON-RPC message over streamable HTTP.
///
/// Requests are answered with a JSON body. Notifications and client
/// responses are acknowledged with `202 Accepted` and no body. The body is
/// taken as raw bytes so that non-UTF-8 input still gets a parse error.
pub async fn mcp(State(state): State<AppState>, body: Bytes) -> Response {
    match state.mcp.handle_bytes(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
