use super::ApiResult;
use crate::config::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use sharepoint_mcp::protocol::{CallToolParams, CallToolResult, InitializeResult, ListToolsResult};
use std::sync::Arc;

/// Capability negotiation
pub async fn initialize(State(state): State<Arc<AppState>>) -> Json<InitializeResult> {
    Json(state.mcp.initialize())
}

/// Tool catalog
pub async fn list_tools(State(state): State<Arc<AppState>>) -> Json<ListToolsResult> {
    Json(state.mcp.list_tools())
}

/// Tool dispatch; a malformed body takes the same error path as a failed call
pub async fn call_tool(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CallToolParams>, JsonRejection>,
) -> ApiResult<Json<CallToolResult>> {
    let Json(params) = payload?;
    let result = state.mcp.call_tool(params).await?;
    Ok(Json(result))
}
