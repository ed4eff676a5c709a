//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::task;

use super::state::AppState;
use crate::protocol::{Envelope, QueryRequest};
use crate::snapshot::SnapshotQuery;
use crate::types::{McpError, McpResult};
use crate::utils::current_timestamp;
use crate::{NAME, VERSION};

/// Default page size for `/logs`
pub const DEFAULT_LOGS_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct LogsParams {
    #[serde(default = "default_logs_limit")]
    pub limit: usize,
}

fn default_logs_limit() -> usize {
    DEFAULT_LOGS_LIMIT
}

/// Run store work off the async executor; file-backed saves block
async fn blocking<F>(work: F) -> McpResult<Envelope>
where
    F: FnOnce() -> McpResult<Envelope> + Send + 'static,
{
    task::spawn_blocking(work)
        .await
        .map_err(|e| McpError::Internal(format!("Worker task failed: {}", e)))?
}

/// GET / - health check, never rate limited
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "running",
        "service": NAME,
        "version": VERSION,
        "timestamp": current_timestamp(),
    }))
}

/// POST /query - dispatch one named action
pub async fn query(
    State(state): State<Arc<AppState>>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> McpResult<Json<Envelope>> {
    let Json(request) = body.map_err(|e| McpError::invalid_input(e.body_text()))?;
    let envelope = blocking(move || state.router.dispatch(&request.action, request.params)).await?;
    Ok(Json(envelope))
}

/// GET /state - full or filtered snapshot
pub async fn get_state(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SnapshotQuery>, QueryRejection>,
) -> McpResult<Json<Envelope>> {
    let Query(query) = params.map_err(|e| McpError::invalid_input(e.body_text()))?;
    let unfiltered = query.entity.is_none()
        && query.status.is_none()
        && query.limit.is_none()
        && query.offset.is_none();

    let data = state.snapshot.snapshot(&query)?;
    let message = if unfiltered {
        "Memory snapshot retrieved"
    } else {
        "Filtered memory snapshot retrieved"
    };
    Ok(Json(Envelope::success(data, message)))
}

/// GET /logs - most recent audit records, oldest first
pub async fn get_logs(
    State(state): State<Arc<AppState>>,
    params: Result<Query<LogsParams>, QueryRejection>,
) -> McpResult<Json<Envelope>> {
    let Query(params) = params.map_err(|e| McpError::invalid_input(e.body_text()))?;
    let logs = state.router.logs().recent(params.limit);
    let message = format!("Retrieved {} logs", logs.len());
    Ok(Json(Envelope::success(serde_json::to_value(logs)?, message)))
}

/// POST /reset - clear all state
pub async fn reset(State(state): State<Arc<AppState>>) -> McpResult<Json<Envelope>> {
    let envelope = blocking(move || state.router.reset()).await?;
    Ok(Json(envelope))
}

/// GET /actions - the action catalogue with input schemas
pub async fn list_actions(State(state): State<Arc<AppState>>) -> McpResult<Json<Envelope>> {
    let definitions = state.router.definitions();
    let message = format!("{} actions available", definitions.len());
    Ok(Json(Envelope::success(
        serde_json::to_value(definitions)?,
        message,
    )))
}
