//! Admission middleware: rate limiting, then API key check

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};

use super::state::AppState;
use crate::auth::{authorize, API_KEY_HEADER};
use crate::types::McpResult;

/// Identity used when the peer address is unavailable
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Rate-limit key for a request: the peer IP address
pub fn client_identity(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

pub async fn admission(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> McpResult<Response> {
    let identity = client_identity(&request);
    state.limiter.check(&identity)?;

    let credential = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    authorize(state.auth.as_deref(), credential)?;

    Ok(next.run(request).await)
}
