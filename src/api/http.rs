//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use super::middleware::admission;
use super::state::AppState;

/// Routes served under both `/mcp` and `/api/v1`
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/query", post(handlers::query))
        .route("/state", get(handlers::get_state))
        .route("/logs", get(handlers::get_logs))
        .route("/reset", post(handlers::reset))
        .route("/actions", get(handlers::list_actions))
}

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .nest("/mcp", api_routes())
        .nest("/api/v1", api_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), admission));

    Router::new()
        .route("/", get(handlers::health))
        .merge(protected)
        .layer(cors)
        .with_state(state)
}
