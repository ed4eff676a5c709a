//! Agent Memory Server - Binary Entry Point
//!
//! Reads configuration from the environment and serves the HTTP API until
//! Ctrl+C.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use agent_memory::api::{create_router, AppState};
use agent_memory::store::{EntityStore, JsonFilePersistence, MemoryPersistence, Persistence};
use agent_memory::types::{McpError, McpResult};
use agent_memory::utils::SystemClock;
use agent_memory::{LogManager, RateLimiter, ServerConfig, VERSION};

#[tokio::main]
async fn main() -> McpResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = ServerConfig::from_env()?;
    let clock = Arc::new(SystemClock::new());

    let persistence: Box<dyn Persistence> = match &config.data_dir {
        Some(dir) => Box::new(JsonFilePersistence::new(dir)),
        None => Box::new(MemoryPersistence),
    };
    let store = Arc::new(EntityStore::with_persistence(persistence, clock.clone())?);
    let logs = Arc::new(LogManager::with_retention(config.log_retention, clock)?);

    let limiter = Arc::new(RateLimiter::with_idle_windows(
        config.rate_limit,
        config.idle_windows,
    ));
    let sweeper = limiter.clone().spawn_sweeper();

    let mut state = AppState::new(store, logs, limiter);
    match &config.api_key {
        Some(key) => state = state.with_api_key(key.clone()),
        None => warn!("MCP_API_KEY not set; authentication disabled"),
    }
    let app = create_router(Arc::new(state));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| McpError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    info!(
        version = VERSION,
        %addr,
        rate_limit = %config.rate_limit,
        log_retention = config.log_retention,
        "Agent memory server listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| McpError::Internal(format!("Server error: {}", e)))?;

    sweeper.abort();
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
