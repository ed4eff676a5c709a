//! Shared application state for the HTTP surface

use std::sync::Arc;

use crate::auth::{ApiKeyGuard, AuthGuard};
use crate::logs::LogManager;
use crate::rate_limit::RateLimiter;
use crate::server::ActionRouter;
use crate::snapshot::StateSnapshot;
use crate::store::EntityStore;

pub struct AppState {
    /// Dispatches named actions
    pub router: ActionRouter,

    /// Read-only views for `/state`
    pub snapshot: StateSnapshot,

    /// Per-client admission
    pub limiter: Arc<RateLimiter>,

    /// `None` disables authentication
    pub auth: Option<Arc<dyn AuthGuard>>,
}

impl AppState {
    /// Wire the full action catalogue over `store` and `logs`
    pub fn new(store: Arc<EntityStore>, logs: Arc<LogManager>, limiter: Arc<RateLimiter>) -> Self {
        Self {
            router: ActionRouter::with_default_actions(store.clone(), logs.clone()),
            snapshot: StateSnapshot::new(store, logs),
            limiter,
            auth: None,
        }
    }

    /// Require `X-API-Key` on every protected route
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.auth = Some(Arc::new(ApiKeyGuard::new(key)));
        self
    }
}
