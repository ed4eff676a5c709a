//! HTTP surface
//!
//! Every route under `/mcp` and `/api/v1` passes the rate limiter and the
//! optional API key guard before reaching its handler. `GET /` is a health
//! check and is never throttled.

mod error;
pub mod handlers;
pub mod http;
pub mod middleware;
pub mod state;

pub use http::create_router;
pub use state::AppState;
