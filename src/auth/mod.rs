//! API key authentication
//!
//! Callers present a key in the `X-API-Key` header. A missing key is
//! `Unauthorized`; a key that does not match is `Forbidden`.

use subtle::ConstantTimeEq;
use tracing::warn;

use crate::types::{McpError, McpResult};

/// Header carrying the caller's credential
pub const API_KEY_HEADER: &str = "x-api-key";

/// Decides whether a presented credential is acceptable
pub trait AuthGuard: Send + Sync {
    fn is_valid(&self, credential: &str) -> bool;
}

/// Accepts exactly one shared key
pub struct ApiKeyGuard {
    key: String,
}

impl ApiKeyGuard {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl AuthGuard for ApiKeyGuard {
    fn is_valid(&self, credential: &str) -> bool {
        constant_time_compare(credential, &self.key)
    }
}

/// Check `credential` against `guard`. With no guard configured every
/// request passes.
pub fn authorize(guard: Option<&dyn AuthGuard>, credential: Option<&str>) -> McpResult<()> {
    let Some(guard) = guard else {
        return Ok(());
    };

    match credential {
        None => Err(McpError::Unauthorized("Missing X-API-Key header".to_string())),
        Some(key) if guard.is_valid(key) => Ok(()),
        Some(_) => {
            warn!("Rejected request with invalid API key");
            Err(McpError::Forbidden("Invalid API key".to_string()))
        }
    }
}

/// Compare two strings in time independent of where they differ
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    let max_len = a.len().max(b.len());

    // Different pad bytes so unequal lengths never compare equal
    let mut a_padded = vec![0u8; max_len];
    let mut b_padded = vec![0xFFu8; max_len];
    a_padded[..a.len()].copy_from_slice(a.as_bytes());
    b_padded[..b.len()].copy_from_slice(b.as_bytes());

    let lengths_equal = a.len().ct_eq(&b.len());
    let contents_equal = a_padded.ct_eq(&b_padded);
    (lengths_equal & contents_equal).into()
}
