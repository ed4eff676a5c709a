//! HTTP rendering of `McpError`

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};

use crate::protocol::ErrorBody;
use crate::types::McpError;

impl IntoResponse for McpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let retry_after = match &self {
            McpError::RateLimited {
                retry_after_secs, ..
            } => Some(*retry_after_secs),
            _ => None,
        };

        let mut response = (status, Json(ErrorBody::new(self.to_string()))).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}
