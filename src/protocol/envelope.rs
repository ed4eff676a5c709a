//! Request and response wire types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::current_timestamp;

/// Body of a query request: `{"action": "<name>", "params": {...}}`
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct QueryRequest {
    pub action: String,
    #[serde(default = "empty_params")]
    pub params: Value,
}

fn empty_params() -> Value {
    Value::Object(Map::new())
}

impl QueryRequest {
    pub fn new(action: impl Into<String>, params: Value) -> Self {
        Self {
            action: action.into(),
            params,
        }
    }
}

/// Uniform success response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Envelope {
    pub success: bool,
    pub data: Value,
    pub message: String,
    pub timestamp: String,
}

impl Envelope {
    /// Create a success envelope stamped with the current time
    pub fn success(data: Value, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
            timestamp: current_timestamp(),
        }
    }
}

/// Error response body: `{"detail": "<message>"}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_params_default_to_empty_object() {
        let request: QueryRequest = serde_json::from_value(json!({"action": "list_users"})).unwrap();
        assert_eq!(request.params, json!({}));
    }

    #[test]
    fn test_envelope_shape() {
        let envelope = Envelope::success(json!([1, 2]), "done");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"], json!([1, 2]));
        assert_eq!(value["message"], "done");
        assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
    }
}
