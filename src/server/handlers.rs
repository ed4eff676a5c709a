//! Helpers for shaping audit payloads

use serde_json::Value;

use crate::logs::PAYLOAD_CHAR_BUDGET;
use crate::utils::truncate_chars;

/// Compact one-line rendering of a JSON value, cut to the payload budget.
/// Strings are rendered without surrounding quotes.
pub fn summarize_value(value: &Value) -> String {
    let rendered = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    truncate_chars(&rendered, PAYLOAD_CHAR_BUDGET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summarize_value() {
        assert_eq!(summarize_value(&json!({"a": 1})), r#"{"a":1}"#);
        assert_eq!(summarize_value(&json!("plain")), "plain");
        let long = json!("y".repeat(1000));
        assert_eq!(summarize_value(&long).len(), PAYLOAD_CHAR_BUDGET);
    }
}
