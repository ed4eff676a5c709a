//! Parameter decoding shared by every action

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::protocol::ActionName;
use crate::types::{McpError, McpResult};

/// Decode an action's params into its typed struct.
/// `null` is treated as an empty object; anything else that fails is `InvalidInput`.
pub fn parse_params<T: DeserializeOwned>(action: ActionName, params: Value) -> McpResult<T> {
    let params = match params {
        Value::Null => Value::Object(Map::new()),
        Value::Object(_) => params,
        other => {
            return Err(McpError::invalid_input(format!(
                "Invalid parameters for {}: expected an object, got {}",
                action, other
            )))
        }
    };

    serde_json::from_value(params).map_err(|e| {
        McpError::invalid_input(format!("Invalid parameters for {}: {}", action, e))
    })
}

/// Accept a task id as a JSON integer or a string of digits
pub fn coerce_task_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(u64),
        Str(String),
    }

    match RawId::deserialize(deserializer)
        .map_err(|_| D::Error::custom("task_id must be an integer"))?
    {
        RawId::Int(id) => Ok(id),
        RawId::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("task_id must be an integer, got '{}'", s))),
    }
}

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
/// Use together with `#[serde(default)]`.
pub fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Sample {
        #[serde(deserialize_with = "coerce_task_id")]
        task_id: u64,
        #[serde(default, deserialize_with = "explicit_null")]
        assigned_to: Option<Option<String>>,
    }

    #[test]
    fn test_task_id_coercion() {
        let a: Sample = parse_params(ActionName::UpdateTask, json!({"task_id": 7})).unwrap();
        let b: Sample = parse_params(ActionName::UpdateTask, json!({"task_id": " 7 "})).unwrap();
        assert_eq!(a.task_id, 7);
        assert_eq!(b.task_id, 7);

        for bad in [json!({"task_id": "seven"}), json!({"task_id": -1}), json!({"task_id": true})] {
            let err = parse_params::<Sample>(ActionName::UpdateTask, bad).unwrap_err();
            assert!(matches!(err, McpError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_absent_vs_null() {
        let absent: Sample = parse_params(ActionName::UpdateTask, json!({"task_id": 1})).unwrap();
        let null: Sample =
            parse_params(ActionName::UpdateTask, json!({"task_id": 1, "assigned_to": null})).unwrap();
        assert_eq!(absent.assigned_to, None);
        assert_eq!(null.assigned_to, Some(None));
    }

    #[test]
    fn test_unknown_fields_and_non_objects_rejected() {
        let err = parse_params::<Sample>(ActionName::UpdateTask, json!({"task_id": 1, "colour": "red"}))
            .unwrap_err();
        assert!(err.to_string().contains("colour"));

        let err = parse_params::<Sample>(ActionName::UpdateTask, json!([1])).unwrap_err();
        assert!(matches!(err, McpError::InvalidInput(_)));
    }

    #[test]
    fn test_missing_required_field() {
        let err = parse_params::<Sample>(ActionName::UpdateTask, Value::Null).unwrap_err();
        assert!(err.to_string().contains("task_id"));
    }
}
