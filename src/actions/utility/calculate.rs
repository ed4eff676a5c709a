//! Calculate action

use serde::Deserialize;
use serde_json::{json, Value};

use crate::actions::params::parse_params;
use crate::protocol::{Action, ActionDefinition, ActionName};
use crate::types::{McpError, McpResult};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CalculateParams {
    operation: String,
    #[serde(default)]
    numbers: Vec<f64>,
}

/// Action computing sum, average, max or min of a list of numbers
pub struct CalculateAction;

impl CalculateAction {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CalculateAction {
    fn default() -> Self {
        Self::new()
    }
}

fn calculate(operation: &str, numbers: &[f64]) -> McpResult<Value> {
    let result = match operation {
        "sum" => json!(numbers.iter().sum::<f64>()),
        "average" => {
            if numbers.is_empty() {
                json!(0)
            } else {
                json!(numbers.iter().sum::<f64>() / numbers.len() as f64)
            }
        }
        "max" => json!(numbers.iter().copied().reduce(f64::max)),
        "min" => json!(numbers.iter().copied().reduce(f64::min)),
        other => {
            return Err(McpError::invalid_input(format!(
                "Unknown operation: {}. Valid options: sum, average, max, min",
                other
            )))
        }
    };
    Ok(result)
}

impl Action for CalculateAction {
    fn definition(&self) -> ActionDefinition {
        ActionDefinition::new(
            ActionName::Calculate,
            "Compute sum, average, max or min over a list of numbers",
            json!({
                "type": "object",
                "properties": {
                    "operation": { "type": "string", "enum": ["sum", "average", "max", "min"] },
                    "numbers": { "type": "array", "items": { "type": "number" } }
                },
                "required": ["operation"]
            }),
        )
    }

    fn execute(&self, params: Value) -> McpResult<Value> {
        let params: CalculateParams = parse_params(ActionName::Calculate, params)?;
        let result = calculate(&params.operation, &params.numbers)?;
        Ok(json!({ "operation": params.operation, "result": result }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operations() {
        let numbers = [4.0, 1.0, 7.0];
        assert_eq!(calculate("sum", &numbers).unwrap(), json!(12.0));
        assert_eq!(calculate("average", &numbers).unwrap(), json!(4.0));
        assert_eq!(calculate("max", &numbers).unwrap(), json!(7.0));
        assert_eq!(calculate("min", &numbers).unwrap(), json!(1.0));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(calculate("average", &[]).unwrap(), json!(0));
        assert_eq!(calculate("max", &[]).unwrap(), Value::Null);
        assert_eq!(calculate("sum", &[]).unwrap(), json!(0.0));
    }

    #[test]
    fn test_unknown_operation() {
        let err = CalculateAction::new()
            .execute(json!({"operation": "median", "numbers": [1]}))
            .unwrap_err();
        assert!(matches!(err, McpError::InvalidInput(_)));
    }
}
