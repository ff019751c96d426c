//! Common utilities shared across the support tools.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domains::tools::error::{ToolError, ToolResult};

/// Deserialize raw call arguments into a tool's parameter struct.
///
/// Missing fields, wrong types and out-of-range enum values all become
/// validation errors carrying serde's message.
pub fn parse_arguments<P: DeserializeOwned>(arguments: Value) -> ToolResult<P> {
    serde_json::from_value(arguments).map_err(|e| ToolError::validation(e.to_string()))
}

/// Serialize a tool's record into the JSON output payload.
pub fn to_output<T: Serialize>(record: &T) -> ToolResult<Value> {
    serde_json::to_value(record).map_err(|e| ToolError::internal(e.to_string()))
}

/// The payload used when a looked-up record does not exist.
pub fn empty_record() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Default page size for listings.
pub fn default_limit() -> u32 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Params {
        customer_id: i64,
    }

    #[test]
    fn test_parse_arguments_ok() {
        let params: Params = parse_arguments(json!({ "customer_id": 3, "extra": true })).unwrap();
        assert_eq!(params.customer_id, 3);
    }

    #[test]
    fn test_parse_arguments_missing_field() {
        let err = parse_arguments::<Params>(json!({})).unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
        assert!(err.to_string().contains("customer_id"));
    }

    #[test]
    fn test_parse_arguments_wrong_type() {
        let err = parse_arguments::<Params>(json!({ "customer_id": "one" })).unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
    }

    #[test]
    fn test_empty_record() {
        assert_eq!(empty_record(), json!({}));
    }
}
