use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::codes::ErrorCode;

/// A single field-level validation failure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ParamError {
    /// Name of the offending input field
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub field: String,
    /// Category of this particular failure
    #[serde(default, skip_serializing_if = "ErrorCode::is_empty")]
    #[schema(value_type = String, example = "InvalidParams")]
    pub code: ErrorCode,
    /// Human-readable explanation
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl ParamError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: ErrorCode::default(),
            message: message.into(),
        }
    }

    /// Field error tagged with the `InvalidParams` code
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, message).with_code(ErrorCode::InvalidParams)
    }

    pub fn with_code(mut self, code: impl Into<ErrorCode>) -> Self {
        self.code = code.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_fields_are_omitted() {
        let err = ParamError::new("", "must not be empty");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value, json!({ "message": "must not be empty" }));
    }

    #[test]
    fn test_invalid_sets_code() {
        let err = ParamError::invalid("name", "too long");
        assert_eq!(err.code, ErrorCode::InvalidParams);
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(
            value,
            json!({ "field": "name", "code": "InvalidParams", "message": "too long" })
        );
    }

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let err: ParamError = serde_json::from_str(r#"{"field":"value"}"#).unwrap();
        assert_eq!(err.field, "value");
        assert!(err.code.is_empty());
        assert!(err.message.is_empty());
    }
}
