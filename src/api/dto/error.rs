//! Error response DTOs.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Standard error response format.
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "code": "NOT_FOUND",
    "message": "recipe with id=42 was not found",
    "request_id": "4f6c1d0e-8a55-4d0b-9a7e-2f3f1c9b6a10"
}))]
pub struct ErrorResponse {
    /// Stable machine-readable error code
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
            request_id: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Adds request ID to the error response for correlation.
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_fields_are_omitted() {
        let body = serde_json::to_value(ErrorResponse::new("BAD_REQUEST", "nope")).unwrap();
        assert_eq!(body, json!({"code": "BAD_REQUEST", "message": "nope"}));
    }

    #[test]
    fn test_builder() {
        let response = ErrorResponse::new("NOT_FOUND", "missing")
            .with_details(json!({"id": 3}))
            .with_request_id("req-1");
        assert_eq!(response.details, Some(json!({"id": 3})));
        assert_eq!(response.request_id.as_deref(), Some("req-1"));
    }
}
