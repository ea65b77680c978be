//! Error handler for converting AppError to HTTP responses.
//!
//! Every error leaves the API as an `ErrorResponse` JSON body carrying the
//! current request ID when one is in scope.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::api::middleware::request_id::current_request_id;
use crate::error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        if status.is_server_error() {
            tracing::error!(error = ?self, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let mut body = error_body(&self);
        if let Some(id) = current_request_id() {
            body = body.with_request_id(&id);
        }

        (status, Json(body)).into_response()
    }
}

/// Maps an AppError variant to its HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps an AppError variant to its error code string.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Duplicate { .. } => "DUPLICATE_ENTRY",
        AppError::Validation { .. } | AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

/// Client-facing body. Sources of 5xx errors are never exposed.
fn error_body(error: &AppError) -> ErrorResponse {
    let code = error_to_code(error);
    match error {
        AppError::NotFound {
            entity,
            field,
            value,
        } => ErrorResponse::new(
            code,
            &format!("{} with {}={} was not found", entity, field, value),
        )
        .with_details(json!({ "entity": entity, "field": field, "value": value })),
        AppError::Duplicate {
            entity,
            field,
            value,
        } => ErrorResponse::new(
            code,
            &format!("{}.{} '{}' already exists", entity, field, value),
        )
        .with_details(json!({ "entity": entity, "field": field, "value": value })),
        AppError::Validation { field, reason } => {
            ErrorResponse::new(code, &format!("Validation failed for {}", field))
                .with_details(json!({ "field": field, "reason": reason }))
        }
        AppError::ValidationErrors { errors } => {
            ErrorResponse::new(code, "Request validation failed")
                .with_details(json!({ "errors": errors }))
        }
        AppError::BadRequest { message } => ErrorResponse::new(code, message),
        AppError::Database { operation, .. } => {
            ErrorResponse::new(code, &format!("Database operation failed: {}", operation))
        }
        AppError::Configuration { key, .. } => {
            ErrorResponse::new(code, &format!("Configuration error: {}", key))
        }
        AppError::ConnectionPool { .. } => {
            ErrorResponse::new(code, "Database connection unavailable")
        }
        AppError::Internal { .. } => ErrorResponse::new(code, "An internal error occurred"),
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match &rejection {
            JsonRejection::MissingJsonContentType(_) => {
                "Expected request with `Content-Type: application/json`".to_string()
            }
            other => other.body_text(),
        };
        AppError::BadRequest { message }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

/// Rewrites plain-text error responses produced outside our handlers
/// (unknown routes, wrong methods, extractor rejections) into `ErrorResponse`.
pub async fn global_error_handler(
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    if is_json {
        return response;
    }

    let (_parts, body) = response.into_parts();
    let original = match axum::body::to_bytes(body, 64 * 1024).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).trim().to_string(),
        Err(_) => String::new(),
    };

    let code = match status {
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::NOT_FOUND => "NOT_FOUND",
        StatusCode::METHOD_NOT_ALLOWED => "METHOD_NOT_ALLOWED",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
        StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
        StatusCode::UNPROCESSABLE_ENTITY => "UNPROCESSABLE_ENTITY",
        StatusCode::SERVICE_UNAVAILABLE => "SERVICE_UNAVAILABLE",
        s if s.is_server_error() => "INTERNAL_ERROR",
        _ => "UNKNOWN_ERROR",
    };
    let message = if original.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    } else {
        original
    };

    let mut body = ErrorResponse::new(code, &message);
    if let Some(id) = current_request_id() {
        body = body.with_request_id(&id);
    }
    (status, Json(body)).into_response()
}
