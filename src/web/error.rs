//! API error handling for the mediadeck web layer.

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::MediadeckError;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Forbidden (403).
    Forbidden,
    /// Not found (404).
    NotFound,
    /// Payload too large (413) - storage quota exceeded.
    PayloadTooLarge,
    /// Internal server error (500).
    InternalError,
    /// Gateway timeout (504) - upstream call exceeded its bound.
    GatewayTimeout,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// Structured context, e.g. quota numbers or upstream details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach structured details to the error body.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create a payload too large error.
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PayloadTooLarge, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Create a gateway timeout error.
    pub fn gateway_timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::GatewayTimeout, message)
    }

    /// Create a bad request error from validator::ValidationErrors with
    /// field-level detail.
    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let mut details: HashMap<String, Vec<String>> = HashMap::new();

        for (field, field_errors) in errors.field_errors() {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
                .collect();
            details.insert(field.to_string(), messages);
        }

        Self::bad_request("Validation failed").with_details(json!(details))
    }

    /// The error code assigned to this error.
    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<MediadeckError> for ApiError {
    fn from(err: MediadeckError) -> Self {
        match &err {
            MediadeckError::Validation(msg) => ApiError::bad_request(msg.clone()),
            MediadeckError::InvalidPayload(msg) => ApiError::bad_request(msg.clone()),
            MediadeckError::UnsupportedFileType(_)
            | MediadeckError::InvalidKeyNumber(_)
            | MediadeckError::UnknownCollection(_) => ApiError::bad_request(err.to_string()),
            MediadeckError::Forbidden(msg) => ApiError::forbidden(msg.clone()),
            MediadeckError::NotFound(_) => ApiError::not_found(err.to_string()),
            MediadeckError::QuotaExceeded {
                used,
                limit,
                requested,
            } => ApiError::payload_too_large("Storage limit exceeded").with_details(json!({
                "storage_used": used,
                "storage_limit": limit,
                "file_size": requested,
            })),
            MediadeckError::UpstreamTimeout(details) => {
                ApiError::gateway_timeout("Upstream request timed out")
                    .with_details(json!(details))
            }
            MediadeckError::Upstream(details) => {
                ApiError::internal("API request failed").with_details(json!(details))
            }
            _ => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status() {
        assert_eq!(ErrorCode::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorCode::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::PayloadTooLarge.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::GatewayTimeout.status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_taxonomy_mapping() {
        let cases: Vec<(MediadeckError, ErrorCode)> = vec![
            (
                MediadeckError::Validation("x".to_string()),
                ErrorCode::BadRequest,
            ),
            (
                MediadeckError::InvalidPayload("x".to_string()),
                ErrorCode::BadRequest,
            ),
            (
                MediadeckError::UnsupportedFileType("a.exe".to_string()),
                ErrorCode::BadRequest,
            ),
            (MediadeckError::InvalidKeyNumber(6), ErrorCode::BadRequest),
            (
                MediadeckError::UnknownCollection("k".to_string()),
                ErrorCode::BadRequest,
            ),
            (
                MediadeckError::Forbidden("x".to_string()),
                ErrorCode::Forbidden,
            ),
            (
                MediadeckError::NotFound("file".to_string()),
                ErrorCode::NotFound,
            ),
            (
                MediadeckError::QuotaExceeded {
                    used: 1,
                    limit: 2,
                    requested: 3,
                },
                ErrorCode::PayloadTooLarge,
            ),
            (
                MediadeckError::UpstreamTimeout("t".to_string()),
                ErrorCode::GatewayTimeout,
            ),
            (
                MediadeckError::Upstream("u".to_string()),
                ErrorCode::InternalError,
            ),
            (
                MediadeckError::Database("d".to_string()),
                ErrorCode::InternalError,
            ),
        ];

        for (err, expected) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.code(), expected);
        }
    }

    #[test]
    fn test_quota_error_carries_context() {
        let api: ApiError = MediadeckError::QuotaExceeded {
            used: 900,
            limit: 1000,
            requested: 200,
        }
        .into();

        let details = api.details.unwrap();
        assert_eq!(details["storage_used"], 900);
        assert_eq!(details["storage_limit"], 1000);
        assert_eq!(details["file_size"], 200);
    }

    #[test]
    fn test_internal_error_hides_database_detail() {
        let api: ApiError = MediadeckError::Database("secret table missing".to_string()).into();
        assert!(!api.message.contains("secret"));
    }
}
