/// Error handling for the API server
///
/// A unified error type that maps to HTTP responses. Handlers return
/// `ApiResult<T>` and the conversion to a status code and JSON body happens
/// in one place.
///
/// # Taxonomy
///
/// - `Validation` (400): per-field errors, accumulated — the response
///   carries every violation so a client can fix them all in one round
///   trip. A taken username is reported here, deliberately not as 409.
/// - `Forbidden` (403): missing authentication on a protected route, or a
///   mutation by a non-owner. Bad credentials never produce this directly;
///   they resolve to the anonymous principal, which then fails the
///   capability check.
/// - `NotFound` (404): unknown article id.
/// - `Conflict` (409): a write collision surfaced by the store. Not
///   retried.
/// - `Unavailable` (503): the backing store is unreachable. Not retried.
/// - `Internal` (500): everything else; details are logged server-side and
///   never sent to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use gazette_shared::auth::principal::Forbidden;
use gazette_shared::auth::password::PasswordError;
use gazette_shared::store::StoreError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400), with one entry per offending field
    Validation(Vec<FieldError>),

    /// Forbidden (403)
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409)
    Conflict(String),

    /// Internal server error (500)
    Internal(String),

    /// Service unavailable (503)
    Unavailable(String),
}

/// A single field-level validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

impl FieldError {
    /// Convenience constructor
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g. "validation_error", "forbidden")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Field-level errors, present for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Unavailable(msg) => write!(f, "Service unavailable: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
            ApiError::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                msg,
                None,
            ),
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert store errors to API errors
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound("Resource not found".to_string()),
            StoreError::Conflict(msg) => ApiError::Conflict(msg),
            StoreError::Unavailable(msg) => ApiError::Unavailable(msg),
            StoreError::Serialization(e) => ApiError::Internal(format!("Serialization: {}", e)),
            StoreError::Corrupt(msg) => ApiError::Internal(format!("Corrupt document: {}", msg)),
        }
    }
}

/// Convert capability denials to API errors
impl From<Forbidden> for ApiError {
    fn from(err: Forbidden) -> Self {
        ApiError::Forbidden(err.to_string())
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::NotFound("No such article".to_string());
        assert_eq!(err.to_string(), "Not found: No such article");

        let err = ApiError::Forbidden("Must authenticate as article owner".to_string());
        assert_eq!(err.to_string(), "Forbidden: Must authenticate as article owner");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ApiError::Validation(vec![
            FieldError::new("title", "Missing."),
            FieldError::new("body", "Missing."),
        ]);
        assert_eq!(err.to_string(), "Validation failed: 2 errors");
    }

    #[test]
    fn test_store_error_mapping() {
        let err: ApiError = StoreError::NotFound.into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = StoreError::Unavailable("connection refused".to_string()).into();
        assert!(matches!(err, ApiError::Unavailable(_)));
    }

    #[test]
    fn test_forbidden_mapping() {
        let err: ApiError = Forbidden::NotOwner.into();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }
}
