//! Error type and wire-level error response structure

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error with structured error code
///
/// This is the primary error type for the service. The code determines the
/// HTTP status and the default client-visible `error` text; `message`
/// optionally carries additional client-safe detail. Internal detail (SQL,
/// stack traces) must never be placed in `message` — log it server-side and
/// use a bare code instead.
#[derive(Debug, Clone, Error)]
#[error("{code}: {}", .message.as_deref().unwrap_or(.code.message()))]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Optional client-safe detail message
    pub message: Option<String>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: None,
        }
    }

    /// Create a new error with a custom detail message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
        }
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(code: ErrorCode, msg: impl Into<String>) -> Self {
        Self::with_message(code, msg)
    }

    /// Create a not authenticated error
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    /// Create a token expired error
    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    /// Create an invalid token error
    pub fn invalid_token() -> Self {
        Self::new(ErrorCode::TokenInvalid)
    }

    /// Create a forbidden error
    pub fn forbidden() -> Self {
        Self::new(ErrorCode::AdminRequired)
    }

    /// Create an internal error (no client-visible detail)
    pub fn internal() -> Self {
        Self::new(ErrorCode::InternalError)
    }

    /// Create a storage unavailable error
    pub fn storage_unavailable() -> Self {
        Self::new(ErrorCode::StorageUnavailable)
    }
}

/// Wire-level error response body
///
/// All error responses share this shape:
/// ```json
/// { "error": "Invoice not found", "message": "..." }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short error text (default message of the error code)
    pub error: String,
    /// Optional additional client-safe detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            error: err.code.message().to_string(),
            message: err.message.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        // System errors are logged here; the client only sees the code text
        if matches!(
            self.code,
            ErrorCode::InternalError | ErrorCode::DatabaseError | ErrorCode::Unknown
        ) {
            tracing::error!(code = %self.code, error = %self, "internal error");
        }

        let status = self.http_status();
        let body = ErrorBody::from(&self);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_message_from_code() {
        let err = AppError::new(ErrorCode::InvoiceNotFound);
        let body = ErrorBody::from(&err);
        assert_eq!(body.error, "Invoice not found");
        assert!(body.message.is_none());
    }

    #[test]
    fn test_detail_message_preserved() {
        let err = AppError::with_message(
            ErrorCode::InvoiceNotFound,
            "No verified bank account information found for this invoice number",
        );
        let body = ErrorBody::from(&err);
        assert_eq!(body.error, "Invoice not found");
        assert_eq!(
            body.message.as_deref(),
            Some("No verified bank account information found for this invoice number")
        );
    }

    #[test]
    fn test_message_field_omitted_when_absent() {
        let err = AppError::unauthorized();
        let json = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(json["error"], "Authentication required");
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_convenience_constructors_map_status() {
        let missing = AppError::not_found(ErrorCode::InvoiceNotFound, "no such invoice");
        assert_eq!(missing.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(missing.message.as_deref(), Some("no such invoice"));

        assert_eq!(AppError::forbidden().http_status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_credential_errors_are_indistinguishable() {
        // Unknown username and wrong password must produce identical bodies
        let unknown_user = ErrorBody::from(&AppError::invalid_credentials());
        let wrong_password = ErrorBody::from(&AppError::invalid_credentials());
        assert_eq!(unknown_user.error, wrong_password.error);
        assert_eq!(unknown_user.message, wrong_password.message);
    }
}
