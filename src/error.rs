//! Unified error type for the xpayroll API
//!
//! `AppError` carries a closed [`ErrorCode`] plus a human-readable message
//! and converts straight into an HTTP response, so handlers and services can
//! propagate with `?` end to end.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

/// Error taxonomy of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad input shape (400)
    InvalidRequest,
    /// Login failed (400)
    InvalidCredentials,
    /// No/invalid/expired token (401)
    Unauthenticated,
    /// Valid token, wrong role (403)
    Unauthorized,
    /// Queried entity absent (404)
    NotFound,
    /// Store uniqueness violated (409)
    AlreadyExists,
    /// The ledger processed and declined the transaction (422)
    LedgerRejection,
    /// Store or network unreachable (502)
    InfrastructureError,
    /// Everything else (500)
    InternalError,
}

impl ErrorCode {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Unauthorized => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::LedgerRejection => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InfrastructureError => StatusCode::BAD_GATEWAY,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::LedgerRejection => "LEDGER_REJECTION",
            Self::InfrastructureError => "INFRASTRUCTURE_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid request.",
            Self::InvalidCredentials => "Invalid credentials.",
            Self::Unauthenticated => "No token provided.",
            Self::Unauthorized => "Access denied. Admins only.",
            Self::NotFound => "Resource not found.",
            Self::AlreadyExists => "Resource already exists.",
            Self::LedgerRejection => "Transaction rejected by the ledger.",
            Self::InfrastructureError => "Upstream service unavailable.",
            Self::InternalError => "Internal server error.",
        }
    }
}

/// Application error with a structured code
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
}

impl AppError {
    /// Create an error with the default message for the code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.default_message().to_string(),
            code,
        }
    }

    /// Create an error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NotFound, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, message)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if e.as_database_error()
            .is_some_and(|d| matches!(d.kind(), sqlx::error::ErrorKind::UniqueViolation))
        {
            return AppError::new(ErrorCode::AlreadyExists);
        }
        tracing::error!(error = %e, "database error");
        AppError::new(ErrorCode::InfrastructureError)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.code.http_status();
        let body = serde_json::json!({
            "code": self.code.as_str(),
            "message": self.message,
        });
        (status, Json(body)).into_response()
    }
}
