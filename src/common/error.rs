// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

// PostgreSQL SQLSTATEs for transaction aborts that are safe to retry.
const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    ValidationError(#[from] ValidationErrors),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Forbidden: {0}")]
    Forbidden(&'static str),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Request already processed")]
    AlreadyProcessed,

    #[error("Asset out of stock")]
    OutOfStock,

    #[error("Employee seat limit reached")]
    QuotaExceeded,

    // The affiliation unique key was taken by a concurrent transaction.
    #[error("Affiliation created concurrently")]
    AffiliationRace,

    #[error("Missing or malformed caller identity")]
    Unauthenticated,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Builds a single-field `ValidationError`, in the same shape `validator` produces.
    pub fn invalid_field(field: &'static str, code: &'static str, message: &'static str) -> Self {
        let mut err = ValidationError::new(code);
        err.message = Some(message.into());
        let mut errors = ValidationErrors::new();
        errors.add(field, err);
        AppError::ValidationError(errors)
    }

    /// Only affiliation races and transient transaction aborts may be retried
    /// automatically; everything else needs the caller to change something.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::AffiliationRace => true,
            AppError::DatabaseError(e) => is_transient(e),
            _ => false,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::InvalidState(_) => "INVALID_STATE",
            AppError::AlreadyProcessed => "ALREADY_PROCESSED",
            AppError::OutOfStock => "OUT_OF_STOCK",
            AppError::QuotaExceeded => "QUOTA_EXCEEDED",
            AppError::AffiliationRace => "AFFILIATION_RACE",
            AppError::Unauthenticated => "UNAUTHENTICATED",
            AppError::DatabaseError(e) if is_transient(e) => "TRANSACTION_CONFLICT",
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => "INTERNAL",
        }
    }
}

fn is_transient(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db_err| db_err.code())
        .is_some_and(|code| code == SERIALIZATION_FAILURE || code == DEADLOCK_DETECTED)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let retryable = self.is_retryable();

        let (status, error_message) = match &self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "code": code,
                    "retryable": false,
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::NotFound(entity) => (StatusCode::NOT_FOUND, format!("{entity} not found.")),
            AppError::Forbidden(reason) => (StatusCode::FORBIDDEN, format!("Not allowed: {reason}.")),
            AppError::InvalidState(reason) => (StatusCode::CONFLICT, reason.clone()),
            AppError::AlreadyProcessed => {
                (StatusCode::CONFLICT, "This request has already been processed.".to_string())
            }
            AppError::OutOfStock => (StatusCode::CONFLICT, "This asset is out of stock.".to_string()),
            AppError::QuotaExceeded => (
                StatusCode::PAYMENT_REQUIRED,
                "Employee limit reached. Upgrade your package to add more employees.".to_string(),
            ),
            AppError::AffiliationRace => (
                StatusCode::CONFLICT,
                "The employee was affiliated concurrently. Try again.".to_string(),
            ),
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "Caller identity is missing or invalid.".to_string(),
            ),
            AppError::DatabaseError(e) if is_transient(e) => {
                tracing::warn!("Transient transaction abort: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "The operation conflicted with another one. Try again.".to_string(),
                )
            }
            e => {
                tracing::error!("Internal server error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message, "code": code, "retryable": retryable }));
        (status, body).into_response()
    }
}
