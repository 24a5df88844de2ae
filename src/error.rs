//! Error types for the student registry.
//!
//! Defines a unified error type that maps cleanly to plain-text HTTP responses.
//! Every message contains the word "error": the page script tells failures from
//! confirmations by that substring.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Unified error type for registry operations.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("error decoding student from request body (JSON): {0}")]
    Decode(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("error storing student: identifier '{0}' must be 1 to 8 digits")]
    InvalidIdentifier(String),

    #[error("error looking up student: no record with identifier '{0}'")]
    NotFound(String),

    #[error("error: {operation} affected no rows, check that identifier '{identifier}' is correct")]
    NoRowsAffected {
        operation: &'static str,
        identifier: String,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Decode(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_)
            | AppError::InvalidIdentifier(_)
            | AppError::NotFound(_)
            | AppError::NoRowsAffected { .. }
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this is the "update/delete matched nothing" failure.
    pub fn is_no_rows_affected(&self) -> bool {
        matches!(self, AppError::NoRowsAffected { .. })
    }

    /// Whether this error comes from a uniqueness constraint in the store.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            AppError::Database(sqlx::Error::Database(e)) => e.is_unique_violation(),
            _ => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        match &self {
            AppError::Decode(_) => tracing::warn!(error = %message, "Rejected request body"),
            AppError::InvalidIdentifier(_) => {
                tracing::warn!(error = %message, "Store rejected identifier")
            }
            AppError::NotFound(_) | AppError::NoRowsAffected { .. } => {
                tracing::warn!(error = %message, "Store operation matched no rows")
            }
            AppError::Database(e) => tracing::error!(error = %e, "Database error"),
            AppError::Config(_) | AppError::Internal(_) => {
                tracing::error!(error = %message, "Internal error")
            }
        }

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            message,
        )
            .into_response()
    }
}

/// Result type alias for registry operations.
pub type AppResult<T> = Result<T, AppError>;
