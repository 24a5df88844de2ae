//! API response types.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Student;

// ==================== CRUD confirmations ====================

/// Plain-text confirmation returned by a successful CRUD request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation(pub String);

impl Confirmation {
    pub fn created() -> Self {
        Self("POST request processed successfully.".to_string())
    }

    /// Read confirmation; the page script extracts the bracketed record.
    pub fn found(student: &Student) -> Self {
        Self(format!(
            "GET (OPTIONS) request processed successfully: {}",
            student.bracketed()
        ))
    }

    pub fn updated() -> Self {
        Self("PUT request processed successfully.".to_string())
    }

    pub fn deleted() -> Self {
        Self("DELETE request processed successfully.".to_string())
    }
}

impl IntoResponse for Confirmation {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.0,
        )
            .into_response()
    }
}

// ==================== Health ====================

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Database connection status.
    pub database: String,
    /// Current timestamp.
    pub timestamp: String,
}
