//! HTTP request handlers.
//!
//! The four CRUD handlers share one shape: check the method, decode the body,
//! make one store call, answer in plain text.

use axum::{
    body::Bytes,
    extract::State,
    http::Method,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};

use crate::api::guard::{check_method, MethodGuard};
use crate::api::page;
use crate::api::types::*;
use crate::domain::Student;
use crate::error::{AppError, AppResult};
use crate::AppState;

/// Render the listing page.
///
/// GET /
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Listing page", body = String, content_type = "text/html"),
        (status = 500, description = "Store error", body = String, content_type = "text/plain")
    ),
    tag = "page"
)]
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let students = state.repository.list_students(state.listing_limit).await?;

    tracing::debug!(rows = students.len(), "Rendering listing page");

    let html = page::render_listing(&students)
        .map_err(|e| AppError::Internal(format!("error rendering listing page: {e}")))?;

    Ok(Html(html))
}

/// Create a student.
///
/// POST /alumnos/create
#[utoipa::path(
    post,
    path = "/alumnos/create",
    request_body = Student,
    responses(
        (status = 200, description = "Student created", body = String, content_type = "text/plain"),
        (status = 303, description = "Wrong method, redirected to /"),
        (status = 400, description = "Malformed JSON body", body = String, content_type = "text/plain"),
        (status = 500, description = "Store error", body = String, content_type = "text/plain")
    ),
    tag = "alumnos"
)]
pub async fn create_student(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> AppResult<Response> {
    tracing::info!(method = %method, "Received create request");

    if let MethodGuard::RedirectTo(path) = check_method(&method, &Method::POST) {
        return Ok(redirect("/alumnos/create", path));
    }

    let student: Student = serde_json::from_slice(&body)?;

    if let Err(e) = state.repository.create_student(&student).await {
        if e.is_unique_violation() {
            tracing::warn!(identifier = %student.identifier, "Identifier already registered");
        }
        return Err(e);
    }

    tracing::info!(student = %student, "Student created");

    Ok(Confirmation::created().into_response())
}

/// Look up one student by identifier, with or without leading zeros.
///
/// OPTIONS /alumnos/read
#[utoipa::path(
    options,
    path = "/alumnos/read",
    request_body = Student,
    responses(
        (status = 200, description = "Student found, record in brackets", body = String, content_type = "text/plain"),
        (status = 303, description = "Wrong method, redirected to /"),
        (status = 400, description = "Malformed JSON body", body = String, content_type = "text/plain"),
        (status = 500, description = "Not found or store error", body = String, content_type = "text/plain")
    ),
    tag = "alumnos"
)]
pub async fn read_student(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> AppResult<Response> {
    tracing::info!(method = %method, "Received read request");

    if let MethodGuard::RedirectTo(path) = check_method(&method, &Method::OPTIONS) {
        return Ok(redirect("/alumnos/read", path));
    }

    let wanted: Student = serde_json::from_slice(&body)?;
    let found = state.repository.get_student(&wanted.identifier).await?;

    tracing::info!(identifier = %found.identifier, "Student found");

    Ok(Confirmation::found(&found).into_response())
}

/// Replace a student's name and age.
///
/// PUT /alumnos/update
#[utoipa::path(
    put,
    path = "/alumnos/update",
    request_body = Student,
    responses(
        (status = 200, description = "Student updated", body = String, content_type = "text/plain"),
        (status = 303, description = "Wrong method, redirected to /"),
        (status = 400, description = "Malformed JSON body", body = String, content_type = "text/plain"),
        (status = 500, description = "No rows affected or store error", body = String, content_type = "text/plain")
    ),
    tag = "alumnos"
)]
pub async fn update_student(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> AppResult<Response> {
    tracing::info!(method = %method, "Received update request");

    if let MethodGuard::RedirectTo(path) = check_method(&method, &Method::PUT) {
        return Ok(redirect("/alumnos/update", path));
    }

    let student: Student = serde_json::from_slice(&body)?;
    state.repository.update_student(&student).await?;

    tracing::info!(identifier = %student.identifier, age = student.age, "Student updated");

    Ok(Confirmation::updated().into_response())
}

/// Delete a student.
///
/// DELETE /alumnos/delete
#[utoipa::path(
    delete,
    path = "/alumnos/delete",
    request_body = Student,
    responses(
        (status = 200, description = "Student deleted", body = String, content_type = "text/plain"),
        (status = 303, description = "Wrong method, redirected to /"),
        (status = 400, description = "Malformed JSON body", body = String, content_type = "text/plain"),
        (status = 500, description = "No rows affected or store error", body = String, content_type = "text/plain")
    ),
    tag = "alumnos"
)]
pub async fn delete_student(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> AppResult<Response> {
    tracing::info!(method = %method, "Received delete request");

    if let MethodGuard::RedirectTo(path) = check_method(&method, &Method::DELETE) {
        return Ok(redirect("/alumnos/delete", path));
    }

    let student: Student = serde_json::from_slice(&body)?;
    state.repository.delete_student(&student.identifier).await?;

    tracing::info!(identifier = %student.identifier, "Student deleted");

    Ok(Confirmation::deleted().into_response())
}

/// Health check endpoint.
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_status = match state.repository.ping().await {
        Ok(()) => "connected".to_string(),
        Err(e) => e.to_string(),
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

fn redirect(endpoint: &str, target: &'static str) -> Response {
    tracing::info!(from = endpoint, to = target, "Redirected request with wrong method");
    Redirect::to(target).into_response()
}
