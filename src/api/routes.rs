//! Route definitions for the API.

use axum::{
    routing::{any, get},
    Json, Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api::handlers;
use crate::AppState;

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::index,
        handlers::create_student,
        handlers::read_student,
        handlers::update_student,
        handlers::delete_student,
        handlers::health_check,
    ),
    components(schemas(
        crate::domain::Student,
        crate::api::types::HealthResponse,
    )),
    tags(
        (name = "page", description = "Server-rendered listing page"),
        (name = "alumnos", description = "Student CRUD endpoints"),
        (name = "health", description = "Health and status endpoints")
    ),
    info(
        title = "Alumnos CRUD API",
        version = "0.1.0",
        description = "Single-table student registry",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router.
///
/// CRUD routes accept every method so that their handlers can redirect the
/// ones they do not serve.
pub fn build_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        // Listing page
        .route("/", get(handlers::index))
        // CRUD
        .route("/alumnos/create", any(handlers::create_student))
        .route("/alumnos/read", any(handlers::read_student))
        .route("/alumnos/update", any(handlers::update_student))
        .route("/alumnos/delete", any(handlers::delete_student))
        // Health
        .route("/health", get(handlers::health_check))
        .with_state(state)
        // OpenAPI document
        .route("/api-docs/openapi.json", get(openapi_json))
        // Static assets
        .nest_service("/static", ServeDir::new(static_dir))
        // Middleware
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use tower::ServiceExt;

    use crate::domain::Student;
    use crate::storage::StudentRepository;

    async fn setup() -> (Router, StudentRepository) {
        crate::logging::init_test();

        let repository = StudentRepository::connect("sqlite::memory:", 1)
            .await
            .expect("Failed to create test database");
        repository.init_schema().await.expect("Failed to init schema");

        let state = AppState {
            repository: repository.clone(),
            listing_limit: 50,
        };
        (build_router(state, "static"), repository)
    }

    async fn send(router: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_create_then_read_padded_and_stripped() {
        let (router, _) = setup().await;

        let (status, text) = send(
            &router,
            Method::POST,
            "/alumnos/create",
            r#"{"matricula":"00012345","nombre":"Ana","edad":21}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(!text.contains("error"));

        for identifier in ["00012345", "12345"] {
            let (status, text) = send(
                &router,
                Method::OPTIONS,
                "/alumnos/read",
                &format!(r#"{{"matricula":"{identifier}","nombre":null,"edad":null}}"#),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert!(text.ends_with("[00012345,Ana,21]"), "{text}");
        }
    }

    #[tokio::test]
    async fn test_wrong_method_redirects_without_store_call() {
        let (router, repository) = setup().await;
        let body = r#"{"matricula":"1","nombre":"Ana","edad":21}"#;

        for (method, uri) in [
            (Method::GET, "/alumnos/create"),
            (Method::PUT, "/alumnos/create"),
            (Method::GET, "/alumnos/read"),
            (Method::POST, "/alumnos/update"),
            (Method::GET, "/alumnos/delete"),
        ] {
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::from(body))
                .unwrap();
            let response = router.clone().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(response.headers()[header::LOCATION], "/");
        }

        assert!(repository.list_students(50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_method_on_delete_keeps_record() {
        let (router, repository) = setup().await;
        repository
            .create_student(&Student::new("7", "Luis", 18))
            .await
            .unwrap();

        let (status, _) = send(
            &router,
            Method::POST,
            "/alumnos/delete",
            r#"{"matricula":"7"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(repository.list_students(50).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_bad_json_is_client_error() {
        let (router, repository) = setup().await;

        for (method, uri) in [
            (Method::POST, "/alumnos/create"),
            (Method::OPTIONS, "/alumnos/read"),
            (Method::PUT, "/alumnos/update"),
            (Method::DELETE, "/alumnos/delete"),
        ] {
            let (status, text) = send(&router, method, uri, "{not json").await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(text.contains("error"));
        }

        assert!(repository.list_students(50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_record() {
        let (router, _) = setup().await;

        let (status, text) = send(
            &router,
            Method::PUT,
            "/alumnos/update",
            r#"{"matricula":"99","nombre":"Nadie","edad":1}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(text.contains("affected no rows"));

        let (status, text) = send(
            &router,
            Method::DELETE,
            "/alumnos/delete",
            r#"{"matricula":"99","nombre":null,"edad":null}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(text.contains("affected no rows"));
    }

    #[tokio::test]
    async fn test_update_then_delete() {
        let (router, repository) = setup().await;
        repository
            .create_student(&Student::new("7", "Luis", 18))
            .await
            .unwrap();

        let (status, _) = send(
            &router,
            Method::PUT,
            "/alumnos/update",
            r#"{"matricula":"7","nombre":"Luisa","edad":19}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            repository.get_student("7").await.unwrap(),
            Student::new("00000007", "Luisa", 19)
        );

        let (status, _) = send(
            &router,
            Method::DELETE,
            "/alumnos/delete",
            r#"{"matricula":"7","nombre":null,"edad":null}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(repository.list_students(50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_missing_record_is_server_error() {
        let (router, _) = setup().await;

        let (status, text) = send(
            &router,
            Method::OPTIONS,
            "/alumnos/read",
            r#"{"matricula":"00000001"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(text.contains("error"));
    }

    #[tokio::test]
    async fn test_duplicate_create_is_server_error() {
        let (router, _) = setup().await;
        let body = r#"{"matricula":"00000042","nombre":"Ana","edad":20}"#;

        let (status, _) = send(&router, Method::POST, "/alumnos/create", body).await;
        assert_eq!(status, StatusCode::OK);

        let (status, text) = send(&router, Method::POST, "/alumnos/create", body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(text.contains("error"));
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_identifiers() {
        let (router, repository) = setup().await;

        for identifier in ["abc", "", "123456789", "1e3"] {
            let (status, text) = send(
                &router,
                Method::POST,
                "/alumnos/create",
                &format!(r#"{{"matricula":"{identifier}","nombre":"Ana","edad":20}}"#),
            )
            .await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{identifier}");
            assert!(text.contains("error"));
        }

        assert!(repository.list_students(50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_all_zero_identifier_misses_stored_zero() {
        let (router, repository) = setup().await;
        repository
            .create_student(&Student::new("0", "Cero", 20))
            .await
            .unwrap();

        let (status, text) = send(
            &router,
            Method::OPTIONS,
            "/alumnos/read",
            r#"{"matricula":"00000000","nombre":null,"edad":null}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(text.contains("no record with identifier '00000000'"), "{text}");
    }

    #[tokio::test]
    async fn test_index_renders_null_age_as_zero() {
        let (router, repository) = setup().await;
        sqlx::query("INSERT INTO alumnos (matricula, nombre, edad) VALUES ('123', 'Eva', NULL)")
            .execute(repository.pool())
            .await
            .unwrap();

        let (status, html) = send(&router, Method::GET, "/", "").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("00000123, Eva, 0"));
    }

    #[tokio::test]
    async fn test_index_store_failure_is_server_error() {
        let (router, repository) = setup().await;
        repository.close().await;

        let (status, text) = send(&router, Method::GET, "/", "").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(text.contains("error"));
    }

    #[tokio::test]
    async fn test_health_and_openapi() {
        let (router, _) = setup().await;

        let (status, text) = send(&router, Method::GET, "/health", "").await;
        assert_eq!(status, StatusCode::OK);
        let health: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(health["database"], "connected");

        let (status, text) = send(&router, Method::GET, "/api-docs/openapi.json", "").await;
        assert_eq!(status, StatusCode::OK);
        assert!(text.contains("/alumnos/read"));
    }

    #[tokio::test]
    async fn test_static_assets_are_served() {
        let (router, _) = setup().await;

        let (status, text) = send(&router, Method::GET, "/static/scripts.js", "").await;
        assert_eq!(status, StatusCode::OK);
        assert!(text.contains("/alumnos/create"));
    }
}
