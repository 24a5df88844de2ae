//! Alumnos CRUD - student registry service
//!
//! Serves a listing page of student records and four endpoints that create,
//! read, update and delete them in a single SQL table.

use tokio::net::TcpListener;

mod api;
mod config;
mod domain;
mod error;
mod logging;
mod storage;

use crate::api::build_router;
use crate::config::Config;
use crate::storage::StudentRepository;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database repository.
    pub repository: StudentRepository,
    /// Maximum number of rows on the listing page.
    pub listing_limit: i64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: No .env file loaded ({e})");
    }

    // Logging is configured from the loaded settings, so failures before
    // this point only reach stderr.
    let config = Config::load().map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;
    config.validate()?;

    logging::init(&config.logging)?;

    tracing::info!("Starting alumnos-crud v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        database = %config.database.url,
        static_dir = %config.server.static_dir,
        listing_limit = config.listing.limit,
        log_format = ?config.logging.format,
        "Configuration loaded"
    );

    // Connection failures are fatal; nothing is retried.
    let repository =
        StudentRepository::connect(&config.database.url, config.database.max_connections)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to connect to database");
                anyhow::anyhow!("Database connection error: {}", e)
            })?;

    repository.init_schema().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize database schema");
        anyhow::anyhow!("Schema initialization error: {}", e)
    })?;

    tracing::info!("Database connected and schema initialized");

    let state = AppState {
        repository: repository.clone(),
        listing_limit: config.listing.limit,
    };

    let app = build_router(state, &config.server.static_dir);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(address = %addr, "Server listening");
    tracing::info!("Listing page available at http://{}/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    repository.close().await;
    tracing::info!("Database pool closed, shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received terminate signal, shutting down"),
    }
}
