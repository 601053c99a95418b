//! HTTP server initialization and runtime setup.
//!
//! Handles database setup, state wiring, and the Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::persistence::db;
use crate::routes::app_router;
use crate::security::{HmacCsrfGuard, MutationGuard};
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool (creating the database file if missing)
/// - Idempotent schema setup
/// - CSRF guard (configured secret, or a random per-process one)
/// - Axum HTTP server with graceful shutdown on ctrl-c
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or schema setup fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = db::connect(&config.database_url, config.database_max_connections).await?;
    tracing::info!("Connected to database");

    db::init_schema(&pool).await?;
    tracing::info!("Schema ready");

    let guard: Arc<dyn MutationGuard> = match &config.csrf_secret {
        Some(secret) => Arc::new(HmacCsrfGuard::new(secret.as_bytes())),
        None => Arc::new(HmacCsrfGuard::ephemeral()),
    };

    let state = AppState::new(pool, guard);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Resolves when the process receives ctrl-c.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
