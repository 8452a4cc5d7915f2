//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, object storage setup and the
//! Axum server lifecycle.

use crate::config::{Config, StorageConfig};
use crate::infrastructure::storage::{LocalStorage, ObjectStorage, S3Storage};
use crate::routes::{RouterOptions, app_router};
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens the connection pool with the configured limits.
///
/// # Errors
///
/// Returns an error if the database cannot be reached.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Builds the configured object storage backend.
pub async fn build_storage(storage: &StorageConfig) -> Arc<dyn ObjectStorage> {
    match storage {
        StorageConfig::Local { dir, public_url } => {
            tracing::info!(dir = %dir.display(), "Storage: local filesystem");
            Arc::new(LocalStorage::new(dir.clone(), public_url.clone()))
        }
        StorageConfig::S3(settings) => Arc::new(S3Storage::connect(settings.clone()).await),
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Object storage (local disk or S3)
/// - Axum HTTP server with graceful shutdown on Ctrl-C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;
    tracing::info!("Migrations applied");

    let storage = build_storage(&config.storage).await;
    if !storage.health_check().await {
        tracing::warn!("Object storage is not reachable; uploads will fail until it is");
    }

    let options = RouterOptions {
        uploads_dir: match &config.storage {
            StorageConfig::Local { dir, .. } => Some(dir.clone()),
            StorageConfig::S3(_) => None,
        },
        cors_allow_any: config.cors_allow_any,
    };

    let state = AppState::new(
        Arc::new(pool),
        storage,
        config.token_settings(),
        config.base_url.clone(),
    );

    let app = app_router(state, options);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
