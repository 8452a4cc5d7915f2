//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{short_url}` - Short URL redirect (public)
//! - `GET  /health`      - Health check: database, storage (public)
//! - `GET  /healthy`     - Alias of `/health`
//! - `/url/*`            - Short URL registry
//! - `/users/*`          - Accounts
//! - `/auth/*`           - Login and token refresh
//! - `/uploads/*`        - Uploaded files, when stored on local disk
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Permissive when enabled in configuration
//! - **Authentication** - Bearer access or refresh token per route group
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::api::routes::{auth_routes, url_routes, user_routes};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::path::PathBuf;
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Router options that come from configuration rather than state.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Serve this directory under `/uploads` (local storage backend).
    pub uploads_dir: Option<PathBuf>,
    /// Allow cross-origin requests from any origin.
    pub cors_allow_any: bool,
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState, options: RouterOptions) -> NormalizePath<Router> {
    let mut router = Router::new()
        .route("/{short_url}", get(redirect_handler))
        .route("/health", get(health_handler))
        .route("/healthy", get(health_handler))
        .nest("/url", url_routes(state.clone()))
        .nest("/users", user_routes(state.clone()))
        .nest("/auth", auth_routes(state.clone()));

    if let Some(dir) = options.uploads_dir {
        router = router.nest_service("/uploads", ServeDir::new(dir));
    }

    let mut router = router.with_state(state).layer(tracing::layer());

    if options.cors_allow_any {
        router = router.layer(CorsLayer::permissive());
    }

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
