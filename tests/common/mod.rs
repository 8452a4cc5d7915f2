#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use serde_json::json;
use short_url_service::application::services::TokenSettings;
use short_url_service::infrastructure::storage::LocalStorage;
use short_url_service::routes::{RouterOptions, app_router};
use short_url_service::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;
use tempfile::TempDir;

pub const BASE_URL: &str = "http://short.test";
pub const UPLOADS_URL: &str = "http://short.test/uploads";
pub const EMAIL: &str = "john@x.com";
pub const PASSWORD: &str = "Secure1!pass";

pub fn test_token_settings() -> TokenSettings {
    TokenSettings {
        access_secret: "test-access-secret".to_string(),
        refresh_secret: "test-refresh-secret".to_string(),
        signing_secret: "test-signing-secret".to_string(),
        access_ttl_seconds: 3600,
    }
}

/// State backed by the test database and a throwaway upload directory.
///
/// Keep the returned [`TempDir`] alive for the duration of the test.
pub fn create_test_state(pool: PgPool) -> (AppState, TempDir) {
    let uploads = tempfile::tempdir().unwrap();
    let storage = Arc::new(LocalStorage::new(uploads.path(), UPLOADS_URL));

    let state = AppState::new(
        Arc::new(pool),
        storage,
        test_token_settings(),
        BASE_URL.to_string(),
    );

    (state, uploads)
}

/// The full application, as served in production.
pub fn make_server(pool: PgPool) -> (TestServer, TempDir) {
    let (state, uploads) = create_test_state(pool);
    let options = RouterOptions {
        uploads_dir: Some(uploads.path().to_path_buf()),
        cors_allow_any: false,
    };
    let app = Router::new().fallback_service(app_router(state, options));

    (TestServer::new(app).unwrap(), uploads)
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub async fn sign_up(server: &TestServer, email: &str, password: &str) -> serde_json::Value {
    let response = server
        .post("/users/signup")
        .json(&json!({ "email": email, "password": password }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}

/// Logs in and returns `(access_token, refresh_token)`.
pub async fn login(server: &TestServer, email: &str, password: &str) -> (String, String) {
    let response = server
        .post("/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    (
        body["accessToken"].as_str().unwrap().to_string(),
        body["refreshToken"].as_str().unwrap().to_string(),
    )
}

/// Signs up and logs in, returning the access token.
pub async fn signed_in(server: &TestServer, email: &str) -> String {
    sign_up(server, email, PASSWORD).await;
    login(server, email, PASSWORD).await.0
}

/// Creates a short URL and returns the response body.
pub async fn create_url(server: &TestServer, token: &str, original_url: &str) -> serde_json::Value {
    let response = server
        .post("/url/new")
        .add_header("Authorization", bearer(token))
        .json(&json!({ "originalUrl": original_url }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}

pub async fn create_test_user(pool: &PgPool, public_id: &str, email: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (public_id, email, password_hash, username) \
         VALUES ($1, $2, 'not-a-real-hash', 'tester') RETURNING id",
    )
    .bind(public_id)
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_clicks(pool: &PgPool, url_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url_click_history WHERE url_id = $1")
        .bind(url_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
