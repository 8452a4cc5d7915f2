//! Handlers for login and access token refresh.

use axum::{Extension, Json, extract::State};
use validator::Validate;

use crate::api::dto::auth::{AccessTokenResponse, LoginRequest, TokenPairResponse};
use crate::api::middleware::RefreshCredentials;
use crate::error::AppError;
use crate::state::AppState;

/// Exchanges email and password for an access and a refresh token.
///
/// # Endpoint
///
/// `POST /auth/login`
///
/// # Errors
///
/// Returns 404 Not Found if no live account has this email.
/// Returns 400 Bad Request if the password is wrong.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenPairResponse>, AppError> {
    payload.validate()?;

    let pair = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(pair.into()))
}

/// Issues a new access token for a valid refresh token.
///
/// # Endpoint
///
/// `POST /auth/refresh` with `Authorization: Bearer <refresh token>`
///
/// # Errors
///
/// Returns 401 Unauthorized if the token is not the latest one issued to the user.
pub async fn refresh_handler(
    State(state): State<AppState>,
    Extension(credentials): Extension<RefreshCredentials>,
) -> Result<Json<AccessTokenResponse>, AppError> {
    let access_token = state
        .auth_service
        .rotate_access_token(&credentials.id, &credentials.token)
        .await?;

    Ok(Json(AccessTokenResponse { access_token }))
}
