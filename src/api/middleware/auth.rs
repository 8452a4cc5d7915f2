//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Identity injected into request extensions by [`layer`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Public id of the authenticated user.
    pub id: String,
}

/// Refresh-token identity injected into request extensions by [`refresh_layer`].
#[derive(Debug, Clone)]
pub struct RefreshCredentials {
    /// Public id carried by the refresh token.
    pub id: String,
    /// The raw refresh token, compared against the stored hash on rotation.
    pub token: String,
}

async fn bearer_token(parts: &mut Parts) -> Result<String, AppError> {
    let AuthBearer(token) = AuthBearer::from_request_parts(parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    Ok(token)
}

/// Authenticates requests using access tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <access token>
/// ```
///
/// On success the request carries an [`AuthUser`] extension.
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Authorization header is missing
/// - Token format is invalid
/// - Token signature does not verify or the token has expired
///
/// Adds `WWW-Authenticate: Bearer` header to 401 responses per RFC 6750.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/users/myAccount", get(my_account_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let token = bearer_token(&mut parts).await?;
    let mut req = Request::from_parts(parts, body);

    let claims = st.auth_service.verify_access_token(&token)?;
    req.extensions_mut().insert(AuthUser { id: claims.id });

    Ok(next.run(req).await)
}

/// Authenticates requests using refresh tokens.
///
/// Verifies the token against the refresh key only; access tokens are
/// rejected. On success the request carries [`RefreshCredentials`].
///
/// # Errors
///
/// Returns `401 Unauthorized` under the same conditions as [`layer`].
pub async fn refresh_layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let token = bearer_token(&mut parts).await?;
    let mut req = Request::from_parts(parts, body);

    let claims = st.auth_service.verify_refresh_token(&token)?;
    req.extensions_mut().insert(RefreshCredentials {
        id: claims.id,
        token,
    });

    Ok(next.run(req).await)
}
