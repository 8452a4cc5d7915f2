//! API route configuration.
//!
//! Mutating and owner-scoped endpoints require an access token via
//! [`crate::api::middleware::auth::layer`]; `/auth/refresh` requires a refresh
//! token via [`crate::api::middleware::auth::refresh_layer`].

use crate::api::handlers::{
    change_password_handler, create_url_handler, delete_profile_image_handler,
    delete_url_handler, get_url_handler, inspect_url_handler, login_handler, my_account_handler,
    my_urls_handler, refresh_handler, sign_out_handler, sign_up_handler,
    upload_profile_image_handler, url_history_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, patch, post},
};

/// Upper bound for profile image uploads.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Short URL routes, mounted under `/url`.
///
/// # Endpoints
///
/// - `POST   /new`               - Create a short URL (access token)
/// - `GET    /get/{short_url}`   - Look up a short URL (public)
/// - `DELETE /{short_url}`       - Delete an owned short URL (access token)
/// - `GET    /inspect/{url_id}`  - Metadata of an owned URL (access token)
/// - `GET    /history/{url_id}`  - Click history of an owned URL (access token)
pub fn url_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/new", post(create_url_handler))
        .route("/{short_url}", delete(delete_url_handler))
        .route("/inspect/{url_id}", get(inspect_url_handler))
        .route("/history/{url_id}", get(url_history_handler))
        .route_layer(middleware::from_fn_with_state(state, auth::layer));

    Router::new()
        .route("/get/{short_url}", get(get_url_handler))
        .merge(protected)
}

/// Account routes, mounted under `/users`.
///
/// # Endpoints
///
/// - `POST   /signup`      - Register (public)
/// - `GET    /myAccount`   - Own account (access token)
/// - `PATCH  /password`    - Change password (access token)
/// - `POST   /signout`     - Close the account (access token)
/// - `GET    /url`         - Own short URLs (access token)
/// - `POST   /profile-img` - Upload profile image (access token, multipart)
/// - `DELETE /profile-img` - Delete profile image (access token)
pub fn user_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/myAccount", get(my_account_handler))
        .route("/password", patch(change_password_handler))
        .route("/signout", post(sign_out_handler))
        .route("/url", get(my_urls_handler))
        .route(
            "/profile-img",
            post(upload_profile_image_handler).delete(delete_profile_image_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .route_layer(middleware::from_fn_with_state(state, auth::layer));

    Router::new()
        .route("/signup", post(sign_up_handler))
        .merge(protected)
}

/// Session routes, mounted under `/auth`.
///
/// # Endpoints
///
/// - `POST /login`   - Issue an access and refresh token (public)
/// - `POST /refresh` - Issue a new access token (refresh token)
pub fn auth_routes(state: AppState) -> Router<AppState> {
    let refresh = Router::new()
        .route("/refresh", post(refresh_handler))
        .route_layer(middleware::from_fn_with_state(state, auth::refresh_layer));

    Router::new()
        .route("/login", post(login_handler))
        .merge(refresh)
}
