//! Handlers for the short URL endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::url::{
    ClickItem, CreateUrlRequest, CreatedUrlResponse, ListResponse, StatusResponse,
    UrlMetaResponse, UrlResponse,
};
use crate::api::middleware::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL owned by the caller.
///
/// # Endpoint
///
/// `POST /url/new`
///
/// # Request Body
///
/// ```json
/// { "originalUrl": "https://example.com/a" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "pk": 10,
///   "shortUrl": "00000a",
///   "originalUrl": "https://example.com/a",
///   "link": "http://localhost:3000/00000a",
///   "createdAt": "2025-01-01T00:00:00Z",
///   "updatedAt": "2025-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is not an absolute `http`/`https` URL.
/// Returns 404 Not Found if the caller's account no longer exists.
pub async fn create_url_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<CreatedUrlResponse>), AppError> {
    payload.validate()?;

    let url = state
        .url_service
        .create(&user.id, &payload.original_url)
        .await?;
    let link = state.url_service.short_link(&url.code);

    Ok((StatusCode::CREATED, Json(CreatedUrlResponse::new(url, link))))
}

/// Looks up a short URL without recording a click.
///
/// # Endpoint
///
/// `GET /url/get/{short_url}`
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist.
pub async fn get_url_handler(
    State(state): State<AppState>,
    Path(short_url): Path<String>,
) -> Result<Json<UrlResponse>, AppError> {
    let url = state.url_service.lookup_by_code(&short_url).await?;
    let link = state.url_service.short_link(&url.code);

    Ok(Json(UrlResponse::new(url, link)))
}

/// Deletes one of the caller's short URLs together with its history.
///
/// # Endpoint
///
/// `DELETE /url/{short_url}`
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist or is owned by someone else.
pub async fn delete_url_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(short_url): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    state.url_service.delete(&user.id, &short_url).await?;

    Ok(Json(StatusResponse::ok()))
}

/// Returns the metadata of one of the caller's URLs.
///
/// # Endpoint
///
/// `GET /url/inspect/{url_id}`
///
/// # Errors
///
/// Returns 404 Not Found if the caller owns no URL with this id.
pub async fn inspect_url_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(url_id): Path<i64>,
) -> Result<Json<UrlMetaResponse>, AppError> {
    let details = state.url_service.get_meta(&user.id, url_id).await?;

    Ok(Json(details.into()))
}

/// Returns every recorded click of one of the caller's URLs, oldest first.
///
/// # Endpoint
///
/// `GET /url/history/{url_id}`
///
/// # Response
///
/// ```json
/// {
///   "items": [
///     { "pk": 1, "clickedTime": "...", "createdAt": "...", "updatedAt": "..." }
///   ],
///   "count": 1
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the caller owns no URL with this id.
pub async fn url_history_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(url_id): Path<i64>,
) -> Result<Json<ListResponse<ClickItem>>, AppError> {
    let (clicks, count) = state.url_service.get_history(&user.id, url_id).await?;

    Ok(Json(ListResponse::from_items(clicks, count)))
}
