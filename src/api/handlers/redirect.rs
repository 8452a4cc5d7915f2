//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{short_url}`
///
/// # Request Flow
///
/// 1. Resolve the code and record the click in one transaction
/// 2. Return `301 Moved Permanently` with the original URL in `Location`
///
/// The redirect is only served once the click is committed.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 500 Internal Server Error if the click cannot be recorded or the
/// stored URL is not a valid header value.
pub async fn redirect_handler(
    Path(short_url): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state.redirect_service.resolve(&short_url).await?;

    let location = HeaderValue::try_from(original_url.as_str()).map_err(|e| {
        tracing::error!(code = %short_url, error = %e, "Stored URL is not a valid Location header");
        AppError::internal("Invalid redirect target", json!({ "shortUrl": short_url }))
    })?;

    // axum's Redirect::permanent answers 308
    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]))
}
