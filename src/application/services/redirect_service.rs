//! Redirect resolution with click recording.

use std::sync::Arc;

use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::base62::is_valid_code;
use serde_json::json;
use tracing::debug;

/// Service that resolves short codes to their destination.
///
/// Each successful resolve writes exactly one click row and advances the
/// URL's `last_clicked_time` in the same transaction. If recording fails the
/// redirect is not served.
pub struct RedirectService<U: UrlRepository> {
    url_repository: Arc<U>,
}

impl<U: UrlRepository> RedirectService<U> {
    pub fn new(url_repository: Arc<U>) -> Self {
        Self { url_repository }
    }

    /// Resolves `code` to its original URL and records the click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no URL has this code; no click is
    /// recorded.
    /// Returns [`AppError::Internal`] if the click cannot be recorded.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let not_found = || AppError::not_found("URL not found", json!({ "shortUrl": code }));

        if !is_valid_code(code) {
            return Err(not_found());
        }

        let click = self
            .url_repository
            .record_click(code)
            .await?
            .ok_or_else(not_found)?;

        debug!(code, url_id = click.url_id, clicked_time = %click.clicked_time, "Click recorded");
        Ok(click.original_url)
    }
}
