//! Short URL registry service.

use std::sync::Arc;

use crate::domain::entities::{ClickEvent, OwnedUrl, ShortUrl, UrlMetaDetails, User};
use crate::domain::repositories::{UrlRepository, UserRepository};
use crate::error::AppError;
use crate::utils::base62::{is_valid_code, short_code};
use crate::utils::url_validator::validate_original_url;
use serde_json::json;
use tracing::info;

/// Service for creating, inspecting and deleting short URLs.
///
/// Short codes are derived from the row id, so creation never needs a
/// collision retry loop. Every mutating or owner-scoped operation first
/// resolves the caller's public id to a live account.
pub struct UrlService<U: UrlRepository, R: UserRepository> {
    url_repository: Arc<U>,
    user_repository: Arc<R>,
    base_url: String,
}

impl<U: UrlRepository, R: UserRepository> UrlService<U, R> {
    /// Creates a new URL service.
    ///
    /// `base_url` is the public origin used by [`Self::short_link`].
    pub fn new(url_repository: Arc<U>, user_repository: Arc<R>, base_url: String) -> Self {
        Self {
            url_repository,
            user_repository,
            base_url,
        }
    }

    async fn owner(&self, public_id: &str) -> Result<User, AppError> {
        self.user_repository
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": public_id })))
    }

    /// Creates a short URL owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the owner does not exist or is deleted.
    /// Returns [`AppError::Validation`] if `original_url` is not an absolute
    /// `http`/`https` URL.
    /// Returns [`AppError::Internal`] on database errors; nothing is persisted.
    pub async fn create(
        &self,
        owner_public_id: &str,
        original_url: &str,
    ) -> Result<ShortUrl, AppError> {
        let owner = self.owner(owner_public_id).await?;

        let original_url = validate_original_url(original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let url = self
            .url_repository
            .create(owner.id, &original_url, short_code)
            .await?;

        info!(url_id = url.id, code = %url.code, owner = %owner.public_id, "Short URL created");
        Ok(url)
    }

    /// Looks up a short URL by code without recording a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no URL has this code.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn lookup_by_code(&self, code: &str) -> Result<ShortUrl, AppError> {
        let not_found = || AppError::not_found("URL not found", json!({ "shortUrl": code }));

        if !is_valid_code(code) {
            return Err(not_found());
        }

        self.url_repository
            .find_by_code(code)
            .await?
            .ok_or_else(not_found)
    }

    /// Deletes a short URL owned by the caller, with its metadata and history.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the owner is unknown, or if the code
    /// does not exist or belongs to someone else.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete(&self, owner_public_id: &str, code: &str) -> Result<(), AppError> {
        let owner = self.owner(owner_public_id).await?;

        let deleted =
            is_valid_code(code) && self.url_repository.delete_owned(owner.id, code).await?;

        if !deleted {
            return Err(AppError::not_found(
                "URL not found",
                json!({ "shortUrl": code }),
            ));
        }

        info!(code, owner = %owner.public_id, "Short URL deleted");
        Ok(())
    }

    /// Returns the metadata of an owned URL along with the URL itself.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the owner is unknown or has no URL
    /// with this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_meta(
        &self,
        owner_public_id: &str,
        url_id: i64,
    ) -> Result<UrlMetaDetails, AppError> {
        let owner = self.owner(owner_public_id).await?;

        self.url_repository
            .find_meta(owner.id, url_id)
            .await?
            .ok_or_else(|| AppError::not_found("URL meta not found", json!({ "urlId": url_id })))
    }

    /// Returns the click history of an owned URL in insertion order, with its
    /// length.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the owner is unknown or has no URL
    /// with this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_history(
        &self,
        owner_public_id: &str,
        url_id: i64,
    ) -> Result<(Vec<ClickEvent>, usize), AppError> {
        self.get_meta(owner_public_id, url_id).await?;

        let clicks = self.url_repository.list_clicks(url_id).await?;
        let count = clicks.len();
        Ok((clicks, count))
    }

    /// Lists the caller's URLs, newest first, with their count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the owner is unknown.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_for_owner(
        &self,
        owner_public_id: &str,
    ) -> Result<(Vec<OwnedUrl>, usize), AppError> {
        let owner = self.owner(owner_public_id).await?;

        let urls = self.url_repository.list_by_owner(owner.id).await?;
        let count = urls.len();
        Ok((urls, count))
    }

    /// Builds the public short link for a code.
    pub fn short_link(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}
