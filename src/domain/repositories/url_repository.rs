//! Repository trait for short URLs, their metadata and click history.

use crate::domain::entities::{
    ClickEvent, CodeDeriver, OwnedUrl, RecordedClick, ShortUrl, UrlMetaDetails,
};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the URL registry and click ledger.
///
/// Every multi-statement operation runs inside a single database transaction
/// and either commits completely or leaves no trace.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Creates a short URL owned by `owner_id`.
    ///
    /// Inserts the `url` row, takes its assigned id, stores
    /// `derive_code(id)` as the short code and inserts the paired `url_meta`
    /// row, all in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the derived code already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(
        &self,
        owner_id: i64,
        original_url: &str,
        derive_code: CodeDeriver,
    ) -> Result<ShortUrl, AppError>;

    /// Finds a short URL by its code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Deletes the URL with `code` if its metadata names `owner_id` as owner.
    ///
    /// Metadata and click history go with it through `ON DELETE CASCADE`.
    /// Returns `Ok(false)` when no owned URL matches.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_owned(&self, owner_id: i64, code: &str) -> Result<bool, AppError>;

    /// Deletes the URL with `code` regardless of owner.
    ///
    /// Used by administrative tooling only. Returns `Ok(false)` when no URL
    /// matches.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError>;

    /// Finds the metadata of URL `url_id`, joined with the URL itself, if it is
    /// owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_meta(
        &self,
        owner_id: i64,
        url_id: i64,
    ) -> Result<Option<UrlMetaDetails>, AppError>;

    /// Lists every click of a URL in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_clicks(&self, url_id: i64) -> Result<Vec<ClickEvent>, AppError>;

    /// Lists the URLs owned by `owner_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<OwnedUrl>, AppError>;

    /// Resolves `code` and records a click in one transaction.
    ///
    /// Inserts a click row and moves `url_meta.last_clicked_time` to its
    /// timestamp. Returns `Ok(None)` without writing anything when the code is
    /// unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors; nothing is recorded.
    async fn record_click(&self, code: &str) -> Result<Option<RecordedClick>, AppError>;

    /// Counts all URLs in the system.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_all(&self) -> Result<i64, AppError>;
}
