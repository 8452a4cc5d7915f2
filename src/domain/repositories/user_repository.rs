//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user accounts.
///
/// Lookups never return soft-deleted users.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_user.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email or public id is taken.
    /// Returns [`AppError::Validation`] if a check constraint fails.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds a live user by public id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_public_id(&self, public_id: &str) -> Result<Option<User>, AppError>;

    /// Finds a live user by email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Replaces the password hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist or is deleted.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_password_hash(&self, id: i64, password_hash: &str) -> Result<(), AppError>;

    /// Stores (or clears, with `None`) the hash of the current refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist or is deleted.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_refresh_token_hash(
        &self,
        id: i64,
        token_hash: Option<String>,
    ) -> Result<(), AppError>;

    /// Stores the object-storage key of the profile image (empty to clear).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist or is deleted.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_profile_image(&self, id: i64, image_key: &str) -> Result<(), AppError>;

    /// Soft-deletes a user and drops its refresh token hash.
    ///
    /// Returns `Ok(false)` if the user was already deleted or does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn soft_delete(&self, id: i64) -> Result<bool, AppError>;

    /// Lists live users, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, limit: i64) -> Result<Vec<User>, AppError>;

    /// Counts live users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
