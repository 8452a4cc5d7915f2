//! User account entity.

use chrono::{DateTime, Utc};

/// Maximum length of the `users.username` column.
pub const USERNAME_MAX_LEN: usize = 32;

/// A registered account.
///
/// `id` is the database surrogate key and stays inside the service;
/// `public_id` is the identifier carried by tokens and API responses.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub public_id: String,
    pub email: String,
    pub password_hash: String,
    pub username: String,
    pub refresh_token_hash: Option<String>,
    /// Object-storage key of the profile image, empty when unset.
    pub profile_image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Returns true if the account has been closed.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn has_profile_image(&self) -> bool {
        !self.profile_image.is_empty()
    }
}

/// Input data for registering a user.
///
/// The public id and password hash are computed before the row is inserted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub public_id: String,
    pub email: String,
    pub password_hash: String,
    pub username: String,
}

impl NewUser {
    /// Derives the default username: the local part of the email, truncated
    /// to [`USERNAME_MAX_LEN`] characters.
    pub fn username_from_email(email: &str) -> String {
        email
            .split('@')
            .next()
            .unwrap_or_default()
            .chars()
            .take(USERNAME_MAX_LEN)
            .collect()
    }
}
