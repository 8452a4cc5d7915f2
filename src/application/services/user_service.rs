//! Account management service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use crate::application::services::UrlService;
use crate::domain::entities::{NewUser, OwnedUrl, User};
use crate::domain::repositories::{UrlRepository, UserRepository};
use crate::error::AppError;
use crate::infrastructure::storage::ObjectStorage;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::public_id::generate_public_id;

/// Service for the account lifecycle: sign-up, password changes, closure and
/// the profile image.
pub struct UserService<R: UserRepository, U: UrlRepository> {
    user_repository: Arc<R>,
    url_service: Arc<UrlService<U, R>>,
    storage: Arc<dyn ObjectStorage>,
}

impl<R: UserRepository, U: UrlRepository> UserService<R, U> {
    pub fn new(
        user_repository: Arc<R>,
        url_service: Arc<UrlService<U, R>>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            user_repository,
            url_service,
            storage,
        }
    }

    /// Registers a new account.
    ///
    /// The username defaults to the local part of the email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the email is already registered.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<User, AppError> {
        let new_user = NewUser {
            public_id: generate_public_id(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
            username: NewUser::username_from_email(email),
        };

        let user = self
            .user_repository
            .create(new_user)
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => AppError::bad_request(
                    "Email already registered",
                    json!({ "email": email }),
                ),
                other => other,
            })?;

        info!(user = %user.public_id, "User signed up");
        Ok(user)
    }

    /// Returns the live account with this public id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account is missing or closed.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_account(&self, public_id: &str) -> Result<User, AppError> {
        self.user_repository
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": public_id })))
    }

    /// Replaces the password after checking the current one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account is missing or closed.
    /// Returns [`AppError::Validation`] if `current` does not match.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn change_password(
        &self,
        public_id: &str,
        current: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self.get_account(public_id).await?;

        if !verify_password(current, &user.password_hash) {
            return Err(AppError::bad_request("Current password is incorrect", json!({})));
        }

        let password_hash = hash_password(new_password)?;
        self.user_repository
            .update_password_hash(user.id, &password_hash)
            .await?;

        info!(user = %user.public_id, "Password changed");
        Ok(())
    }

    /// Closes the account after re-verifying the password.
    ///
    /// The account is soft-deleted and its refresh token is revoked. URLs it
    /// created stay resolvable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account is missing or closed.
    /// Returns [`AppError::Validation`] if the password does not match.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn close_account(&self, public_id: &str, password: &str) -> Result<(), AppError> {
        let user = self.get_account(public_id).await?;

        if !verify_password(password, &user.password_hash) {
            return Err(AppError::bad_request("Password is incorrect", json!({})));
        }

        if !self.user_repository.soft_delete(user.id).await? {
            return Err(AppError::not_found("User not found", json!({ "id": public_id })));
        }

        info!(user = %user.public_id, "Account closed");
        Ok(())
    }

    /// Lists the caller's short URLs, newest first, with their count.
    ///
    /// # Errors
    ///
    /// See [`UrlService::list_for_owner`].
    pub async fn list_urls(&self, public_id: &str) -> Result<(Vec<OwnedUrl>, usize), AppError> {
        self.url_service.list_for_owner(public_id).await
    }

    /// Stores a new profile image and returns its public location.
    ///
    /// A previously stored image is removed once the new key is saved;
    /// failing to remove it is only logged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account is missing or closed.
    /// Returns [`AppError::Validation`] if `bytes` is empty.
    /// Returns [`AppError::Internal`] if the upload or the database update fails.
    pub async fn upload_profile_image(
        &self,
        public_id: &str,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AppError> {
        let user = self.get_account(public_id).await?;

        if bytes.is_empty() {
            return Err(AppError::bad_request("Uploaded file is empty", json!({ "field": "file" })));
        }

        let key = format!(
            "images/users/{}/{}.{}",
            user.public_id,
            Utc::now().timestamp_millis(),
            file_extension(file_name)
        );

        let location = self.storage.put(&key, bytes, content_type).await?;
        self.user_repository.update_profile_image(user.id, &key).await?;

        if user.has_profile_image() && user.profile_image != key {
            if let Err(e) = self.storage.delete(&user.profile_image).await {
                warn!(key = %user.profile_image, error = %e, "Failed to remove replaced profile image");
            }
        }

        info!(user = %user.public_id, key = %key, "Profile image uploaded");
        Ok(location)
    }

    /// Deletes the stored profile image, if any, and clears the reference.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account is missing or closed.
    /// Returns [`AppError::Internal`] if the object or the reference cannot be
    /// removed.
    pub async fn delete_profile_image(&self, public_id: &str) -> Result<(), AppError> {
        let user = self.get_account(public_id).await?;

        if !user.has_profile_image() {
            return Ok(());
        }

        self.storage.delete(&user.profile_image).await?;
        self.user_repository.update_profile_image(user.id, "").await?;

        info!(user = %user.public_id, "Profile image deleted");
        Ok(())
    }

    /// Public location of the user's profile image, empty when unset.
    pub fn profile_image_url(&self, user: &User) -> String {
        if user.has_profile_image() {
            self.storage.public_url(&user.profile_image)
        } else {
            String::new()
        }
    }
}

/// Extension of an uploaded file name, lowercased; `bin` when missing or odd.
fn file_extension(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, ext))
            if !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext.to_ascii_lowercase()
        }
        _ => "bin".to_string(),
    }
}
