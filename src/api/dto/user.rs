//! DTOs for the account endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::User;
use crate::utils::password::validate_password_policy;

/// Request to register an account.
#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: String,

    #[validate(custom(function = validate_password_policy))]
    pub password: String,
}

/// Request to change the password.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(custom(function = validate_password_policy))]
    pub new_password: String,
}

/// Request to close the account.
#[derive(Debug, Deserialize, Validate)]
pub struct SignOutRequest {
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// A freshly registered account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub profile_image_file: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SignUpResponse {
    pub fn new(user: User, profile_image_file: String) -> Self {
        Self {
            id: user.public_id,
            email: user.email,
            username: user.username,
            profile_image_file,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// The caller's own account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    /// Public location of the profile image, empty when unset.
    pub profile_image_file: String,
}

impl AccountResponse {
    pub fn new(user: User, profile_image_file: String) -> Self {
        Self {
            id: user.public_id,
            email: user.email,
            username: user.username,
            profile_image_file,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileImageResponse {
    pub location: String,
}
