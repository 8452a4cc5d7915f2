//! Handlers for the account endpoints.

use axum::{
    Extension, Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::url::{ListResponse, OwnedUrlItem, StatusResponse};
use crate::api::dto::user::{
    AccountResponse, ChangePasswordRequest, ProfileImageResponse, SignOutRequest, SignUpRequest,
    SignUpResponse,
};
use crate::api::middleware::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /users/signup`
///
/// # Request Body
///
/// ```json
/// { "email": "john@x.com", "password": "Secure1!pass" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the email is invalid or taken, or if the
/// password does not meet the policy.
pub async fn sign_up_handler(
    State(state): State<AppState>,
    Json(payload): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<SignUpResponse>), AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .sign_up(&payload.email, &payload.password)
        .await?;
    let profile_image = state.user_service.profile_image_url(&user);

    Ok((StatusCode::CREATED, Json(SignUpResponse::new(user, profile_image))))
}

/// `GET /users/myAccount`
pub async fn my_account_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<AccountResponse>, AppError> {
    let account = state.user_service.get_account(&user.id).await?;
    let profile_image = state.user_service.profile_image_url(&account);

    Ok(Json(AccountResponse::new(account, profile_image)))
}

/// Changes the caller's password.
///
/// # Endpoint
///
/// `PATCH /users/password`
///
/// # Errors
///
/// Returns 400 Bad Request if the current password is wrong or the new one
/// does not meet the policy.
pub async fn change_password_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    payload.validate()?;

    state
        .user_service
        .change_password(&user.id, &payload.password, &payload.new_password)
        .await?;

    Ok(Json(StatusResponse::ok()))
}

/// Closes the caller's account.
///
/// # Endpoint
///
/// `POST /users/signout`
///
/// # Errors
///
/// Returns 400 Bad Request if the password is wrong.
pub async fn sign_out_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<SignOutRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    payload.validate()?;

    state
        .user_service
        .close_account(&user.id, &payload.password)
        .await?;

    Ok(Json(StatusResponse::ok()))
}

/// Lists the caller's short URLs, newest first.
///
/// # Endpoint
///
/// `GET /users/url`
pub async fn my_urls_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ListResponse<OwnedUrlItem>>, AppError> {
    let (urls, count) = state.user_service.list_urls(&user.id).await?;

    Ok(Json(ListResponse::from_items(urls, count)))
}

/// Uploads a new profile image.
///
/// # Endpoint
///
/// `POST /users/profile-img` as `multipart/form-data` with a `file` field
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "location": "http://localhost:3000/uploads/images/users/<id>/1700000000000.png" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the `file` field is missing or empty.
/// Returns 500 Internal Server Error if the storage backend fails.
pub async fn upload_profile_image_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ProfileImageResponse>), AppError> {
    let invalid = |reason: String| {
        AppError::bad_request("Invalid multipart body", json!({ "reason": reason }))
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| invalid(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await.map_err(|e| invalid(e.to_string()))?;

        let location = state
            .user_service
            .upload_profile_image(&user.id, &file_name, &content_type, bytes.to_vec())
            .await?;

        return Ok((StatusCode::CREATED, Json(ProfileImageResponse { location })));
    }

    Err(AppError::bad_request(
        "Missing file",
        json!({ "field": "file" }),
    ))
}

/// `DELETE /users/profile-img`
pub async fn delete_profile_image_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<StatusResponse>, AppError> {
    state.user_service.delete_profile_image(&user.id).await?;

    Ok(Json(StatusResponse::ok()))
}
