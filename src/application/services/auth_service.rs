//! Authentication service: credential checks and JWT session tokens.

use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::verify_password;

type HmacSha256 = Hmac<Sha256>;

/// Lifetime of a refresh token.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 14;

/// Claims carried by both access and refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Public id of the user.
    pub id: String,
    pub iat: i64,
    pub exp: i64,
}

/// Tokens returned by a successful login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Secrets and lifetimes used for issuing tokens.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub access_secret: String,
    pub refresh_secret: String,
    /// HMAC key for the refresh-token hash stored in the database.
    pub signing_secret: String,
    pub access_ttl_seconds: i64,
}

/// Service for logging users in and managing their session tokens.
///
/// Access and refresh tokens are HS256 JWTs signed with distinct secrets, so a
/// refresh token is never accepted where an access token is expected. Only an
/// HMAC-SHA256 hash of the current refresh token is stored (keyed by
/// `signing_secret`); rotation compares hashes in constant time.
pub struct AuthService<R: UserRepository> {
    repository: Arc<R>,
    settings: TokenSettings,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repository: Arc<R>, settings: TokenSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    fn token_mac(&self, token: &str) -> Result<HmacSha256, AppError> {
        let mut mac = HmacSha256::new_from_slice(self.settings.signing_secret.as_bytes())
            .map_err(|_| AppError::internal("Invalid token signing secret", json!({})))?;
        mac.update(token.as_bytes());
        Ok(mac)
    }

    /// Hashes a refresh token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> Result<String, AppError> {
        Ok(hex::encode(self.token_mac(token)?.finalize().into_bytes()))
    }

    fn sign(&self, public_id: &str, ttl: Duration, secret: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            id: public_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            AppError::internal("Failed to sign token", json!({}))
        })
    }

    fn verify(&self, token: &str, secret: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| {
            AppError::unauthorized("Unauthorized", json!({ "reason": e.to_string() }))
        })
    }

    /// Checks an email/password pair against a live account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no live account has this email.
    /// Returns [`AppError::Validation`] if the password does not match.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "email": email })))?;

        if !verify_password(password, &user.password_hash) {
            warn!(user = %user.public_id, "Login rejected: wrong password");
            return Err(AppError::bad_request("Password is incorrect", json!({})));
        }

        Ok(user)
    }

    /// Authenticates and issues a new token pair.
    ///
    /// The refresh token's hash replaces any previously stored one, so only the
    /// most recent refresh token can rotate access tokens.
    ///
    /// # Errors
    ///
    /// See [`Self::authenticate`]. Returns [`AppError::Internal`] if the tokens
    /// cannot be signed or stored.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AppError> {
        let user = self.authenticate(email, password).await?;

        let access_token = self.issue_access_token(&user.public_id)?;
        let refresh_token = self.issue_refresh_token(&user.public_id)?;

        self.repository
            .update_refresh_token_hash(user.id, Some(self.hash_token(&refresh_token)?))
            .await?;

        info!(user = %user.public_id, "User logged in");
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Issues an access token for `public_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn issue_access_token(&self, public_id: &str) -> Result<String, AppError> {
        self.sign(
            public_id,
            Duration::seconds(self.settings.access_ttl_seconds),
            &self.settings.access_secret,
        )
    }

    /// Issues a refresh token for `public_id`, valid for
    /// [`REFRESH_TOKEN_TTL_DAYS`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn issue_refresh_token(&self, public_id: &str) -> Result<String, AppError> {
        self.sign(
            public_id,
            Duration::days(REFRESH_TOKEN_TTL_DAYS),
            &self.settings.refresh_secret,
        )
    }

    /// Verifies an access token's signature and expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is invalid or expired.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.verify(token, &self.settings.access_secret)
    }

    /// Verifies a refresh token's signature and expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is invalid or expired.
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.verify(token, &self.settings.refresh_secret)
    }

    /// Issues a new access token if `refresh_token` is the one stored for the user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account is missing or closed.
    /// Returns [`AppError::Unauthorized`] if no refresh token is stored or the
    /// presented one does not match.
    /// Returns [`AppError::Internal`] on database or signing errors.
    pub async fn rotate_access_token(
        &self,
        public_id: &str,
        refresh_token: &str,
    ) -> Result<String, AppError> {
        let user = self
            .repository
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": public_id })))?;

        let mismatch = || {
            AppError::unauthorized("Unauthorized", json!({ "reason": "Refresh token mismatch" }))
        };

        let stored = user
            .refresh_token_hash
            .as_deref()
            .and_then(|h| hex::decode(h).ok())
            .ok_or_else(mismatch)?;

        if self.token_mac(refresh_token)?.verify_slice(&stored).is_err() {
            warn!(user = %user.public_id, "Refresh rejected: token mismatch");
            return Err(mismatch());
        }

        self.issue_access_token(&user.public_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use crate::utils::password::hash_password;

    const PUBLIC_ID: &str = "V1StGXR8_Z5jdHi6B-myT";

    fn test_settings() -> TokenSettings {
        TokenSettings {
            access_secret: "access-secret".to_string(),
            refresh_secret: "refresh-secret".to_string(),
            signing_secret: "test-signing-secret".to_string(),
            access_ttl_seconds: 3600,
        }
    }

    fn test_user(refresh_token_hash: Option<String>) -> User {
        let now = Utc::now();
        User {
            id: 5,
            public_id: PUBLIC_ID.to_string(),
            email: "john@x.com".to_string(),
            password_hash: hash_password("Secure1!pass").unwrap(),
            username: "john".to_string(),
            refresh_token_hash,
            profile_image: String::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn compute_expected_hash(token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(test_settings().signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[tokio::test]
    async fn test_login_success_stores_refresh_hash() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .withf(|email| email == "john@x.com")
            .returning(|_| Ok(Some(test_user(None))));
        mock_repo
            .expect_update_refresh_token_hash()
            .withf(|id, hash| *id == 5 && hash.as_ref().is_some_and(|h| h.len() == 64))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = AuthService::new(Arc::new(mock_repo), test_settings());
        let pair = service.login("john@x.com", "Secure1!pass").await.unwrap();

        assert_eq!(service.verify_access_token(&pair.access_token).unwrap().id, PUBLIC_ID);
        assert_eq!(service.verify_refresh_token(&pair.refresh_token).unwrap().id, PUBLIC_ID);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .returning(|_| Ok(Some(test_user(None))));
        mock_repo.expect_update_refresh_token_hash().times(0);

        let service = AuthService::new(Arc::new(mock_repo), test_settings());
        let result = service.login("john@x.com", "Wrong1!pass").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_email().returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo), test_settings());
        let result = service.login("nobody@x.com", "Secure1!pass").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[test]
    fn test_token_kinds_are_not_interchangeable() {
        let service = AuthService::new(Arc::new(MockUserRepository::new()), test_settings());

        let access = service.issue_access_token(PUBLIC_ID).unwrap();
        let refresh = service.issue_refresh_token(PUBLIC_ID).unwrap();

        assert!(service.verify_refresh_token(&access).is_err());
        assert!(matches!(
            service.verify_access_token(&refresh).unwrap_err(),
            AppError::Unauthorized { .. }
        ));
    }

    #[test]
    fn test_claims_lifetimes() {
        let service = AuthService::new(Arc::new(MockUserRepository::new()), test_settings());

        let access = service
            .verify_access_token(&service.issue_access_token(PUBLIC_ID).unwrap())
            .unwrap();
        assert_eq!(access.exp - access.iat, 3600);

        let refresh = service
            .verify_refresh_token(&service.issue_refresh_token(PUBLIC_ID).unwrap())
            .unwrap();
        assert_eq!(refresh.exp - refresh.iat, REFRESH_TOKEN_TTL_DAYS * 24 * 3600);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let mut settings = test_settings();
        // Beyond the default 60s validation leeway.
        settings.access_ttl_seconds = -120;
        let service = AuthService::new(Arc::new(MockUserRepository::new()), settings);

        let token = service.issue_access_token(PUBLIC_ID).unwrap();
        assert!(service.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let service = AuthService::new(Arc::new(MockUserRepository::new()), test_settings());
        assert!(service.verify_access_token("not.a.jwt").is_err());
    }

    #[tokio::test]
    async fn test_rotate_with_matching_refresh_token() {
        let service_for_token =
            AuthService::new(Arc::new(MockUserRepository::new()), test_settings());
        let refresh = service_for_token.issue_refresh_token(PUBLIC_ID).unwrap();
        let stored = compute_expected_hash(&refresh);

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_public_id()
            .returning(move |_| Ok(Some(test_user(Some(stored.clone())))));

        let service = AuthService::new(Arc::new(mock_repo), test_settings());
        let access = service.rotate_access_token(PUBLIC_ID, &refresh).await.unwrap();

        assert_eq!(service.verify_access_token(&access).unwrap().id, PUBLIC_ID);
    }

    #[tokio::test]
    async fn test_rotate_with_mismatched_refresh_token() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_public_id()
            .returning(|_| Ok(Some(test_user(Some(compute_expected_hash("older-token"))))));

        let service = AuthService::new(Arc::new(mock_repo), test_settings());
        let result = service.rotate_access_token(PUBLIC_ID, "newer-token").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_rotate_without_stored_hash() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_public_id()
            .returning(|_| Ok(Some(test_user(None))));

        let service = AuthService::new(Arc::new(mock_repo), test_settings());
        let result = service.rotate_access_token(PUBLIC_ID, "any").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_rotate_for_missing_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_public_id().returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo), test_settings());
        let result = service.rotate_access_token(PUBLIC_ID, "any").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[test]
    fn test_hash_token_consistency() {
        let service = AuthService::new(Arc::new(MockUserRepository::new()), test_settings());

        let hash1 = service.hash_token("test-token").unwrap();
        let hash2 = service.hash_token("test-token").unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1, compute_expected_hash("test-token"));
        assert_ne!(hash1, service.hash_token("other-token").unwrap());
    }
}
