//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Short URL creation, inspection and deletion
//! - [`services::redirect_service::RedirectService`] - Redirect resolution and click recording
//! - [`services::user_service::UserService`] - Account lifecycle and profile image
//! - [`services::auth_service::AuthService`] - Login and JWT session tokens

pub mod services;
