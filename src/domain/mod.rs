//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business rules are orchestrated by
//! [`crate::application::services`].
//!
//! # Redirect Flow
//!
//! 1. HTTP handler receives `GET /{code}`
//! 2. [`crate::application::services::RedirectService`] asks the
//!    [`repositories::UrlRepository`] to record the click
//! 3. The click row and `last_clicked_time` are committed together
//! 4. The handler answers `301` with the original URL

pub mod entities;
pub mod repositories;
