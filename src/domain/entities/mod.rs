//! Core domain entities.
//!
//! Entities are plain data structures; persistence lives behind the traits in
//! [`crate::domain::repositories`].
//!
//! # Entity Types
//!
//! - [`User`] - A registered account (soft-deleted on closure)
//! - [`ShortUrl`] - A shortened URL with its base-62 code
//! - [`UrlMeta`] - Ownership and last-click time of a URL
//! - [`ClickEvent`] - One row of the append-only click ledger
//!
//! Creation inputs use separate structs (`NewUser`).

pub mod short_url;
pub mod user;

pub use short_url::{
    ClickEvent, CodeDeriver, OwnedUrl, RecordedClick, ShortUrl, UrlMeta, UrlMetaDetails,
};
pub use user::{NewUser, User};
