//! Utility functions shared across layers.
//!
//! - [`base62`] - Short code codec
//! - [`password`] - Password hashing and policy
//! - [`public_id`] - Public user identifiers
//! - [`url_validator`] - Destination URL checks

pub mod base62;
pub mod password;
pub mod public_id;
pub mod url_validator;
