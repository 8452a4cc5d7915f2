//! Request middleware: bearer token checks and request tracing.

pub mod auth;
pub mod tracing;

pub use auth::{AuthUser, RefreshCredentials};
