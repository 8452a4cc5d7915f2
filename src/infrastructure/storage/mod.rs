//! Object storage for uploaded files.
//!
//! Provides an [`ObjectStorage`] trait with two implementations:
//! - [`S3Storage`] - S3-compatible bucket for production
//! - [`LocalStorage`] - Local directory for development and tests

mod local_storage;
mod s3_storage;
mod service;

pub use local_storage::LocalStorage;
pub use s3_storage::{S3Settings, S3Storage};
pub use service::{ObjectStorage, StorageError, StorageResult};

#[cfg(test)]
pub use service::MockObjectStorage;
