//! Object storage trait and error types.

use async_trait::async_trait;

/// Errors that can occur during object storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storing user-uploaded binary objects such as profile images.
///
/// Keys are relative, `/`-separated paths chosen by the caller.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::S3Storage`] - S3-compatible bucket
/// - [`crate::infrastructure::storage::LocalStorage`] - Directory on the local filesystem
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores `bytes` under `key`, replacing any existing object.
    ///
    /// Returns the public location of the stored object.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the key is rejected or the backend fails.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> StorageResult<String>;

    /// Removes the object at `key`. Removing a missing object succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the key is rejected or the backend fails.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Public location of the object at `key`.
    fn public_url(&self, key: &str) -> String;

    /// Checks if the storage backend is reachable.
    async fn health_check(&self) -> bool;
}

/// Rejects keys that are empty, absolute or that climb out of the root.
pub(crate) fn check_key(key: &str) -> StorageResult<()> {
    let bad = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..");

    if bad {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Joins a base URL and a key with exactly one `/` between them.
pub(crate) fn join_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key)
}
