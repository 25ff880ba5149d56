//! Media storage adapters.
//!
//! Uploaded media bytes live either in an S3-compatible bucket or in a
//! directory on local disk. Both backends implement [`MediaStorage`]; the
//! API holds an `Arc<dyn MediaStorage>` chosen once at startup by
//! [`config::MediaStorageConfig`].

pub mod config;
pub mod local;
pub mod s3;

use async_trait::async_trait;
use axum::body::Bytes;
use lughat_core::media::StorageBackendKind;

pub use config::MediaStorageConfig;
pub use local::LocalStorage;
pub use s3::ObjectStorage;

/// Errors raised by storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A place to put, fetch and delete media bytes by key.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Which backend this is; recorded on every media row.
    fn kind(&self) -> StorageBackendKind;

    /// Store `data` under `key`, replacing any existing object.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> StorageResult<()>;

    /// Fetch the bytes stored under `key`.
    async fn get(&self, key: &str) -> StorageResult<Bytes>;

    /// Remove the object under `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;
}

/// Reject keys that could escape a flat namespace.
pub(crate) fn check_key(key: &str) -> StorageResult<()> {
    let bad = key.is_empty()
        || key.starts_with('.')
        || key.contains(['/', '\\'])
        || key.contains('\0');
    if bad {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
