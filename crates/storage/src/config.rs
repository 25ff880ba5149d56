//! Storage selection from the environment.

use std::path::PathBuf;
use std::sync::Arc;

use lughat_core::storage_env::{
    missing_object_storage_env, missing_object_storage_env_with, R2_ACCESS_KEY_ID, R2_BUCKET,
    R2_ENDPOINT, R2_SECRET_ACCESS_KEY,
};

use crate::s3::ObjectStorageSettings;
use crate::{LocalStorage, MediaStorage, ObjectStorage, StorageResult};

/// Local media directory used when `MEDIA_DIR` is unset.
pub const DEFAULT_MEDIA_DIR: &str = "media";

/// Which media backend to run with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaStorageConfig {
    Object(ObjectStorageSettings),
    Local { root: PathBuf },
}

impl MediaStorageConfig {
    /// Choose a backend from the process environment.
    ///
    /// | Env Var                | Default      |
    /// |------------------------|--------------|
    /// | `R2_ACCESS_KEY_ID`     | --           |
    /// | `R2_SECRET_ACCESS_KEY` | --           |
    /// | `R2_ENDPOINT`          | --           |
    /// | `R2_BUCKET`            | --           |
    /// | `MEDIA_DIR`            | `media`      |
    /// | `APP_ENV`              | `development`|
    pub fn from_env() -> Self {
        Self::resolve(missing_object_storage_env(), |key| std::env::var(key).ok())
    }

    /// Choose a backend using `lookup` for variable values.
    ///
    /// All four `R2_*` variables enable object storage. If any is missing
    /// the local backend is used, and outside production a warning names
    /// the missing variables.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve(missing_object_storage_env_with(&lookup), lookup)
    }

    fn resolve<F>(missing: Vec<&'static str>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if !missing.is_empty() {
            let production = lookup("APP_ENV").as_deref() == Some("production");
            if !production {
                tracing::warn!(
                    missing = %missing.join(", "),
                    "Skipping object storage adapter configuration because required \
                     environment variables are missing; using local media storage",
                );
            }

            let root = lookup("MEDIA_DIR")
                .filter(|dir| !dir.is_empty())
                .unwrap_or_else(|| DEFAULT_MEDIA_DIR.to_string());
            return Self::Local {
                root: PathBuf::from(root),
            };
        }

        let value = |key: &str| lookup(key).unwrap_or_default();
        Self::Object(ObjectStorageSettings {
            access_key_id: value(R2_ACCESS_KEY_ID),
            secret_access_key: value(R2_SECRET_ACCESS_KEY),
            endpoint: value(R2_ENDPOINT),
            bucket: value(R2_BUCKET),
        })
    }

    /// Instantiate the configured backend.
    pub async fn build(&self) -> StorageResult<Arc<dyn MediaStorage>> {
        match self {
            Self::Object(settings) => {
                tracing::info!(
                    bucket = %settings.bucket,
                    endpoint = %settings.endpoint,
                    "Using object storage for media",
                );
                Ok(Arc::new(ObjectStorage::new(settings)))
            }
            Self::Local { root } => {
                tracing::info!(root = %root.display(), "Using local disk for media");
                Ok(Arc::new(LocalStorage::new(root.clone()).await?))
            }
        }
    }
}
