//! Media asset models and DTOs.

use lughat_core::media::{validate_alt, StorageBackendKind};
use lughat_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `media` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Media {
    pub id: DbId,
    pub alt: String,
    pub filename: String,
    pub mime_type: String,
    pub filesize: i64,
    /// Key of the object inside its storage backend.
    pub storage_key: String,
    /// `local` or `object`.
    pub storage_backend: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Media {
    /// Parsed storage backend. Unknown values (impossible under the table's
    /// CHECK constraint) are reported as `None`.
    pub fn backend_kind(&self) -> Option<StorageBackendKind> {
        StorageBackendKind::parse(&self.storage_backend)
    }
}

/// DTO for registering an uploaded file.
#[derive(Debug, Clone, Validate)]
pub struct CreateMedia {
    #[validate(custom(function = "validate_alt"))]
    pub alt: String,
    pub filename: String,
    pub mime_type: String,
    pub filesize: i64,
    pub storage_key: String,
    pub storage_backend: StorageBackendKind,
}

/// DTO for patching media metadata.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMedia {
    #[validate(custom(function = "validate_alt"))]
    pub alt: Option<String>,
}
