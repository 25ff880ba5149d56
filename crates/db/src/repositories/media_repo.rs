//! Repository for the `media` table.

use lughat_core::pagination::{PageRequest, Paginated};
use lughat_core::types::DbId;
use sqlx::PgPool;

use crate::models::media::{CreateMedia, Media, UpdateMedia};

/// Column list for `media` queries.
const COLUMNS: &str = "id, alt, filename, mime_type, filesize, storage_key, storage_backend, \
                       created_at, updated_at";

/// Provides CRUD operations for media assets.
pub struct MediaRepo;

impl MediaRepo {
    /// Register an uploaded file.
    pub async fn create(pool: &PgPool, input: &CreateMedia) -> Result<Media, sqlx::Error> {
        let query = format!(
            "INSERT INTO media (alt, filename, mime_type, filesize, storage_key, storage_backend)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Media>(&query)
            .bind(input.alt.trim())
            .bind(&input.filename)
            .bind(&input.mime_type)
            .bind(input.filesize)
            .bind(&input.storage_key)
            .bind(input.storage_backend.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a media row by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Media>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media WHERE id = $1");
        sqlx::query_as::<_, Media>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a media row with `id` exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM media WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Paginated listing, newest first.
    pub async fn list(pool: &PgPool, page: PageRequest) -> Result<Paginated<Media>, sqlx::Error> {
        let total_docs = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM media")
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM media ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        );
        let docs = sqlx::query_as::<_, Media>(&query)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Paginated::new(docs, total_docs, page))
    }

    /// Update metadata. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMedia,
    ) -> Result<Option<Media>, sqlx::Error> {
        let query = format!(
            "UPDATE media SET alt = COALESCE($2, alt)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Media>(&query)
            .bind(id)
            .bind(input.alt.as_deref().map(str::trim))
            .fetch_optional(pool)
            .await
    }

    /// Delete a media row, returning it so the caller can remove the stored
    /// object. Words referencing it lose their pronunciation link.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Media>, sqlx::Error> {
        let query = format!("DELETE FROM media WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Media>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
