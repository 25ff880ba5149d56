//! Handlers for the `media` collection.
//!
//! Uploads arrive as multipart forms with a `file` part and an `alt` text
//! part. Bytes go to the configured [`lughat_storage::MediaStorage`]; the
//! row records which backend holds them.

use axum::body::{Body, Bytes};
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lughat_core::collections::Collection;
use lughat_core::error::CoreError;
use lughat_core::media::{sanitize_filename, storage_key, DEFAULT_CONTENT_TYPE};
use lughat_core::pagination::Paginated;
use lughat_core::search::page_request;
use lughat_core::types::DbId;
use lughat_db::models::media::{CreateMedia, Media, UpdateMedia};
use lughat_db::repositories::MediaRepo;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::first_param;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: Collection::Media.entity_name(),
        id,
    })
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

/// The parts of an upload form.
struct UploadForm {
    file: Option<UploadedFile>,
    alt: Option<String>,
}

struct UploadedFile {
    filename: String,
    content_type: String,
    data: Bytes,
}

async fn read_upload_form(multipart: &mut Multipart) -> AppResult<UploadForm> {
    let mut form = UploadForm {
        file: None,
        alt: None,
    };

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("file").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                form.file = Some(UploadedFile {
                    filename,
                    content_type,
                    data,
                });
            }
            Some("alt") => {
                form.alt = Some(field.text().await.map_err(multipart_error)?);
            }
            other => {
                tracing::debug!(field = ?other, "Ignoring unknown upload field");
            }
        }
    }

    Ok(form)
}

/// GET /api/media?page=&limit=
pub async fn list_media(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<Paginated<Media>>> {
    let page = page_request(first_param(&params, "page"), first_param(&params, "limit"))
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let media = MediaRepo::list(&state.pool, page).await?;
    Ok(Json(media))
}

/// GET /api/media/{id}
pub async fn get_media(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Media>>> {
    let media = MediaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: media }))
}

/// GET /api/media/{id}/file
///
/// Streams the stored bytes back with the recorded content type.
pub async fn get_media_file(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let media = MediaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if media.backend_kind() != Some(state.storage.kind()) {
        tracing::warn!(
            media_id = id,
            stored_in = %media.storage_backend,
            active = %state.storage.kind(),
            "Media was stored by a different backend than the active one",
        );
    }

    let data = state.storage.get(&media.storage_key).await?;

    Ok((
        [
            (CONTENT_TYPE, media.mime_type.clone()),
            (CONTENT_LENGTH, data.len().to_string()),
            (
                CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", media.filename),
            ),
        ],
        Body::from(data),
    )
        .into_response())
}

/// POST /api/media (multipart: `file`, `alt`)
pub async fn upload_media(
    auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Media>>)> {
    let form = read_upload_form(&mut multipart).await?;

    let file = form
        .file
        .ok_or_else(|| AppError::BadRequest("Missing 'file' part in upload".to_string()))?;
    if file.data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
    }

    let filename = sanitize_filename(&file.filename);
    let key = storage_key(&Uuid::new_v4().to_string(), &filename);
    let input = CreateMedia {
        alt: form.alt.unwrap_or_default(),
        filename,
        mime_type: file.content_type,
        filesize: file.data.len() as i64,
        storage_key: key.clone(),
        storage_backend: state.storage.kind(),
    };
    input.validate()?;

    state
        .storage
        .put(&key, file.data, &input.mime_type)
        .await?;

    let media = match MediaRepo::create(&state.pool, &input).await {
        Ok(media) => media,
        Err(err) => {
            // The row is the only reference to the object; drop the orphan.
            if let Err(cleanup) = state.storage.delete(&key).await {
                tracing::warn!(key = %key, error = %cleanup, "Failed to remove orphaned upload");
            }
            return Err(err.into());
        }
    };

    tracing::info!(
        media_id = media.id,
        user_id = auth.user_id,
        key = %media.storage_key,
        filesize = media.filesize,
        backend = %media.storage_backend,
        "Media uploaded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: media })))
}

/// PATCH /api/media/{id}
pub async fn update_media(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMedia>,
) -> AppResult<Json<DataResponse<Media>>> {
    input.validate()?;

    let media = MediaRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(media_id = id, user_id = auth.user_id, "Media updated");

    Ok(Json(DataResponse { data: media }))
}

/// DELETE /api/media/{id}
///
/// Removes the row, then the stored object. Words pointing at it lose their
/// pronunciation link.
pub async fn delete_media(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let media = MediaRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Err(err) = state.storage.delete(&media.storage_key).await {
        tracing::warn!(
            media_id = id,
            key = %media.storage_key,
            error = %err,
            "Media row deleted but stored object could not be removed",
        );
    }

    tracing::info!(media_id = id, user_id = auth.user_id, "Media deleted");

    Ok(StatusCode::NO_CONTENT)
}
