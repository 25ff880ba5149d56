//! Handlers for the `words` collection.
//!
//! Reads are public. Creates, updates and deletes require a logged-in user.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use lughat_core::collections::Collection;
use lughat_core::error::CoreError;
use lughat_core::pagination::Paginated;
use lughat_core::search::page_request;
use lughat_core::types::DbId;
use lughat_db::models::word::{CreateWord, UpdateWord, Word, WordSummary};
use lughat_db::repositories::{MediaRepo, WordRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::first_param;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: Collection::Words.entity_name(),
        id,
    })
}

/// A referenced pronunciation must be an existing media document.
async fn ensure_pronunciation_exists(state: &AppState, media_id: Option<DbId>) -> AppResult<()> {
    let Some(media_id) = media_id else {
        return Ok(());
    };
    if !MediaRepo::exists(&state.pool, media_id).await? {
        return Err(AppError::Core(CoreError::Validation(format!(
            "pronunciation: media {media_id} does not exist"
        ))));
    }
    Ok(())
}

/// GET /api/words?page=&limit=
pub async fn list_words(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<Paginated<WordSummary>>> {
    let page = page_request(first_param(&params, "page"), first_param(&params, "limit"))
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let words = WordRepo::list(&state.pool, page).await?;
    Ok(Json(words))
}

/// GET /api/words/{id}
pub async fn get_word(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Word>>> {
    let word = WordRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: word }))
}

/// POST /api/words
pub async fn create_word(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateWord>,
) -> AppResult<(StatusCode, Json<DataResponse<Word>>)> {
    input.validate()?;
    ensure_pronunciation_exists(&state, input.pronunciation).await?;

    let word = WordRepo::create(&state.pool, &input).await?;

    tracing::info!(
        word_id = word.id,
        user_id = auth.user_id,
        word_uyghur = %word.word_uyghur,
        "Word created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: word })))
}

/// PATCH /api/words/{id}
///
/// Absent fields stay unchanged; `word_turkish` and `pronunciation` may be
/// cleared with `null`.
pub async fn update_word(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWord>,
) -> AppResult<Json<DataResponse<Word>>> {
    input.check()?;
    ensure_pronunciation_exists(&state, input.linked_pronunciation()).await?;

    let word = WordRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(word_id = id, user_id = auth.user_id, "Word updated");

    Ok(Json(DataResponse { data: word }))
}

/// DELETE /api/words/{id}
pub async fn delete_word(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !WordRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(word_id = id, user_id = auth.user_id, "Word deleted");

    Ok(StatusCode::NO_CONTENT)
}
