//! Handler for the public word-search route.
//!
//! Unlike the REST handlers this route does not use [`crate::error::AppError`]:
//! its error bodies are just `{ "error": message }`, and every response it
//! produces carries `Cache-Control: no-store`.

use axum::extract::{Query, State};
use axum::http::header::CACHE_CONTROL;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use lughat_core::search::{SearchParamError, WordSearch};
use lughat_db::repositories::WordRepo;
use serde_json::json;

use crate::handlers::first_param;
use crate::state::AppState;

/// Message returned when a failed query has nothing better to say.
const FALLBACK_ERROR: &str = "Unable to fetch words";

/// Failures of the search route.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    InvalidParams(#[from] SearchParamError),

    #[error("{0}")]
    Query(#[from] sqlx::Error),
}

impl SearchError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidParams(_) => StatusCode::BAD_REQUEST,
            Self::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self.to_string() {
            msg if msg.trim().is_empty() => FALLBACK_ERROR.to_string(),
            msg => msg,
        };
        if status.is_server_error() {
            tracing::error!(error = %message, "Word search failed");
        }
        no_store((status, Json(json!({ "error": message }))))
    }
}

fn no_store(response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

/// GET /api/words/search?q=&page=&limit=
///
/// Prefix search over the Uyghur, English and Turkish headwords. Public.
/// Responds with the paginated envelope, sorted by Uyghur headword.
pub async fn search_words(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, SearchError> {
    let search = WordSearch::from_raw(
        first_param(&params, "q"),
        first_param(&params, "page"),
        first_param(&params, "limit"),
    )?;

    let result = WordRepo::search(&state.pool, &search).await?;

    tracing::debug!(
        query = %search.query,
        page = search.page.page,
        limit = search.page.limit,
        total_docs = result.total_docs,
        "Word search",
    );

    Ok(no_store(Json(result)))
}
