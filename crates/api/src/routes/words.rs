//! Route definitions for the `words` collection.

use axum::routing::get;
use axum::Router;

use crate::handlers::{search, words};
use crate::state::AppState;

/// Routes mounted at `/words`.
///
/// ```text
/// GET    /                 -> list_words
/// POST   /                 -> create_word
/// GET    /search           -> search_words
/// GET    /{id}             -> get_word
/// PATCH  /{id}             -> update_word
/// DELETE /{id}             -> delete_word
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(words::list_words).post(words::create_word))
        .route("/search", get(search::search_words))
        .route(
            "/{id}",
            get(words::get_word)
                .patch(words::update_word)
                .delete(words::delete_word),
        )
}
