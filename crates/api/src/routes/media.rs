//! Route definitions for the `media` collection.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Routes mounted at `/media`. Uploads may be up to `max_upload_bytes`.
///
/// ```text
/// GET    /                 -> list_media
/// POST   /                 -> upload_media (multipart)
/// GET    /{id}             -> get_media
/// PATCH  /{id}             -> update_media
/// DELETE /{id}             -> delete_media
/// GET    /{id}/file        -> get_media_file
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(media::list_media)
                .post(media::upload_media)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route(
            "/{id}",
            get(media::get_media)
                .patch(media::update_media)
                .delete(media::delete_media),
        )
        .route("/{id}/file", get(media::get_media_file))
}
