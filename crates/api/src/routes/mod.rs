pub mod health;
pub mod media;
pub mod users;
pub mod words;

use axum::Router;
use lughat_core::collections::Collection;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /words                       list (public), create
/// /words/search                prefix search (public)
/// /words/{id}                  get (public), update, delete
///
/// /media                       list (public), upload (multipart)
/// /media/{id}                  get (public), update, delete
/// /media/{id}/file             file bytes (public)
///
/// /users/first-register        create the first user (public)
/// /users/login                 login (public)
/// /users/me                    current user
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest(&mount(Collection::Words), words::router())
        .nest(&mount(Collection::Media), media::router(config.max_upload_bytes))
        .nest(&mount(Collection::Users), users::router())
}

fn mount(collection: Collection) -> String {
    format!("/{}", collection.slug())
}
