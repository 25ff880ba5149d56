//! Route definitions for user accounts.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /first-register   -> first_register
/// POST   /login            -> login
/// GET    /me               -> me
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/first-register", post(users::first_register))
        .route("/login", post(users::login))
        .route("/me", get(users::me))
}
