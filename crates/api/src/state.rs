use std::sync::Arc;

use lughat_storage::MediaStorage;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and everything else sits
/// behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: lughat_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Backend holding uploaded media bytes.
    pub storage: Arc<dyn MediaStorage>,
}
