//! Shared response envelope for single-document API responses.
//!
//! Paginated listings are returned as [`lughat_core::pagination::Paginated`]
//! directly; single documents are wrapped in `{ "data": ... }`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
