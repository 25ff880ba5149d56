//! Domain logic for the Lughat dictionary backend.
//!
//! Everything here is free of I/O so it can be shared by the repository
//! layer, the storage adapters and the HTTP handlers, and tested in
//! isolation.

pub mod collections;
pub mod error;
pub mod media;
pub mod pagination;
pub mod search;
pub mod storage_env;
pub mod types;
pub mod users;
pub mod words;
