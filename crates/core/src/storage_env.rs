//! Object-storage environment validation.
//!
//! Media uploads go to an S3-compatible bucket only when every required
//! variable is set to a non-empty value. Otherwise the backend falls back to
//! local disk, so a missing variable is never a startup failure.

/// Access key id for the bucket.
pub const R2_ACCESS_KEY_ID: &str = "R2_ACCESS_KEY_ID";
/// Secret access key for the bucket.
pub const R2_SECRET_ACCESS_KEY: &str = "R2_SECRET_ACCESS_KEY";
/// S3-compatible endpoint URL.
pub const R2_ENDPOINT: &str = "R2_ENDPOINT";
/// Bucket name.
pub const R2_BUCKET: &str = "R2_BUCKET";

/// Variables that must all be present to enable object storage.
pub const REQUIRED_OBJECT_STORAGE_ENV_KEYS: [&str; 4] =
    [R2_ACCESS_KEY_ID, R2_SECRET_ACCESS_KEY, R2_ENDPOINT, R2_BUCKET];

/// Return the required keys that `lookup` reports as unset or empty, in
/// declaration order.
pub fn missing_object_storage_env_with<F>(lookup: F) -> Vec<&'static str>
where
    F: Fn(&str) -> Option<String>,
{
    REQUIRED_OBJECT_STORAGE_ENV_KEYS
        .iter()
        .copied()
        .filter(|key| lookup(key).map_or(true, |value| value.is_empty()))
        .collect()
}

/// [`missing_object_storage_env_with`] against the process environment.
pub fn missing_object_storage_env() -> Vec<&'static str> {
    missing_object_storage_env_with(|key| std::env::var(key).ok())
}

/// True when every object-storage variable is set.
pub fn is_object_storage_configured() -> bool {
    missing_object_storage_env().is_empty()
}
