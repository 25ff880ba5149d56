//! Media asset rules: storage backend names, filename sanitization and
//! storage key layout.

use validator::ValidationError;

/// Content type recorded when an upload does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Default upload size cap (25 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Longest sanitized filename kept in a storage key.
const MAX_FILENAME_CHARS: usize = 128;

/// Where the bytes of a media document live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackendKind {
    /// Files on the server's local disk.
    Local,
    /// An S3-compatible bucket.
    Object,
}

impl StorageBackendKind {
    /// Value stored in the `media.storage_backend` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Object => "object",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "local" => Some(Self::Local),
            "object" => Some(Self::Object),
            _ => None,
        }
    }
}

impl std::fmt::Display for StorageBackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reduce an uploaded filename to a safe, flat ASCII name.
///
/// - Directory components are dropped.
/// - Whitespace becomes `-`; anything other than ASCII alphanumerics,
///   `.`, `-` and `_` is removed.
/// - Leading dots are stripped so the result is never hidden.
/// - An empty result becomes `file`.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let cleaned: String = base
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => Some(c),
            c if c.is_whitespace() => Some('-'),
            _ => None,
        })
        .collect();

    let trimmed: String = cleaned
        .trim_start_matches('.')
        .chars()
        .take(MAX_FILENAME_CHARS)
        .collect();

    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed
    }
}

/// Storage key for an upload: `<unique>-<sanitized filename>`.
pub fn storage_key(unique: &str, filename: &str) -> String {
    format!("{unique}-{}", sanitize_filename(filename))
}

/// Alt text is required and must not be blank.
pub fn validate_alt(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("alt text is required".into()));
    }
    Ok(())
}
