//! Headword rules for the `words` collection.

use validator::ValidationError;

/// Longest accepted headword, in characters.
pub const MAX_HEADWORD_CHARS: usize = 256;

/// Trim surrounding whitespace from a headword before it is stored.
pub fn normalize_headword(value: &str) -> String {
    value.trim().to_string()
}

/// Headwords must be non-blank and at most [`MAX_HEADWORD_CHARS`] long.
///
/// Used as a `validator` custom function on the word DTOs.
pub fn validate_headword(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    if trimmed.chars().count() > MAX_HEADWORD_CHARS {
        return Err(ValidationError::new("length").with_message(
            format!("must be at most {MAX_HEADWORD_CHARS} characters").into(),
        ));
    }
    Ok(())
}
