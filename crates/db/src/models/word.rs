//! Word entry models and DTOs.

use lughat_core::error::CoreError;
use lughat_core::types::{DbId, Timestamp};
use lughat_core::words::validate_headword;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::deserialize_some;

/// A row from the `words` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Word {
    pub id: DbId,
    pub word_uyghur: String,
    pub word_english: String,
    pub word_turkish: Option<String>,
    /// Media id of the pronunciation audio.
    #[serde(rename = "pronunciation")]
    pub pronunciation_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The projection returned by search and list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct WordSummary {
    pub id: DbId,
    pub word_uyghur: String,
    pub word_english: String,
    pub word_turkish: Option<String>,
    pub pronunciation: Option<DbId>,
}

/// DTO for creating a word entry.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWord {
    #[validate(custom(function = "validate_headword"))]
    pub word_uyghur: String,
    #[validate(custom(function = "validate_headword"))]
    pub word_english: String,
    #[validate(custom(function = "validate_headword"))]
    pub word_turkish: Option<String>,
    /// Media id of the pronunciation audio.
    pub pronunciation: Option<DbId>,
}

/// DTO for patching a word entry. Absent fields are left unchanged.
///
/// `word_turkish` and `pronunciation` may be set to `null` to clear them.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateWord {
    #[validate(custom(function = "validate_headword"))]
    pub word_uyghur: Option<String>,
    #[validate(custom(function = "validate_headword"))]
    pub word_english: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub word_turkish: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub pronunciation: Option<Option<DbId>>,
}

impl UpdateWord {
    /// Run the derived field checks plus the nullable Turkish headword,
    /// which `validator` does not reach through the double option.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        if let Some(Some(turkish)) = &self.word_turkish {
            validate_headword(turkish).map_err(|e| {
                let message = e
                    .message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                CoreError::Validation(format!("word_turkish: {message}"))
            })?;
        }
        Ok(())
    }

    /// The pronunciation id being linked by this patch, if any.
    pub fn linked_pronunciation(&self) -> Option<DbId> {
        self.pronunciation.flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_uyghur_and_english() {
        let input = CreateWord {
            word_uyghur: "  ".into(),
            word_english: "hello".into(),
            word_turkish: None,
            pronunciation: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn create_accepts_missing_turkish_but_not_blank_turkish() {
        let mut input = CreateWord {
            word_uyghur: "سالام".into(),
            word_english: "hello".into(),
            word_turkish: None,
            pronunciation: None,
        };
        assert!(input.validate().is_ok());

        input.word_turkish = Some("".into());
        assert!(input.validate().is_err());
    }

    #[test]
    fn update_distinguishes_absent_from_null() {
        let absent: UpdateWord = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.word_turkish, None);
        assert_eq!(absent.pronunciation, None);

        let cleared: UpdateWord =
            serde_json::from_str(r#"{"word_turkish": null, "pronunciation": null}"#).unwrap();
        assert_eq!(cleared.word_turkish, Some(None));
        assert_eq!(cleared.pronunciation, Some(None));

        let set: UpdateWord = serde_json::from_str(r#"{"pronunciation": 7}"#).unwrap();
        assert_eq!(set.linked_pronunciation(), Some(7));
    }

    #[test]
    fn update_check_rejects_blank_turkish() {
        let input: UpdateWord = serde_json::from_str(r#"{"word_turkish": " "}"#).unwrap();
        let err = input.check().unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg.starts_with("word_turkish")));
    }

    #[test]
    fn update_check_allows_clearing_turkish() {
        let input: UpdateWord = serde_json::from_str(r#"{"word_turkish": null}"#).unwrap();
        assert!(input.check().is_ok());
    }

    #[test]
    fn word_serializes_pronunciation_key() {
        let word = Word {
            id: 1,
            word_uyghur: "كىتاب".into(),
            word_english: "book".into(),
            word_turkish: Some("kitap".into()),
            pronunciation_id: Some(3),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&word).unwrap();
        assert_eq!(json["pronunciation"], 3);
        assert!(json.get("pronunciation_id").is_none());
    }
}
