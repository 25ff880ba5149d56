//! Content collection declarations.
//!
//! The backend owns three collections. Their table layout lives in the
//! migrations of `lughat-db`; this module names them and describes the word
//! fields that the search route and the admin surface care about.

/// A content collection served by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Words,
    Media,
    Users,
}

impl Collection {
    /// URL slug and table name.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Words => "words",
            Self::Media => "media",
            Self::Users => "users",
        }
    }

    /// Entity label used in error messages.
    pub fn entity_name(self) -> &'static str {
        match self {
            Self::Words => "Word",
            Self::Media => "Media",
            Self::Users => "User",
        }
    }
}

/// A headword column of the `words` collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordField {
    Uyghur,
    English,
    Turkish,
}

impl WordField {
    /// Column name in the `words` table (also the JSON key).
    pub fn column(self) -> &'static str {
        match self {
            Self::Uyghur => "word_uyghur",
            Self::English => "word_english",
            Self::Turkish => "word_turkish",
        }
    }
}

/// Fields matched by the word-search route, in OR order.
pub const SEARCHABLE_FIELDS: [WordField; 3] =
    [WordField::Uyghur, WordField::English, WordField::Turkish];

/// Field used as the document title and the default sort key.
pub const WORD_TITLE_FIELD: WordField = WordField::Uyghur;
