//! Word-search parameter handling and predicate construction.
//!
//! The search route accepts three raw query-string values (`q`, `page`,
//! `limit`). This module turns them into a [`WordSearch`]: a validated page
//! request plus an optional [`WordFilter`] that the repository renders into
//! SQL. No I/O happens here.

use crate::collections::{WordField, SEARCHABLE_FIELDS};
use crate::pagination::PageRequest;

// ---------------------------------------------------------------------------
// Limits and defaults
// ---------------------------------------------------------------------------

/// Maximum number of characters of `q` that are used for matching.
pub const MAX_QUERY_LENGTH: usize = 64;

/// Page used when `page` is missing or invalid.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when `limit` is missing or invalid.
pub const DEFAULT_LIMIT: i64 = 20;

/// Largest accepted page size. Larger values are rejected, not clamped.
pub const MAX_LIMIT: i64 = 100;

/// Characters that carry meaning in a regular expression.
const REGEX_METACHARACTERS: &[char] = &[
    '.', '*', '+', '?', '^', '$', '{', '}', '(', ')', '|', '[', ']', '\\',
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Client-side problems with the search parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchParamError {
    #[error("limit must be <= {max}")]
    LimitTooLarge { max: i64 },
}

// ---------------------------------------------------------------------------
// Input coercion
// ---------------------------------------------------------------------------

/// Trim the raw query and keep at most [`MAX_QUERY_LENGTH`] characters.
///
/// Missing and whitespace-only input both produce an empty string.
pub fn normalize_query(raw: Option<&str>) -> String {
    raw.unwrap_or("")
        .trim()
        .chars()
        .take(MAX_QUERY_LENGTH)
        .collect()
}

/// Coerce a raw query-string value into a positive integer.
///
/// The value is read as a number (decimal or exponent notation, or an
/// unsigned `0x` / `0o` / `0b` literal, surrounding whitespace ignored) and
/// floored. Anything missing, unparseable, non-finite or below 1 yields
/// `fallback`.
pub fn coerce_positive_int(raw: Option<&str>, fallback: i64) -> i64 {
    let Some(raw) = raw else {
        return fallback;
    };

    let parsed = match parse_number(raw.trim()) {
        Some(value) if value.is_finite() => value.floor(),
        _ => return fallback,
    };

    if parsed >= 1.0 {
        // `as` saturates at i64::MAX for huge values.
        parsed as i64
    } else {
        fallback
    }
}

fn parse_number(value: &str) -> Option<f64> {
    let radix = match value.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => return value.parse::<f64>().ok(),
    };
    parse_radix_digits(&value[2..], radix)
}

/// Digits of an integer literal without its prefix. Empty input is invalid.
fn parse_radix_digits(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

// ---------------------------------------------------------------------------
// Pattern construction
// ---------------------------------------------------------------------------

/// Backslash-escape every regex metacharacter so `value` matches literally.
///
/// ```
/// use lughat_core::search::escape_regex;
/// assert_eq!(escape_regex("a.b*"), r"a\.b\*");
/// assert_eq!(escape_regex("salam"), "salam");
/// ```
pub fn escape_regex(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if REGEX_METACHARACTERS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Anchored, escaped pattern matching values that start with `query`.
pub fn build_prefix_pattern(query: &str) -> String {
    format!("^{}", escape_regex(query))
}

/// Predicate over the `words` collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordFilter {
    /// Match when any of `fields` matches the anchored `pattern`
    /// (case-sensitive regular expression).
    AnyFieldMatches {
        fields: Vec<WordField>,
        pattern: String,
    },
    /// Matches no row. Used for queries the database cannot take as text,
    /// such as those containing a NUL character.
    Nothing,
}

/// Build the filter for a normalized query. An empty query matches all.
pub fn build_word_filter(query: &str) -> Option<WordFilter> {
    if query.is_empty() {
        return None;
    }

    // No stored headword can contain NUL, and PostgreSQL rejects it in text.
    if query.contains('\0') {
        return Some(WordFilter::Nothing);
    }

    Some(WordFilter::AnyFieldMatches {
        fields: SEARCHABLE_FIELDS.to_vec(),
        pattern: build_prefix_pattern(query),
    })
}

// ---------------------------------------------------------------------------
// Assembled request
// ---------------------------------------------------------------------------

/// Coerce raw `page` / `limit` values into a page request, rejecting
/// oversized limits.
pub fn page_request(
    raw_page: Option<&str>,
    raw_limit: Option<&str>,
) -> Result<PageRequest, SearchParamError> {
    let page = coerce_positive_int(raw_page, DEFAULT_PAGE);
    let limit = coerce_positive_int(raw_limit, DEFAULT_LIMIT);

    if limit > MAX_LIMIT {
        return Err(SearchParamError::LimitTooLarge { max: MAX_LIMIT });
    }

    Ok(PageRequest { page, limit })
}

/// A fully validated word search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSearch {
    /// The trimmed, truncated query text (may be empty).
    pub query: String,
    pub filter: Option<WordFilter>,
    pub page: PageRequest,
}

impl WordSearch {
    /// Validate raw query-string values.
    pub fn from_raw(
        q: Option<&str>,
        page: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Self, SearchParamError> {
        let page = page_request(page, limit)?;
        let query = normalize_query(q);
        let filter = build_word_filter(&query);

        Ok(Self {
            query,
            filter,
            page,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
