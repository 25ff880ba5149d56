//! Repository for the `words` table.

use lughat_core::collections::WORD_TITLE_FIELD;
use lughat_core::pagination::{PageRequest, Paginated};
use lughat_core::search::{WordFilter, WordSearch};
use lughat_core::types::DbId;
use lughat_core::words::normalize_headword;
use sqlx::PgPool;

use crate::models::word::{CreateWord, UpdateWord, Word, WordSummary};

/// Column list for full `words` rows.
const COLUMNS: &str = "id, word_uyghur, word_english, word_turkish, pronunciation_id, \
                       created_at, updated_at";

/// Column list for the search/list projection.
const SUMMARY_COLUMNS: &str =
    "id, word_uyghur, word_english, word_turkish, pronunciation_id AS pronunciation";

/// A rendered WHERE clause and the value bound to its `$1` placeholder.
#[derive(Debug, PartialEq, Eq)]
struct RenderedFilter<'a> {
    clause: String,
    pattern: Option<&'a str>,
}

/// Render a [`WordFilter`] into SQL. The pattern is always bound as `$1`.
///
/// PostgreSQL's `~` operator is a case-sensitive regular-expression match;
/// NULL columns simply fail to match.
fn render_filter(filter: Option<&WordFilter>) -> RenderedFilter<'_> {
    match filter {
        None => RenderedFilter {
            clause: String::new(),
            pattern: None,
        },
        Some(WordFilter::AnyFieldMatches { fields, pattern }) => {
            let ors: Vec<String> = fields
                .iter()
                .map(|field| format!("{} ~ $1", field.column()))
                .collect();
            RenderedFilter {
                clause: format!("WHERE ({})", ors.join(" OR ")),
                pattern: Some(pattern.as_str()),
            }
        }
        Some(WordFilter::Nothing) => RenderedFilter {
            clause: "WHERE FALSE".to_string(),
            pattern: None,
        },
    }
}

/// Provides queries over word entries.
pub struct WordRepo;

impl WordRepo {
    /// Insert a new word. Headwords are trimmed before they are stored.
    pub async fn create(pool: &PgPool, input: &CreateWord) -> Result<Word, sqlx::Error> {
        let query = format!(
            "INSERT INTO words (word_uyghur, word_english, word_turkish, pronunciation_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Word>(&query)
            .bind(normalize_headword(&input.word_uyghur))
            .bind(normalize_headword(&input.word_english))
            .bind(input.word_turkish.as_deref().map(normalize_headword))
            .bind(input.pronunciation)
            .fetch_one(pool)
            .await
    }

    /// Find a word by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Word>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM words WHERE id = $1");
        sqlx::query_as::<_, Word>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a patch. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWord,
    ) -> Result<Option<Word>, sqlx::Error> {
        let query = format!(
            "UPDATE words SET
                word_uyghur = COALESCE($2, word_uyghur),
                word_english = COALESCE($3, word_english),
                word_turkish = CASE WHEN $4 THEN $5 ELSE word_turkish END,
                pronunciation_id = CASE WHEN $6 THEN $7 ELSE pronunciation_id END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Word>(&query)
            .bind(id)
            .bind(input.word_uyghur.as_deref().map(normalize_headword))
            .bind(input.word_english.as_deref().map(normalize_headword))
            .bind(input.word_turkish.is_some())
            .bind(
                input
                    .word_turkish
                    .as_ref()
                    .and_then(|t| t.as_deref())
                    .map(normalize_headword),
            )
            .bind(input.pronunciation.is_some())
            .bind(input.pronunciation.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Delete a word. Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM words WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Run a word search: count all matches, then fetch one page sorted by
    /// the Uyghur headword in code-point order.
    pub async fn search(
        pool: &PgPool,
        search: &WordSearch,
    ) -> Result<Paginated<WordSummary>, sqlx::Error> {
        Self::find_page(pool, search.filter.as_ref(), search.page).await
    }

    /// Unfiltered paginated listing.
    pub async fn list(
        pool: &PgPool,
        page: PageRequest,
    ) -> Result<Paginated<WordSummary>, sqlx::Error> {
        Self::find_page(pool, None, page).await
    }

    async fn find_page(
        pool: &PgPool,
        filter: Option<&WordFilter>,
        page: PageRequest,
    ) -> Result<Paginated<WordSummary>, sqlx::Error> {
        let rendered = render_filter(filter);
        let (limit_idx, offset_idx) = match rendered.pattern {
            Some(_) => (2, 3),
            None => (1, 2),
        };

        let count_query = format!("SELECT COUNT(*) FROM words {}", rendered.clause);
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(pattern) = rendered.pattern {
            count = count.bind(pattern);
        }
        let total_docs = count.fetch_one(pool).await?;

        let page_query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM words {clause} \
             ORDER BY {sort} COLLATE \"C\" ASC, id ASC \
             LIMIT ${limit_idx} OFFSET ${offset_idx}",
            clause = rendered.clause,
            sort = WORD_TITLE_FIELD.column(),
        );
        let mut docs = sqlx::query_as::<_, WordSummary>(&page_query);
        if let Some(pattern) = rendered.pattern {
            docs = docs.bind(pattern);
        }
        let docs = docs
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        tracing::debug!(
            total_docs,
            returned = docs.len(),
            page = page.page,
            limit = page.limit,
            "Word page fetched",
        );

        Ok(Paginated::new(docs, total_docs, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lughat_core::search::build_word_filter;

    #[test]
    fn no_filter_renders_empty_clause() {
        let rendered = render_filter(None);
        assert_eq!(rendered.clause, "");
        assert_eq!(rendered.pattern, None);
    }

    #[test]
    fn filter_renders_or_across_fields() {
        let filter = build_word_filter("a.b").unwrap();
        let rendered = render_filter(Some(&filter));
        assert_eq!(
            rendered.clause,
            "WHERE (word_uyghur ~ $1 OR word_english ~ $1 OR word_turkish ~ $1)"
        );
        assert_eq!(rendered.pattern, Some(r"^a\.b"));
    }

    #[test]
    fn nothing_filter_binds_no_pattern() {
        let rendered = render_filter(Some(&WordFilter::Nothing));
        assert_eq!(rendered.clause, "WHERE FALSE");
        assert_eq!(rendered.pattern, None);
    }
}
