//! Paginated result envelope.
//!
//! List and search endpoints respond with the same envelope so clients can
//! page through any collection the same way:
//!
//! ```json
//! { "docs": [...], "totalDocs": 42, "limit": 20, "totalPages": 3,
//!   "page": 1, "pagingCounter": 1, "hasPrevPage": false,
//!   "hasNextPage": true, "prevPage": null, "nextPage": 2 }
//! ```

use serde::Serialize;

/// A validated page request. Both values are always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Row offset for this page. Saturates instead of overflowing for
    /// absurdly large page numbers.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// One page of documents plus page metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub docs: Vec<T>,
    pub total_docs: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub page: i64,
    pub paging_counter: i64,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_page: Option<i64>,
    pub next_page: Option<i64>,
}

impl<T> Paginated<T> {
    /// Assemble the envelope from one page of docs and the total match count.
    pub fn new(docs: Vec<T>, total_docs: i64, request: PageRequest) -> Self {
        let PageRequest { page, limit } = request;
        let total_docs = total_docs.max(0);
        let total_pages = ((total_docs + limit - 1) / limit).max(1);
        let has_prev_page = page > 1;
        let has_next_page = page < total_pages;

        Self {
            docs,
            total_docs,
            limit,
            total_pages,
            page,
            paging_counter: request.offset().saturating_add(1),
            has_prev_page,
            has_next_page,
            prev_page: has_prev_page.then(|| page - 1),
            next_page: has_next_page.then(|| page + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(page: i64, limit: i64) -> PageRequest {
        PageRequest { page, limit }
    }

    #[test]
    fn offset_of_first_page_is_zero() {
        assert_eq!(req(1, 20).offset(), 0);
        assert_eq!(req(3, 20).offset(), 40);
    }

    #[test]
    fn offset_saturates() {
        assert_eq!(req(i64::MAX, 100).offset(), i64::MAX);
    }

    #[test]
    fn empty_result_still_has_one_page() {
        let page: Paginated<u8> = Paginated::new(vec![], 0, req(1, 20));
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next_page);
        assert!(!page.has_prev_page);
        assert_eq!(page.paging_counter, 1);
        assert_eq!(page.prev_page, None);
        assert_eq!(page.next_page, None);
    }

    #[test]
    fn middle_page_links_both_ways() {
        let page = Paginated::new(vec![1, 2, 3, 4, 5], 23, req(2, 5));
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.paging_counter, 6);
        assert_eq!(page.prev_page, Some(1));
        assert_eq!(page.next_page, Some(3));
    }

    #[test]
    fn last_page_has_no_next() {
        let page = Paginated::new(vec![1, 2, 3], 23, req(5, 5));
        assert!(!page.has_next_page);
        assert_eq!(page.next_page, None);
        assert_eq!(page.prev_page, Some(4));
    }

    #[test]
    fn exact_multiple_does_not_add_a_page() {
        let page: Paginated<u8> = Paginated::new(vec![], 40, req(1, 20));
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn serializes_camel_case_keys() {
        let page = Paginated::new(vec!["a"], 1, req(1, 20));
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalDocs"], 1);
        assert_eq!(json["pagingCounter"], 1);
        assert_eq!(json["hasNextPage"], false);
        assert!(json["nextPage"].is_null());
        assert_eq!(json["docs"][0], "a");
    }
}
