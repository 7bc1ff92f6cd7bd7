//! Page envelope for list endpoints.
//!
//! Every list endpoint returns `{data, links, meta}`: the page of records,
//! absolute page links, and counters. Pages past the end yield an empty
//! `data` array rather than an error.

use serde::Serialize;
use utoipa::ToSchema;

/// Navigation links for a page.
#[derive(Debug, Serialize, ToSchema)]
pub struct PageLinks {
    pub first: String,
    pub last: String,
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// Counters describing a page.
#[derive(Debug, Serialize, ToSchema)]
pub struct PageMeta {
    pub current_page: u64,
    /// 1-based index of the first record on this page, absent when empty
    pub from: Option<u64>,
    pub last_page: u64,
    pub per_page: u64,
    /// 1-based index of the last record on this page, absent when empty
    pub to: Option<u64>,
    pub total: u64,
}

/// A page of records with navigation links and counters.
#[derive(Debug, Serialize, ToSchema)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub links: PageLinks,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Assemble a page envelope.
    ///
    /// `page` is 1-based. `base_path` is the public path of the listing
    /// (e.g. `/api/categories`); links append `?page=N` to it.
    pub fn new(data: Vec<T>, total: u64, page: u64, per_page: u64, base_path: &str) -> Self {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let last_page = total.div_ceil(per_page).max(1);

        let (from, to) = if data.is_empty() {
            (None, None)
        } else {
            let from = (page - 1) * per_page + 1;
            (Some(from), Some(from + data.len() as u64 - 1))
        };

        let page_url = |n: u64| format!("{}?page={}", base_path, n);

        let links = PageLinks {
            first: page_url(1),
            last: page_url(last_page),
            prev: (page > 1).then(|| page_url(page - 1)),
            next: (page < last_page).then(|| page_url(page + 1)),
        };

        let meta = PageMeta {
            current_page: page,
            from,
            last_page,
            per_page,
            to,
            total,
        };

        Page { data, links, meta }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_of_several_pages() {
        let page = Page::new(vec![1, 2, 3], 7, 1, 3, "/api/items");

        assert_eq!(page.meta.current_page, 1);
        assert_eq!(page.meta.from, Some(1));
        assert_eq!(page.meta.to, Some(3));
        assert_eq!(page.meta.last_page, 3);
        assert_eq!(page.meta.total, 7);
        assert_eq!(page.links.first, "/api/items?page=1");
        assert_eq!(page.links.last, "/api/items?page=3");
        assert_eq!(page.links.prev, None);
        assert_eq!(page.links.next, Some("/api/items?page=2".to_string()));
    }

    #[test]
    fn test_middle_page() {
        let page = Page::new(vec![4, 5, 6], 7, 2, 3, "/api/items");

        assert_eq!(page.meta.from, Some(4));
        assert_eq!(page.meta.to, Some(6));
        assert_eq!(page.links.prev, Some("/api/items?page=1".to_string()));
        assert_eq!(page.links.next, Some("/api/items?page=3".to_string()));
    }

    #[test]
    fn test_last_partial_page() {
        let page = Page::new(vec![7], 7, 3, 3, "/api/items");

        assert_eq!(page.meta.from, Some(7));
        assert_eq!(page.meta.to, Some(7));
        assert_eq!(page.links.next, None);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let page = Page::new(Vec::<i32>::new(), 7, 9, 3, "/api/items");

        assert!(page.data.is_empty());
        assert_eq!(page.meta.from, None);
        assert_eq!(page.meta.to, None);
        assert_eq!(page.meta.last_page, 3);
        assert_eq!(page.meta.total, 7);
    }

    #[test]
    fn test_page_zero_is_treated_as_the_first_page() {
        let page = Page::new(vec![1], 1, 0, 15, "/api/items");

        assert_eq!(page.meta.current_page, 1);
        assert_eq!(page.meta.from, Some(1));
        assert_eq!(page.meta.to, Some(1));
        assert_eq!(page.links.prev, None);
    }

    #[test]
    fn test_empty_table_still_has_one_page() {
        let page = Page::new(Vec::<i32>::new(), 0, 1, 15, "/api/items");

        assert_eq!(page.meta.last_page, 1);
        assert_eq!(page.links.first, "/api/items?page=1");
        assert_eq!(page.links.last, "/api/items?page=1");
        assert_eq!(page.links.prev, None);
        assert_eq!(page.links.next, None);
    }

    #[test]
    fn test_zero_per_page_is_clamped() {
        let page = Page::new(Vec::<i32>::new(), 0, 1, 0, "/api/items");
        assert_eq!(page.meta.per_page, 1);
    }
}
