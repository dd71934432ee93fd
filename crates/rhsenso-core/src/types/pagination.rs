//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;

/// A clamped page window. Both fields are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
}

impl PageRequest {
    /// Build a page window from raw caller input.
    ///
    /// Absent or non-positive values fall back to page 1 and the configured
    /// default size; sizes above the configured maximum are capped. Bad
    /// paging input never produces an error.
    pub fn from_raw(page: Option<i64>, page_size: Option<i64>, config: &PaginationConfig) -> Self {
        let page = match page {
            Some(p) if p > 0 => p as u64,
            _ => 1,
        };
        let page_size = match page_size {
            Some(s) if s > 0 => (s as u64).min(config.max_page_size),
            _ => config.default_page_size,
        };
        Self { page, page_size }
    }

    /// Number of rows to skip (SQL `OFFSET`).
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Number of rows to take (SQL `LIMIT`).
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::from_raw(None, None, &PaginationConfig::default())
    }
}

/// One page of results plus the totals needed to walk the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Total number of matching rows across all pages.
    pub total_count: u64,
    /// Total number of pages; zero when nothing matches.
    pub total_pages: u64,
    /// Whether there is a next page.
    pub has_next: bool,
    /// Whether there is a previous page.
    pub has_previous: bool,
}

impl<T> PageResponse<T> {
    /// Assemble a page from its items and the unpaged total.
    pub fn new(items: Vec<T>, request: &PageRequest, total_count: u64) -> Self {
        let total_pages = total_count.div_ceil(request.page_size);
        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total_count,
            total_pages,
            has_next: request.page < total_pages,
            has_previous: request.page > 1,
        }
    }

    /// Transform the items while keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PaginationConfig {
        PaginationConfig {
            default_page_size: 20,
            max_page_size: 100,
        }
    }

    #[test]
    fn non_positive_input_is_clamped_to_defaults() {
        let req = PageRequest::from_raw(Some(0), Some(-5), &config());
        assert_eq!(req, PageRequest { page: 1, page_size: 20 });

        let req = PageRequest::from_raw(None, None, &config());
        assert_eq!(req, PageRequest { page: 1, page_size: 20 });
    }

    #[test]
    fn oversized_page_is_capped() {
        let req = PageRequest::from_raw(Some(3), Some(10_000), &config());
        assert_eq!(req.page_size, 100);
        assert_eq!(req.offset(), 200);
    }

    #[test]
    fn response_metadata() {
        let req = PageRequest::from_raw(Some(2), Some(10), &config());
        let page = PageResponse::new(vec![1; 10], &req, 25);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(page.has_previous);

        let empty: PageResponse<i32> = PageResponse::new(Vec::new(), &PageRequest::default(), 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next);
        assert!(!empty.has_previous);
    }
}
