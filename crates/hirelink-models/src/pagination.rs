//! Pagination metadata for list responses.

use serde::{Deserialize, Serialize};

use crate::filter::PageParams;

/// Pagination block attached to every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl PageMeta {
    /// Compute metadata from a total match count (independent of
    /// pagination) and the clamped page parameters.
    pub fn new(total: i64, page: PageParams) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + page.limit - 1) / page.limit
        };
        Self {
            total,
            page: page.page,
            limit: page.limit,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_total_pages_up() {
        let meta = PageMeta::new(101, PageParams::clamped(1, 25));
        assert_eq!(meta.total_pages, 5);
        assert_eq!(meta.total, 101);
    }

    #[test]
    fn exact_multiple_has_no_extra_page() {
        assert_eq!(PageMeta::new(100, PageParams::clamped(2, 25)).total_pages, 4);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        assert_eq!(PageMeta::new(0, PageParams::default()).total_pages, 0);
    }
}
