//! Page arithmetic for listings.
//!
//! Pages are one-based; the underlying store works with zero-based inclusive
//! row ranges, so page 1 with 12 items per page covers rows `[0, 11]`.

use serde::Serialize;

/// Items shown per page unless a caller asks for something else.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 12;

/// One-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl Pagination {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Zero-based inclusive row range covered by this page.
    ///
    /// The page number comes straight from the query string, so the
    /// arithmetic saturates instead of overflowing on absurd values.
    pub fn range(&self) -> (usize, usize) {
        let from = (self.page.max(1) - 1).saturating_mul(self.per_page);
        (from, from.saturating_add(self.per_page.saturating_sub(1)))
    }

    pub fn offset(&self) -> i64 {
        let (from, _) = self.range();
        i64::try_from(from).unwrap_or(i64::MAX)
    }

    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

/// A single page of results together with the overall totals.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, total: usize, per_page: usize) -> Self {
        Self {
            items,
            page,
            total,
            total_pages: total.div_ceil(per_page.max(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_covers_rows_zero_to_eleven() {
        let pagination = Pagination::new(1, 12);
        assert_eq!(pagination.range(), (0, 11));
        assert_eq!(pagination.offset(), 0);
        assert_eq!(pagination.limit(), 12);
    }

    #[test]
    fn second_page_covers_rows_twelve_to_twenty_three() {
        let pagination = Pagination::new(2, 12);
        assert_eq!(pagination.range(), (12, 23));
        assert_eq!(pagination.offset(), 12);
    }

    #[test]
    fn page_zero_is_treated_as_page_one() {
        assert_eq!(Pagination::new(0, 12).range(), (0, 11));
    }

    #[test]
    fn huge_page_numbers_saturate_instead_of_overflowing() {
        let pagination = Pagination::new(usize::MAX, 12);
        assert_eq!(pagination.range(), (usize::MAX, usize::MAX));
        assert_eq!(pagination.offset(), i64::MAX);
        assert_eq!(pagination.limit(), 12);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: Paginated<i32> = Paginated::new(vec![], 1, 25, 12);
        assert_eq!(page.total_pages, 3);

        let page: Paginated<i32> = Paginated::new(vec![], 1, 24, 12);
        assert_eq!(page.total_pages, 2);

        let page: Paginated<i32> = Paginated::new(vec![], 1, 0, 12);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn serializes_totals_for_api_clients() {
        let page = Paginated::new(vec!["a", "b"], 1, 2, 12);
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["page"], 1);
        assert_eq!(value["total"], 2);
        assert_eq!(value["total_pages"], 1);
        assert_eq!(value["items"].as_array().unwrap().len(), 2);
    }
}
