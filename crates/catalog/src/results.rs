//! Result pages and pagination.

use crate::criteria::PAGE_SIZE;
use crate::product::Product;
use serde::{Deserialize, Serialize};

/// Pagination info for a result page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: i64,
    /// Items per page.
    pub per_page: i64,
    /// Total number of matching items, ignoring pagination.
    pub total: i64,
    /// Total number of pages (at least 1).
    pub total_pages: i64,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info for the fixed page size.
    pub fn new(page: i64, total: i64) -> Self {
        let total_pages = if total == 0 {
            1
        } else {
            (total + PAGE_SIZE - 1) / PAGE_SIZE
        };

        Self {
            page,
            per_page: PAGE_SIZE,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Page numbers for display, windowed around the current page.
    pub fn page_numbers(&self, max_visible: usize) -> Vec<i64> {
        if self.total_pages as usize <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let start = (self.page - half as i64).max(1);
        let end = (start + max_visible as i64 - 1).min(self.total_pages);
        let start = (end - max_visible as i64 + 1).max(1);

        (start..=end).collect()
    }

    /// Check if on first page.
    pub fn is_first(&self) -> bool {
        self.page == 1
    }

    /// Check if on last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

/// Price range `[min, max]` over the whole filtered set, ignoring
/// pagination.
///
/// An empty filtered set yields the degenerate range `(0, 0)` rather
/// than an error; the slider then initializes to zero bounds.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

impl PriceRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Whether a price falls inside the range.
    pub fn contains(&self, price: i64) -> bool {
        self.min <= price && price <= self.max
    }
}

/// One page of products plus the aggregates the UI needs.
///
/// Recomputed on every request; never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultPage {
    /// The page's products, in composed order.
    pub items: Vec<Product>,
    /// Pagination info over the full filtered set.
    pub pagination: Pagination,
    /// Price range over the full filtered set.
    pub price_range: PriceRange,
}

impl ResultPage {
    pub fn new(items: Vec<Product>, pagination: Pagination, price_range: PriceRange) -> Self {
        Self {
            items,
            pagination,
            price_range,
        }
    }

    /// An empty page (zero matches).
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::default(),
            price_range: PriceRange::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_basics() {
        let p = Pagination::new(2, 45);
        assert_eq!(p.total_pages, 5);
        assert!(p.has_next);
        assert!(p.has_prev);
    }

    #[test]
    fn test_pagination_first_and_last() {
        let p = Pagination::new(1, 45);
        assert!(p.is_first());
        assert!(!p.has_prev);
        let p = Pagination::new(5, 45);
        assert!(p.is_last());
        assert!(!p.has_next);
    }

    #[test]
    fn test_pagination_empty_set() {
        let p = Pagination::new(1, 0);
        assert_eq!(p.total, 0);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next);
        assert!(!p.has_prev);
    }

    #[test]
    fn test_page_numbers_window() {
        let p = Pagination::new(10, 9 * 20);
        assert_eq!(p.page_numbers(5), vec![8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_page_numbers_small_set() {
        let p = Pagination::new(1, 20);
        assert_eq!(p.page_numbers(5), vec![1, 2, 3]);
    }

    #[test]
    fn test_price_range_contains() {
        let range = PriceRange::new(10, 50);
        assert!(range.contains(10));
        assert!(range.contains(50));
        assert!(!range.contains(9));
        assert!(!range.contains(51));
    }

    #[test]
    fn test_degenerate_range() {
        let range = PriceRange::default();
        assert_eq!(range, PriceRange::new(0, 0));
        assert!(range.contains(0));
    }

    #[test]
    fn test_empty_result_page() {
        let page = ResultPage::empty();
        assert!(page.is_empty());
        assert_eq!(page.len(), 0);
        assert_eq!(page.pagination.total, 0);
    }
}
