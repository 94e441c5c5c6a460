//! Pagination.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// Default page size of the product listing.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items across all pages.
    pub total: usize,
    /// Total number of pages; 0 when there are no items.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// Whether `page` addresses an existing page.
    pub fn in_range(&self) -> bool {
        self.page >= 1 && self.page <= self.total_pages
    }

    /// Page numbers for display, centred on the current page.
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    /// Start item number (1-indexed), 0 when the page is empty.
    pub fn start_item(&self) -> usize {
        if self.in_range() {
            self.offset() + 1
        } else {
            0
        }
    }

    /// End item number, 0 when the page is empty.
    pub fn end_item(&self) -> usize {
        if self.in_range() {
            (self.page * self.per_page).min(self.total)
        } else {
            0
        }
    }
}

/// One page of products.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<'a> {
    pub products: Vec<&'a Product>,
    pub pagination: Pagination,
}

impl<'a> Page<'a> {
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Total matching products across all pages.
    pub fn total(&self) -> usize {
        self.pagination.total
    }
}

/// Slice out one 1-indexed page.
///
/// Page 0, a page size of 0 or a page past the end give an empty slice
/// with the correct total.
pub fn paginate<'a, I>(products: I, page: usize, page_size: usize) -> Page<'a>
where
    I: IntoIterator<Item = &'a Product>,
{
    let all: Vec<&'a Product> = products.into_iter().collect();
    let pagination = Pagination::new(page, page_size, all.len());

    let products = if pagination.in_range() {
        all.into_iter()
            .skip(pagination.offset())
            .take(page_size)
            .collect()
    } else {
        Vec::new()
    };

    Page {
        products,
        pagination,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;

    fn catalog(n: usize) -> Vec<Product> {
        (1..=n).map(|i| product(&i.to_string(), 100, 1)).collect()
    }

    #[test]
    fn test_pagination_basics() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.total_pages, 5);
        assert!(p.has_next);
        assert!(p.has_prev);
        assert_eq!(p.offset(), 10);
    }

    #[test]
    fn test_pagination_last_page() {
        let p = Pagination::new(5, 10, 45);
        assert!(p.has_prev);
        assert!(!p.has_next);
        assert_eq!(p.start_item(), 41);
        assert_eq!(p.end_item(), 45);
    }

    #[test]
    fn test_pagination_empty() {
        let p = Pagination::new(1, 9, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next);
        assert!(!p.in_range());
        assert_eq!(p.start_item(), 0);
    }

    #[test]
    fn test_pagination_page_numbers() {
        let p = Pagination::new(5, 10, 100);
        assert_eq!(p.page_numbers(5), vec![3, 4, 5, 6, 7]);

        let p = Pagination::new(1, 10, 100);
        assert_eq!(p.page_numbers(5), vec![1, 2, 3, 4, 5]);

        let p = Pagination::new(10, 10, 100);
        assert_eq!(p.page_numbers(5), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_paginate_slices() {
        let products = catalog(22);
        let page = paginate(&products, 3, 9);
        let ids: Vec<_> = page.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["19", "20", "21", "22"]);
        assert_eq!(page.total(), 22);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(!page.pagination.has_next);
    }

    #[test]
    fn test_paginate_out_of_range_is_empty() {
        let products = catalog(5);

        let past_end = paginate(&products, 4, 2);
        assert!(past_end.is_empty());
        assert_eq!(past_end.total(), 5);

        let page_zero = paginate(&products, 0, 2);
        assert!(page_zero.is_empty());
        assert_eq!(page_zero.total(), 5);

        let zero_size = paginate(&products, 1, 0);
        assert!(zero_size.is_empty());
        assert_eq!(zero_size.total(), 5);
    }
}
