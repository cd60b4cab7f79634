//! # Paginator
//!
//! Slices a result list into the requested page.
//!
//! `total_pages` is never zero, so "page 1 of 1" is always displayable, and the
//! requested page is clamped against the length of the list it is given.

use serde::{Deserialize, Serialize};

/// Page numbers and range shown alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageSummary {
    /// Number of results across all pages.
    pub total: usize,
    /// 1-based index of the first result on this page, 0 when empty.
    pub range_start: usize,
    /// 1-based index of the last result on this page, 0 when empty.
    pub range_end: usize,
    pub page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// One page of a result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub summary: PageSummary,
}

/// Number of pages needed for `len` results; at least 1.
#[must_use]
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Slice `items` into page `page` (1-based) of `page_size` results.
///
/// A page size of 0 is treated as 1. `page` is clamped into `1..=total_pages`.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let page = page.clamp(1, total_pages);

    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    let slice = &items[start..end];

    Page {
        items: slice,
        summary: PageSummary {
            total: items.len(),
            range_start: if slice.is_empty() { 0 } else { start + 1 },
            range_end: end,
            page,
            total_pages,
            has_prev: page > 1,
            has_next: page < total_pages,
        },
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_one_empty_page() {
        let page = paginate::<u32>(&[], 4, 6);
        assert!(page.items.is_empty());
        assert_eq!(page.summary.total_pages, 1);
        assert_eq!(page.summary.page, 1);
        assert_eq!(page.summary.range_start, 0);
        assert_eq!(page.summary.range_end, 0);
        assert!(!page.summary.has_prev);
        assert!(!page.summary.has_next);
    }

    #[test]
    fn eight_items_two_pages() {
        let items: Vec<u32> = (1..=8).collect();

        let first = paginate(&items, 1, 6);
        assert_eq!(first.items, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(first.summary.total_pages, 2);
        assert_eq!((first.summary.range_start, first.summary.range_end), (1, 6));
        assert!(first.summary.has_next);

        let second = paginate(&items, 2, 6);
        assert_eq!(second.items, &[7, 8]);
        assert_eq!((second.summary.range_start, second.summary.range_end), (7, 8));
        assert!(second.summary.has_prev);
        assert!(!second.summary.has_next);
    }

    #[test]
    fn out_of_range_page_clamps() {
        let items: Vec<u32> = (1..=8).collect();
        let page = paginate(&items, 5, 6);
        assert_eq!(page.summary.page, 2);
        assert_eq!(page.items, &[7, 8]);

        let page = paginate(&items, 0, 6);
        assert_eq!(page.summary.page, 1);
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        let items: Vec<u32> = (1..=12).collect();
        assert_eq!(paginate(&items, 1, 6).summary.total_pages, 2);
    }

    #[test]
    fn zero_page_size_treated_as_one() {
        let items = [10, 20, 30];
        let page = paginate(&items, 2, 0);
        assert_eq!(page.items, &[20]);
        assert_eq!(page.summary.total_pages, 3);
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let items = [1, 2, 3];
        let page = paginate(&items, usize::MAX, 2);
        assert_eq!(page.summary.page, 2);
        assert_eq!(page.items, &[3]);
    }
}
