//! Pagination math
//!
//! Pages are 1-based. Totals are always derived from the filtered count.

use std::ops::Range;

/// Number of pages for `count` items: `max(1, ceil(count / page_size))`
pub fn total_pages(count: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    count.div_ceil(page_size).max(1)
}

/// Clamp `page` into `[1, total]`
pub fn clamp_page(page: usize, total: usize) -> usize {
    page.clamp(1, total.max(1))
}

/// Derived view of the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Clamped current page (1-based)
    pub current: usize,
    pub total_pages: usize,
    /// Rows after filtering
    pub total_items: usize,
    pub page_size: usize,
}

impl PageInfo {
    pub fn new(requested: usize, total_items: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_pages(total_items, page_size);
        Self {
            current: clamp_page(requested, total_pages),
            total_pages,
            total_items,
            page_size,
        }
    }

    /// Index range of the current page within the filtered rows
    pub fn range(&self) -> Range<usize> {
        let start = ((self.current - 1) * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    pub fn can_prev(&self) -> bool {
        self.current > 1
    }

    pub fn can_next(&self) -> bool {
        self.current < self.total_pages
    }

    /// Page after stepping back once, clamped
    pub fn prev(&self) -> usize {
        self.current.saturating_sub(1).max(1)
    }

    /// Page after stepping forward once, clamped
    pub fn next(&self) -> usize {
        (self.current + 1).min(self.total_pages)
    }

    /// Whether page controls are worth showing
    pub fn is_paged(&self) -> bool {
        self.total_pages > 1
    }
}
