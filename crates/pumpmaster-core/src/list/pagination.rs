//! Pagination bookkeeping for the pump list.

use serde::{Deserialize, Serialize};

/// How many page numbers the pager shows at once.
pub const MAX_VISIBLE_PAGES: usize = 5;

/// Page, size and total bookkeeping for one paginated list.
///
/// The controller never clamps `current_page` on navigation; the data
/// source answers out-of-range pages with an empty result and the caller
/// decides where to go next. Totals are externally driven from response
/// metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    current_page: usize,
    page_size: usize,
    total: usize,
    total_pages: usize,
}

impl PaginationState {
    /// Creates pagination state starting at page 1 with the given size.
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size,
            total: 0,
            total_pages: 0,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Moves to the given page unconditionally.
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Changes the page size and resets to page 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
        self.current_page = 1;
    }

    /// Applies the total item count from response metadata.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
    }

    /// Applies the total page count from response metadata.
    pub fn set_total_pages(&mut self, total_pages: usize) {
        self.total_pages = total_pages;
    }

    /// Returns to page 1 and zeroes the totals; the page size survives.
    pub fn reset(&mut self) {
        self.current_page = 1;
        self.total = 0;
        self.total_pages = 0;
    }

    /// 1-based index of the first item on the current page.
    pub fn start_item(&self) -> usize {
        self.current_page.saturating_sub(1) * self.page_size + 1
    }

    /// 1-based index of the last item on the current page, capped by total.
    pub fn end_item(&self) -> usize {
        (self.current_page * self.page_size).min(self.total)
    }

    /// The window of page numbers the pager renders, at most
    /// [`MAX_VISIBLE_PAGES`] wide and centered on the current page where
    /// possible. Empty while no pages exist.
    pub fn visible_pages(&self) -> Vec<usize> {
        if self.total_pages == 0 {
            return Vec::new();
        }

        let mut start = self.current_page.saturating_sub(MAX_VISIBLE_PAGES / 2).max(1);
        let end = (start + MAX_VISIBLE_PAGES - 1).min(self.total_pages);
        // The window shrinks at the tail (and collapses entirely when the
        // current page sits beyond total_pages); re-anchor it on `end`.
        if end.saturating_sub(start) + 1 < MAX_VISIBLE_PAGES {
            start = end.saturating_sub(MAX_VISIBLE_PAGES - 1).max(1);
        }

        (start..=end).collect()
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_page_size_resets_page() {
        let mut pagination = PaginationState::new(10);
        pagination.go_to_page(7);
        pagination.set_page_size(50);
        assert_eq!(pagination.current_page(), 1);
        assert_eq!(pagination.page_size(), 50);
    }

    #[test]
    fn test_go_to_page_does_not_clamp() {
        let mut pagination = PaginationState::new(10);
        pagination.set_total(47);
        pagination.set_total_pages(5);
        pagination.go_to_page(99);
        assert_eq!(pagination.current_page(), 99);
    }

    #[test]
    fn test_item_range_mid_list() {
        let mut pagination = PaginationState::new(10);
        pagination.set_total(47);
        pagination.go_to_page(3);
        assert_eq!(pagination.start_item(), 21);
        assert_eq!(pagination.end_item(), 30);
    }

    #[test]
    fn test_item_range_last_page() {
        let mut pagination = PaginationState::new(10);
        pagination.set_total(47);
        pagination.go_to_page(5);
        assert_eq!(pagination.start_item(), 41);
        assert_eq!(pagination.end_item(), 47);
    }

    #[test]
    fn test_reset_keeps_page_size() {
        let mut pagination = PaginationState::new(20);
        pagination.go_to_page(4);
        pagination.set_total(100);
        pagination.set_total_pages(5);
        pagination.reset();
        assert_eq!(pagination.current_page(), 1);
        assert_eq!(pagination.total(), 0);
        assert_eq!(pagination.total_pages(), 0);
        assert_eq!(pagination.page_size(), 20);
    }

    #[test]
    fn test_visible_pages_window() {
        let mut pagination = PaginationState::new(10);
        pagination.set_total(100);
        pagination.set_total_pages(10);

        pagination.go_to_page(1);
        assert_eq!(pagination.visible_pages(), vec![1, 2, 3, 4, 5]);

        pagination.go_to_page(6);
        assert_eq!(pagination.visible_pages(), vec![4, 5, 6, 7, 8]);

        pagination.go_to_page(10);
        assert_eq!(pagination.visible_pages(), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_visible_pages_short_list() {
        let mut pagination = PaginationState::new(10);
        pagination.set_total_pages(3);
        pagination.go_to_page(2);
        assert_eq!(pagination.visible_pages(), vec![1, 2, 3]);
    }

    #[test]
    fn test_visible_pages_empty() {
        let pagination = PaginationState::new(10);
        assert_eq!(pagination.visible_pages(), Vec::<usize>::new());
    }

    #[test]
    fn test_visible_pages_current_beyond_range() {
        let mut pagination = PaginationState::new(10);
        pagination.set_total_pages(5);
        pagination.go_to_page(99);
        assert_eq!(pagination.visible_pages(), vec![1, 2, 3, 4, 5]);
    }
}
