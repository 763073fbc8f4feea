//! NavState - Active Page

use crate::app::navigation::ActivePage;

/// Page shown in the content area
#[derive(Debug, Clone, Default)]
pub struct NavState {
    pub active_page: ActivePage,
    /// Pages opened at least once, in first-visit order
    visited: Vec<ActivePage>,
}

impl NavState {
    /// Switch pages; returns `false` when `page` was already active
    pub fn set_active_page(&mut self, page: ActivePage) -> bool {
        if !self.visited.contains(&page) {
            self.visited.push(page);
        }
        if self.active_page == page {
            return false;
        }
        self.active_page = page;
        true
    }

    pub fn visited(&self) -> &[ActivePage] {
        &self.visited
    }

    /// Back to the landing page, forgetting visits (used on logout)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_and_reset() {
        let mut nav = NavState::default();
        assert!(!nav.set_active_page(ActivePage::Business));
        assert!(nav.set_active_page(ActivePage::Scripts));
        assert!(!nav.set_active_page(ActivePage::Scripts));
        assert_eq!(nav.visited(), &[ActivePage::Business, ActivePage::Scripts]);

        nav.reset();
        assert_eq!(nav.active_page, ActivePage::Business);
        assert!(nav.visited().is_empty());
    }
}
