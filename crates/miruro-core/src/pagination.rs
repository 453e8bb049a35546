//! Scroll-driven "load one more page" trigger for card grids.

/// Distance from the bottom, in logical pixels, at which the next page is
/// requested.
pub const DEFAULT_SCROLL_THRESHOLD: f32 = 1000.0;

/// Scroll position of a vertically scrolling container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top.
    pub offset_y: f32,
    /// Height of the visible area.
    pub viewport_height: f32,
    /// Full height of the scrolled content.
    pub content_height: f32,
}

impl ScrollMetrics {
    /// True when the bottom of the viewport is within `threshold` of the end
    /// of the content.
    pub fn near_bottom(&self, threshold: f32) -> bool {
        self.offset_y + self.viewport_height >= self.content_height - threshold
    }
}

#[derive(Debug, Clone)]
pub struct ScrollPager {
    threshold: f32,
    current_page: u32,
    has_next_page: bool,
    loading: bool,
}

impl Default for ScrollPager {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THRESHOLD)
    }
}

impl ScrollPager {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.max(0.0),
            current_page: 0,
            has_next_page: true,
            loading: false,
        }
    }

    /// Forget all loaded pages. The next request will be for page 1.
    pub fn reset(&mut self) {
        self.current_page = 0;
        self.has_next_page = true;
        self.loading = false;
    }

    /// Claim the first page request. Returns `None` if one is in flight.
    pub fn start(&mut self) -> Option<u32> {
        if self.loading || !self.has_next_page {
            return None;
        }
        self.loading = true;
        Some(self.current_page + 1)
    }

    /// React to a scroll event. Returns the page to fetch when the threshold
    /// is crossed, more pages remain and nothing is already loading.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Option<u32> {
        if !metrics.near_bottom(self.threshold) {
            return None;
        }
        self.start()
    }

    pub fn page_loaded(&mut self, page: u32, has_next_page: bool) {
        self.current_page = page;
        self.has_next_page = has_next_page;
        self.loading = false;
    }

    pub fn page_failed(&mut self) {
        self.loading = false;
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(offset_y: f32) -> ScrollMetrics {
        ScrollMetrics {
            offset_y,
            viewport_height: 800.0,
            content_height: 5000.0,
        }
    }

    #[test]
    fn test_no_trigger_above_threshold() {
        let mut pager = ScrollPager::default();
        pager.page_loaded(1, true);
        // 0 + 800 < 5000 - 1000
        assert_eq!(pager.on_scroll(at(0.0)), None);
        assert_eq!(pager.on_scroll(at(3199.0)), None);
    }

    #[test]
    fn test_trigger_at_threshold() {
        let mut pager = ScrollPager::default();
        pager.page_loaded(1, true);
        assert_eq!(pager.on_scroll(at(3200.0)), Some(2));
        assert!(pager.is_loading());
    }

    #[test]
    fn test_fires_once_per_page() {
        let mut pager = ScrollPager::default();
        pager.page_loaded(1, true);
        assert_eq!(pager.on_scroll(at(3300.0)), Some(2));
        assert_eq!(pager.on_scroll(at(3400.0)), None);
        assert_eq!(pager.on_scroll(at(4200.0)), None);

        pager.page_loaded(2, true);
        assert_eq!(pager.on_scroll(at(4200.0)), Some(3));
    }

    #[test]
    fn test_stops_without_next_page() {
        let mut pager = ScrollPager::default();
        pager.page_loaded(4, false);
        assert_eq!(pager.on_scroll(at(4200.0)), None);
        assert!(!pager.has_next_page());
    }

    #[test]
    fn test_failure_allows_retry() {
        let mut pager = ScrollPager::default();
        pager.page_loaded(1, true);
        assert_eq!(pager.on_scroll(at(4000.0)), Some(2));
        pager.page_failed();
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.on_scroll(at(4000.0)), Some(2));
    }

    #[test]
    fn test_short_content_triggers_immediately() {
        let mut pager = ScrollPager::default();
        pager.page_loaded(1, true);
        let metrics = ScrollMetrics {
            offset_y: 0.0,
            viewport_height: 800.0,
            content_height: 600.0,
        };
        assert_eq!(pager.on_scroll(metrics), Some(2));
    }

    #[test]
    fn test_reset_and_start() {
        let mut pager = ScrollPager::default();
        pager.page_loaded(3, false);
        pager.reset();
        assert_eq!(pager.start(), Some(1));
        assert_eq!(pager.start(), None);
    }
}
