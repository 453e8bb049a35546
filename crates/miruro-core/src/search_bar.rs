//! State of the navbar search box and its suggestion dropdown.

use std::time::Duration;

use crate::debounce::{Debouncer, Ticket};
use crate::models::Anime;
use crate::routes::Route;

/// Idle time after the last keystroke before suggestions are fetched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Number of suggestions shown in the dropdown.
pub const DEFAULT_DROPDOWN_RESULTS: u32 = 5;

/// Windows narrower than this hide the search box behind a toggle.
pub const DEFAULT_COMPACT_WIDTH: f32 = 500.0;

/// A suggestion fetch the caller should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub page: u32,
    pub per_page: u32,
    /// Echoed back to [`SearchBar::results_loaded`].
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub struct SearchBar {
    query: String,
    focused: bool,
    dropdown_open: bool,
    results: Vec<Anime>,
    selected: Option<usize>,
    compact: bool,
    input_visible: bool,
    compact_width: f32,
    dropdown_results: u32,
    debouncer: Debouncer<String>,
    in_flight: Option<u64>,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE, DEFAULT_DROPDOWN_RESULTS, DEFAULT_COMPACT_WIDTH)
    }
}

impl SearchBar {
    pub fn new(debounce: Duration, dropdown_results: u32, compact_width: f32) -> Self {
        Self {
            query: String::new(),
            focused: false,
            dropdown_open: false,
            results: Vec::new(),
            selected: None,
            compact: false,
            input_visible: false,
            compact_width,
            dropdown_results: dropdown_results.max(1),
            debouncer: Debouncer::new(debounce),
            in_flight: None,
        }
    }

    // ── Accessors ────────────────────────────────────────────────

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    pub fn results(&self) -> &[Anime] {
        &self.results
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_compact(&self) -> bool {
        self.compact
    }

    /// Whether the search input is on screen at all.
    pub fn is_input_shown(&self) -> bool {
        !self.compact || self.input_visible
    }

    pub fn debounce_window(&self) -> Duration {
        self.debouncer.window()
    }

    /// The clear button only shows while there is something to clear.
    pub fn can_clear(&self) -> bool {
        !self.query.is_empty()
    }

    // ── Typing & fetching ────────────────────────────────────────

    /// Store the new text and start the debounce window.
    pub fn input_changed(&mut self, value: String) -> Ticket {
        self.query = value.clone();
        self.debouncer.schedule(value)
    }

    /// Called once the debounce window has passed for `ticket`.
    ///
    /// Opens the dropdown and returns a request unless the ticket is stale
    /// or the query is blank.
    pub fn debounce_elapsed(&mut self, ticket: Ticket) -> Option<SearchRequest> {
        let query = self.debouncer.fire(ticket)?;
        self.dropdown_open = true;

        let query = query.trim();
        if query.is_empty() {
            self.in_flight = None;
            self.results.clear();
            self.selected = None;
            return None;
        }

        self.in_flight = Some(ticket.generation());
        Some(SearchRequest {
            query: query.to_string(),
            page: 1,
            per_page: self.dropdown_results,
            generation: ticket.generation(),
        })
    }

    /// Apply a finished fetch. Responses for superseded requests are dropped.
    pub fn results_loaded(&mut self, generation: u64, result: Result<Vec<Anime>, String>) {
        if self.in_flight != Some(generation) {
            tracing::debug!(generation, "dropping stale search response");
            return;
        }
        self.in_flight = None;
        self.selected = None;

        match result {
            Ok(mut results) => {
                results.truncate(self.dropdown_results as usize);
                self.results = results;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch search results");
                self.results.clear();
            }
        }
    }

    // ── Focus & dropdown ─────────────────────────────────────────

    pub fn focus(&mut self) {
        self.focused = true;
        self.dropdown_open = true;
        if self.compact {
            self.input_visible = true;
        }
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn escape(&mut self) {
        self.focused = false;
        self.dropdown_open = false;
    }

    /// Dismiss the dropdown, e.g. after a click outside of it.
    pub fn close_dropdown(&mut self) {
        self.dropdown_open = false;
    }

    /// Whether the dropdown has anything to draw.
    pub fn dropdown_visible(&self) -> bool {
        self.dropdown_open && !self.results.is_empty()
    }

    // ── Selection ────────────────────────────────────────────────

    pub fn select_next(&mut self) {
        if self.results.is_empty() {
            return;
        }
        let last = self.results.len() - 1;
        self.selected = Some(match self.selected {
            None => 0,
            Some(i) => (i + 1).min(last),
        });
    }

    pub fn select_previous(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.selected = match self.selected {
            None | Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }

    pub fn hover_select(&mut self, index: usize) {
        if index < self.results.len() {
            self.selected = Some(index);
        }
    }

    /// Enter: open the highlighted result, or search for the typed text.
    pub fn submit(&mut self) -> Route {
        let route = match self.selected.and_then(|i| self.results.get(i)) {
            Some(anime) => Route::watch(anime.id.clone()),
            None => Route::search(&self.query),
        };
        self.debouncer.cancel();
        self.in_flight = None;
        self.dropdown_open = false;
        self.focused = false;
        route
    }

    /// The trailing "View all results" row: search for the typed text even
    /// when a suggestion is highlighted.
    pub fn view_all(&mut self) -> Route {
        self.selected = None;
        self.submit()
    }

    /// Empty the box and the suggestions but keep the cursor in it.
    pub fn clear(&mut self) {
        self.query.clear();
        self.results.clear();
        self.selected = None;
        self.dropdown_open = false;
        self.debouncer.cancel();
        self.in_flight = None;
        self.focused = true;
    }

    // ── Layout ───────────────────────────────────────────────────

    pub fn set_viewport_width(&mut self, width: f32) {
        let compact = width < self.compact_width;
        if compact != self.compact {
            self.compact = compact;
            self.input_visible = false;
        }
    }

    /// The search button in compact mode.
    pub fn toggle_input_visibility(&mut self) {
        if self.compact {
            self.input_visible = !self.input_visible;
        }
    }

    /// Navigation hides the compact search row again.
    pub fn route_changed(&mut self) {
        if self.compact {
            self.input_visible = false;
        }
    }

    /// Mirror the query of the current route into the box.
    pub fn sync_query(&mut self, query: Option<&str>) {
        self.query = query.unwrap_or_default().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnimeTitle;

    fn anime(id: &str) -> Anime {
        Anime {
            id: id.into(),
            title: AnimeTitle {
                english: Some(format!("Anime {id}")),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn loaded_bar(ids: &[&str]) -> SearchBar {
        let mut bar = SearchBar::default();
        let ticket = bar.input_changed("one".into());
        let req = bar.debounce_elapsed(ticket).unwrap();
        bar.results_loaded(req.generation, Ok(ids.iter().map(|id| anime(id)).collect()));
        bar
    }

    #[test]
    fn test_debounced_request_uses_latest_text() {
        let mut bar = SearchBar::default();
        let t1 = bar.input_changed("o".into());
        let t2 = bar.input_changed("on".into());
        let t3 = bar.input_changed("one ".into());

        assert_eq!(bar.debounce_elapsed(t1), None);
        assert_eq!(bar.debounce_elapsed(t2), None);
        let req = bar.debounce_elapsed(t3).unwrap();
        assert_eq!(req.query, "one");
        assert_eq!(req.page, 1);
        assert_eq!(req.per_page, DEFAULT_DROPDOWN_RESULTS);
        assert!(bar.is_dropdown_open());
    }

    #[test]
    fn test_blank_query_opens_without_request() {
        let mut bar = SearchBar::default();
        let t = bar.input_changed("   ".into());
        assert_eq!(bar.debounce_elapsed(t), None);
        assert!(bar.is_dropdown_open());
    }

    #[test]
    fn test_erased_query_drops_pending_response() {
        let mut bar = SearchBar::default();
        let t1 = bar.input_changed("nar".into());
        let old = bar.debounce_elapsed(t1).unwrap();
        let t2 = bar.input_changed(String::new());
        assert_eq!(bar.debounce_elapsed(t2), None);

        bar.results_loaded(old.generation, Ok(vec![anime("naruto")]));

        assert_eq!(bar.query(), "");
        assert!(bar.results().is_empty());
        assert!(!bar.dropdown_visible());
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut bar = SearchBar::default();
        let t1 = bar.input_changed("nar".into());
        let old = bar.debounce_elapsed(t1).unwrap();
        let t2 = bar.input_changed("naruto".into());
        let new = bar.debounce_elapsed(t2).unwrap();

        bar.results_loaded(new.generation, Ok(vec![anime("new")]));
        bar.results_loaded(old.generation, Ok(vec![anime("old")]));

        assert_eq!(bar.results().len(), 1);
        assert_eq!(bar.results()[0].id, "new");
    }

    #[test]
    fn test_error_degrades_to_empty() {
        let mut bar = loaded_bar(&["1", "2"]);
        let t = bar.input_changed("two".into());
        let req = bar.debounce_elapsed(t).unwrap();
        bar.results_loaded(req.generation, Err("connection refused".into()));
        assert!(bar.results().is_empty());
        assert!(!bar.dropdown_visible());
    }

    #[test]
    fn test_results_capped_to_dropdown_size() {
        let bar = loaded_bar(&["1", "2", "3", "4", "5", "6", "7"]);
        assert_eq!(bar.results().len(), DEFAULT_DROPDOWN_RESULTS as usize);
    }

    #[test]
    fn test_selection_clamps() {
        let mut bar = loaded_bar(&["1", "2", "3"]);
        bar.select_previous();
        assert_eq!(bar.selected(), None);
        bar.select_next();
        bar.select_next();
        bar.select_next();
        bar.select_next();
        assert_eq!(bar.selected(), Some(2));
        bar.select_previous();
        assert_eq!(bar.selected(), Some(1));
        bar.select_previous();
        bar.select_previous();
        assert_eq!(bar.selected(), None);
    }

    #[test]
    fn test_selection_noop_when_empty() {
        let mut bar = SearchBar::default();
        bar.select_next();
        assert_eq!(bar.selected(), None);
        bar.hover_select(0);
        assert_eq!(bar.selected(), None);
    }

    #[test]
    fn test_submit_selected_opens_watch() {
        let mut bar = loaded_bar(&["11", "12"]);
        bar.focus();
        bar.hover_select(1);
        assert_eq!(bar.submit(), Route::watch("12"));
        assert!(!bar.is_dropdown_open());
        assert!(!bar.is_focused());
    }

    #[test]
    fn test_submit_without_selection_searches() {
        let mut bar = SearchBar::default();
        let _ = bar.input_changed("one piece".into());
        assert_eq!(bar.submit(), Route::search("one piece"));

        let mut empty = SearchBar::default();
        assert_eq!(empty.submit(), Route::Search { query: None });
    }

    #[test]
    fn test_view_all_ignores_highlight() {
        let mut bar = loaded_bar(&["11", "12"]);
        bar.select_next();
        assert_eq!(bar.view_all(), Route::search("one"));
        assert_eq!(bar.selected(), None);
        assert!(!bar.is_dropdown_open());
    }

    #[test]
    fn test_submit_cancels_pending_debounce() {
        let mut bar = SearchBar::default();
        let t = bar.input_changed("bleach".into());
        let _ = bar.submit();
        assert_eq!(bar.debounce_elapsed(t), None);
        assert!(!bar.is_dropdown_open());
    }

    #[test]
    fn test_clear_keeps_focus() {
        let mut bar = loaded_bar(&["1"]);
        bar.focus();
        bar.clear();
        assert_eq!(bar.query(), "");
        assert!(bar.results().is_empty());
        assert!(!bar.is_dropdown_open());
        assert!(bar.is_focused());
        assert!(!bar.can_clear());
    }

    #[test]
    fn test_clear_drops_in_flight_response() {
        let mut bar = SearchBar::default();
        let t = bar.input_changed("gintama".into());
        let req = bar.debounce_elapsed(t).unwrap();
        bar.clear();
        bar.results_loaded(req.generation, Ok(vec![anime("1")]));
        assert!(bar.results().is_empty());
    }

    #[test]
    fn test_focus_escape_and_outside_click() {
        let mut bar = loaded_bar(&["1"]);
        bar.focus();
        assert!(bar.dropdown_visible());
        bar.close_dropdown();
        assert!(!bar.dropdown_visible());
        assert!(bar.is_focused());

        bar.focus();
        bar.escape();
        assert!(!bar.is_focused());
        assert!(!bar.is_dropdown_open());
    }

    #[test]
    fn test_compact_layout() {
        let mut bar = SearchBar::default();
        bar.set_viewport_width(1024.0);
        assert!(bar.is_input_shown());

        bar.set_viewport_width(420.0);
        assert!(bar.is_compact());
        assert!(!bar.is_input_shown());

        bar.toggle_input_visibility();
        assert!(bar.is_input_shown());

        bar.route_changed();
        assert!(!bar.is_input_shown());

        bar.set_viewport_width(800.0);
        assert!(bar.is_input_shown());
    }

    #[test]
    fn test_toggle_ignored_when_wide() {
        let mut bar = SearchBar::default();
        bar.set_viewport_width(900.0);
        bar.toggle_input_visibility();
        bar.set_viewport_width(400.0);
        assert!(!bar.is_input_shown());
    }

    #[test]
    fn test_sync_query() {
        let mut bar = SearchBar::default();
        bar.sync_query(Some("frieren"));
        assert_eq!(bar.query(), "frieren");
        bar.sync_query(None);
        assert_eq!(bar.query(), "");
    }
}
