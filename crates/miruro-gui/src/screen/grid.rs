//! Infinite-scroll card grid shared by the home and search screens.

use std::collections::{HashMap, HashSet};

use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length};

use miruro_core::card::{CardState, CardView};
use miruro_core::models::{Anime, SearchPage};
use miruro_core::pagination::{ScrollMetrics, ScrollPager};

use crate::cover_cache::{CoverCache, CoverState};
use crate::screen::CoverRequest;
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets::{self, anime_card};

/// Placeholder cards drawn while the first page is loading.
const SKELETON_CARDS: usize = 12;

/// A page fetch the owning screen should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
    /// Echoed back to [`CardGrid::page_loaded`].
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub enum Message {
    Scrolled(ScrollMetrics),
    HoverEnter(String),
    HoverExit(String),
    Open(String),
    Retry,
}

/// What the owning screen has to do after an update.
#[derive(Debug)]
pub enum Event {
    None,
    LoadPage(PageRequest),
    Open(Anime),
}

pub struct CardGrid {
    entries: Vec<Anime>,
    views: Vec<CardView>,
    cards: HashMap<String, CardState>,
    pager: ScrollPager,
    page_size: u32,
    generation: u64,
    error: Option<String>,
    scroll_id: iced::widget::Id,
}

impl CardGrid {
    pub fn new(scroll_id: &'static str, page_size: u32, scroll_threshold: f32) -> Self {
        Self {
            entries: Vec::new(),
            views: Vec::new(),
            cards: HashMap::new(),
            pager: ScrollPager::new(scroll_threshold),
            page_size: page_size.max(1),
            generation: 0,
            error: None,
            scroll_id: iced::widget::Id::new(scroll_id),
        }
    }

    pub fn scroll_id(&self) -> iced::widget::Id {
        self.scroll_id.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.pager.is_loading()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drop every card. Responses to requests made before this are ignored.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.views.clear();
        self.cards.clear();
        self.pager.reset();
        self.error = None;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Request the next page unless one is in flight or none remain.
    pub fn load_next(&mut self) -> Option<PageRequest> {
        self.pager.start().map(|page| self.request(page))
    }

    fn request(&self, page: u32) -> PageRequest {
        PageRequest {
            page,
            per_page: self.page_size,
            generation: self.generation,
        }
    }

    /// Append a fetched page. Returns the covers the new cards need.
    pub fn page_loaded(
        &mut self,
        request: PageRequest,
        result: Result<SearchPage, String>,
    ) -> Vec<CoverRequest> {
        if request.generation != self.generation {
            tracing::debug!(page = request.page, "dropping page for a reset grid");
            return Vec::new();
        }

        match result {
            Ok(page) => {
                self.pager.page_loaded(request.page, page.has_next_page);
                self.error = None;

                let mut seen: HashSet<String> =
                    self.entries.iter().map(|a| a.id.clone()).collect();
                let mut covers = Vec::new();
                for anime in page.results {
                    if !seen.insert(anime.id.clone()) {
                        continue;
                    }
                    let view = CardView::from_anime(&anime);
                    covers.push((view.id.clone(), view.cover_url.clone()));
                    self.cards.insert(view.id.clone(), CardState::default());
                    self.views.push(view);
                    self.entries.push(anime);
                }
                tracing::debug!(
                    page = request.page,
                    added = covers.len(),
                    total = self.entries.len(),
                    "grid page loaded"
                );
                covers
            }
            Err(e) => {
                tracing::warn!(page = request.page, error = %e, "failed to load grid page");
                self.pager.page_failed();
                self.error = Some(e);
                Vec::new()
            }
        }
    }

    /// End the skeleton of every card whose cover has settled.
    pub fn apply_covers(&mut self, covers: &CoverCache) {
        for (id, card) in self.cards.iter_mut() {
            match covers.get(id) {
                Some(CoverState::Loaded(_)) => card.image_loaded(),
                Some(CoverState::Failed) => card.image_failed(),
                _ => {}
            }
        }
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Scrolled(metrics) => match self.pager.on_scroll(metrics) {
                Some(page) => Event::LoadPage(self.request(page)),
                None => Event::None,
            },
            Message::HoverEnter(id) => {
                if let Some(card) = self.cards.get_mut(&id) {
                    card.hover_enter();
                }
                Event::None
            }
            Message::HoverExit(id) => {
                if let Some(card) = self.cards.get_mut(&id) {
                    card.hover_exit();
                }
                Event::None
            }
            Message::Open(id) => match self.entries.iter().find(|a| a.id == id) {
                Some(anime) => Event::Open(anime.clone()),
                None => Event::None,
            },
            Message::Retry => match self.load_next() {
                Some(request) => Event::LoadPage(request),
                None => Event::None,
            },
        }
    }

    // ── View ──────────────────────────────────────────────────────

    /// `empty` is the headline and hint shown when a finished load had no
    /// results.
    pub fn view<'a>(
        &'a self,
        cs: &'a ColorScheme,
        covers: &'a CoverCache,
        phase: f32,
        empty: (&'a str, &'a str),
    ) -> Element<'a, Message> {
        if self.entries.is_empty() {
            return self.view_empty(cs, phase, empty);
        }

        let cards: Vec<Element<'a, Message>> = self
            .views
            .iter()
            .map(|view| {
                let state = self.cards.get(&view.id).copied().unwrap_or_default();
                anime_card(
                    cs,
                    view,
                    state,
                    covers,
                    phase,
                    anime_card::CardEvents {
                        on_enter: Message::HoverEnter(view.id.clone()),
                        on_exit: Message::HoverExit(view.id.clone()),
                        on_press: Message::Open(view.id.clone()),
                    },
                )
            })
            .collect();

        let wrap = iced_aw::Wrap::with_elements(cards)
            .spacing(style::SPACE_SM)
            .line_spacing(style::SPACE_SM);

        let content = column![wrap, self.footer(cs)]
            .spacing(style::SPACE_LG)
            .width(Length::Fill);

        widgets::styled_scrollable(
            container(content).padding([style::SPACE_LG, style::SPACE_LG]),
            cs,
        )
        .id(self.scroll_id.clone())
        .on_scroll(|viewport| {
            Message::Scrolled(ScrollMetrics {
                offset_y: viewport.absolute_offset().y,
                viewport_height: viewport.bounds().height,
                content_height: viewport.content_bounds().height,
            })
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn view_empty<'a>(
        &'a self,
        cs: &'a ColorScheme,
        phase: f32,
        (headline, hint): (&'a str, &'a str),
    ) -> Element<'a, Message> {
        if self.pager.is_loading() {
            let placeholders: Vec<Element<'a, Message>> = (0..SKELETON_CARDS)
                .map(|_| {
                    container(widgets::skeleton(
                        cs,
                        Length::Fixed(style::COVER_WIDTH),
                        style::COVER_HEIGHT,
                        style::RADIUS_MD,
                        phase,
                    ))
                    .padding(style::SPACE_SM)
                    .into()
                })
                .collect();
            let wrap = iced_aw::Wrap::with_elements(placeholders)
                .spacing(style::SPACE_SM)
                .line_spacing(style::SPACE_SM);
            return container(wrap)
                .padding([style::SPACE_LG, style::SPACE_LG])
                .width(Length::Fill)
                .height(Length::Fill)
                .into();
        }

        if let Some(error) = &self.error {
            return widgets::empty_state(
                cs,
                lucide_icons::iced::icon_wifi_off()
                    .size(style::TEXT_3XL)
                    .color(cs.outline)
                    .into(),
                "Couldn't load anime",
                error.as_str(),
                Some(("Try again", Message::Retry)),
            );
        }

        widgets::empty_state(
            cs,
            lucide_icons::iced::icon_search_x()
                .size(style::TEXT_3XL)
                .color(cs.outline)
                .into(),
            headline,
            hint,
            None,
        )
    }

    fn footer<'a>(&'a self, cs: &'a ColorScheme) -> Element<'a, Message> {
        let line: Element<'a, Message> = if self.pager.is_loading() {
            text("Loading more...")
                .size(style::TEXT_SM)
                .color(cs.on_surface_variant)
                .into()
        } else if let Some(error) = &self.error {
            row![
                text(format!("Couldn't load more: {error}"))
                    .size(style::TEXT_SM)
                    .color(cs.error),
                button(text("Retry").size(style::TEXT_SM))
                    .on_press(Message::Retry)
                    .padding([style::SPACE_XXS, style::SPACE_MD])
                    .style(theme::secondary_button(cs)),
            ]
            .spacing(style::SPACE_SM)
            .align_y(Alignment::Center)
            .into()
        } else if !self.pager.has_next_page() {
            text(format!("{} titles", self.entries.len()))
                .size(style::TEXT_XS)
                .color(cs.outline)
                .into()
        } else {
            text("").size(style::TEXT_XS).into()
        };

        container(line)
            .center_x(Length::Fill)
            .padding(style::SPACE_SM)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miruro_core::models::AnimeTitle;

    fn anime(id: &str) -> Anime {
        Anime {
            id: id.into(),
            title: AnimeTitle {
                english: Some(format!("Show {id}")),
                ..Default::default()
            },
            image: Some(format!("https://img.example/{id}.jpg")),
            ..Default::default()
        }
    }

    fn page(ids: &[&str], has_next_page: bool) -> SearchPage {
        SearchPage {
            current_page: 1,
            has_next_page,
            results: ids.iter().map(|id| anime(id)).collect(),
            ..Default::default()
        }
    }

    fn near_bottom() -> ScrollMetrics {
        ScrollMetrics {
            offset_y: 1500.0,
            viewport_height: 800.0,
            content_height: 2400.0,
        }
    }

    #[test]
    fn test_first_page_then_scroll_for_second() {
        let mut grid = CardGrid::new("test", 24, 1000.0);
        let first = grid.load_next().unwrap();
        assert_eq!(first.page, 1);
        assert_eq!(first.per_page, 24);
        assert!(grid.load_next().is_none(), "in-flight guard");

        let covers = grid.page_loaded(first, Ok(page(&["1", "2"], true)));
        assert_eq!(covers.len(), 2);
        assert_eq!(grid.len(), 2);

        match grid.update(Message::Scrolled(near_bottom())) {
            Event::LoadPage(req) => assert_eq!(req.page, 2),
            other => panic!("expected LoadPage, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicates_across_pages_are_skipped() {
        let mut grid = CardGrid::new("test", 2, 1000.0);
        let first = grid.load_next().unwrap();
        grid.page_loaded(first, Ok(page(&["1", "2"], true)));
        let second = match grid.update(Message::Scrolled(near_bottom())) {
            Event::LoadPage(req) => req,
            other => panic!("expected LoadPage, got {other:?}"),
        };
        let covers = grid.page_loaded(second, Ok(page(&["2", "3"], false)));
        assert_eq!(covers, vec![("3".to_string(), Some("https://img.example/3.jpg".to_string()))]);
        assert_eq!(grid.len(), 3);
        assert!(matches!(grid.update(Message::Scrolled(near_bottom())), Event::None));
    }

    #[test]
    fn test_reset_drops_late_pages() {
        let mut grid = CardGrid::new("test", 24, 1000.0);
        let stale = grid.load_next().unwrap();
        grid.reset();
        let fresh = grid.load_next().unwrap();

        assert!(grid.page_loaded(stale, Ok(page(&["old"], true))).is_empty());
        assert!(grid.is_empty());
        grid.page_loaded(fresh, Ok(page(&["new"], false)));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_failure_keeps_cards_and_allows_retry() {
        let mut grid = CardGrid::new("test", 24, 1000.0);
        let first = grid.load_next().unwrap();
        grid.page_loaded(first, Ok(page(&["1"], true)));
        let second = grid.load_next().unwrap();
        grid.page_loaded(second, Err("timeout".into()));

        assert_eq!(grid.len(), 1);
        assert!(!grid.is_loading());
        match grid.update(Message::Retry) {
            Event::LoadPage(req) => assert_eq!(req.page, 2),
            other => panic!("expected LoadPage, got {other:?}"),
        }
    }

    #[test]
    fn test_covers_end_skeletons_and_hover_toggles() {
        let mut grid = CardGrid::new("test", 24, 1000.0);
        let first = grid.load_next().unwrap();
        grid.page_loaded(first, Ok(page(&["1", "2"], false)));

        let mut covers = CoverCache::default();
        covers
            .states
            .insert("1".into(), CoverState::Loaded("1.jpg".into()));
        covers.states.insert("2".into(), CoverState::Loading);
        grid.apply_covers(&covers);

        assert!(!grid.cards["1"].is_loading());
        assert!(grid.cards["2"].is_loading());

        grid.update(Message::HoverEnter("1".into()));
        assert!(grid.cards["1"].show_detail());
        grid.update(Message::HoverExit("1".into()));
        assert!(!grid.cards["1"].is_hovered());
    }

    #[test]
    fn test_open_returns_the_record() {
        let mut grid = CardGrid::new("test", 24, 1000.0);
        let first = grid.load_next().unwrap();
        grid.page_loaded(first, Ok(page(&["7"], false)));
        match grid.update(Message::Open("7".into())) {
            Event::Open(anime) => assert_eq!(anime.id, "7"),
            other => panic!("expected Open, got {other:?}"),
        }
        assert!(matches!(grid.update(Message::Open("missing".into())), Event::None));
    }
}
