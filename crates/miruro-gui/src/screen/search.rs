use iced::widget::{column, container, text};
use iced::{Element, Length, Task};

use miruro_api::traits::CatalogService;
use miruro_core::config::AppConfig;
use miruro_core::models::SearchPage;

use crate::app;
use crate::cover_cache::CoverCache;
use crate::screen::grid::{self, CardGrid, PageRequest};
use crate::screen::Action;
use crate::style;
use crate::theme::ColorScheme;
use crate::widgets;

/// Full search results for the query in the route.
pub struct Search {
    query: Option<String>,
    pub grid: CardGrid,
}

#[derive(Debug, Clone)]
pub enum Message {
    Grid(grid::Message),
    PageLoaded(PageRequest, Result<SearchPage, String>),
}

impl Search {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            query: None,
            grid: CardGrid::new(
                "search-grid",
                config.grid.page_size,
                config.grid.scroll_threshold,
            ),
        }
    }

    /// Show results for `query`. Returning to the same query keeps what
    /// is already loaded; a different one starts over from page 1.
    pub fn enter<C>(&mut self, query: Option<String>, client: Option<&C>) -> Action
    where
        C: CatalogService + Clone + 'static,
    {
        if query == self.query && (!self.grid.is_empty() || self.grid.is_loading()) {
            return Action::None;
        }
        self.query = query;
        self.grid.reset();

        let Some(query) = self.query.clone() else {
            return Action::None;
        };
        let Some(client) = client else {
            return Action::SetStatus("Catalog unavailable".into());
        };
        match self.grid.load_next() {
            Some(request) => fetch_results(client, query, request),
            None => Action::None,
        }
    }

    pub fn update<C>(&mut self, msg: Message, client: Option<&C>) -> Action
    where
        C: CatalogService + Clone + 'static,
    {
        match msg {
            Message::Grid(msg) => match self.grid.update(msg) {
                grid::Event::None => Action::None,
                grid::Event::Open(anime) => Action::Open(anime),
                grid::Event::LoadPage(request) => match (client, self.query.clone()) {
                    (Some(client), Some(query)) => fetch_results(client, query, request),
                    _ => {
                        self.grid.page_loaded(request, Err("catalog unavailable".into()));
                        Action::None
                    }
                },
            },
            Message::PageLoaded(request, result) => {
                let failed = result.is_err();
                let covers = self.grid.page_loaded(request, result);
                if failed {
                    Action::SetStatus("Search failed".into())
                } else {
                    Action::RequestCovers(covers)
                }
            }
        }
    }

    pub fn view<'a>(
        &'a self,
        cs: &'a ColorScheme,
        covers: &'a CoverCache,
        phase: f32,
    ) -> Element<'a, Message> {
        let Some(query) = &self.query else {
            return widgets::empty_state(
                cs,
                lucide_icons::iced::icon_search()
                    .size(style::TEXT_3XL)
                    .color(cs.outline)
                    .into(),
                "Search for an anime",
                "Press / to start typing.",
                None,
            );
        };

        let header = container(
            column![
                text(format!("Results for \u{201C}{query}\u{201D}"))
                    .size(style::TEXT_XL)
                    .font(style::FONT_HEADING)
                    .color(cs.on_surface)
                    .line_height(style::LINE_HEIGHT_TIGHT),
                text(if self.grid.is_empty() {
                    String::new()
                } else {
                    format!("{} shown", self.grid.len())
                })
                .size(style::TEXT_XS)
                .color(cs.outline),
            ]
            .spacing(style::SPACE_XXS),
        )
        .padding([style::SPACE_LG, style::SPACE_XL]);

        let grid = self
            .grid
            .view(
                cs,
                covers,
                phase,
                ("No results", "Try a different title or spelling."),
            )
            .map(Message::Grid);

        column![header, grid]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

fn fetch_results<C>(client: &C, query: String, request: PageRequest) -> Action
where
    C: CatalogService + Clone + 'static,
{
    let client = client.clone();
    Action::RunTask(Task::perform(
        async move {
            client
                .search(&query, request.page, request.per_page)
                .await
                .map_err(|e| e.to_string())
        },
        move |result| app::Message::Search(Message::PageLoaded(request, result)),
    ))
}
