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

/// Trending anime, loaded page by page as the user scrolls.
pub struct Home {
    pub grid: CardGrid,
}

#[derive(Debug, Clone)]
pub enum Message {
    Grid(grid::Message),
    PageLoaded(PageRequest, Result<SearchPage, String>),
}

impl Home {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            grid: CardGrid::new(
                "home-grid",
                config.grid.page_size,
                config.grid.scroll_threshold,
            ),
        }
    }

    /// Called when the home route becomes active. Only the first visit
    /// fetches; coming back keeps the cards and scroll position.
    pub fn enter<C>(&mut self, client: Option<&C>) -> Action
    where
        C: CatalogService + Clone + 'static,
    {
        let Some(client) = client else {
            return Action::SetStatus("Catalog unavailable".into());
        };
        if !self.grid.is_empty() {
            return Action::None;
        }
        match self.grid.load_next() {
            Some(request) => fetch_trending(client, request),
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
                grid::Event::LoadPage(request) => match client {
                    Some(client) => fetch_trending(client, request),
                    None => {
                        self.grid.page_loaded(request, Err("catalog unavailable".into()));
                        Action::None
                    }
                },
            },
            Message::PageLoaded(request, result) => {
                let failed = result.is_err();
                let covers = self.grid.page_loaded(request, result);
                if failed {
                    Action::SetStatus("Couldn't load trending anime".into())
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
        let header = container(
            text("Trending now")
                .size(style::TEXT_XL)
                .font(style::FONT_HEADING)
                .color(cs.on_surface)
                .line_height(style::LINE_HEIGHT_TIGHT),
        )
        .padding([style::SPACE_LG, style::SPACE_XL]);

        let grid = self
            .grid
            .view(
                cs,
                covers,
                phase,
                ("Nothing trending right now", "Check back in a little while."),
            )
            .map(Message::Grid);

        column![header, grid]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

fn fetch_trending<C>(client: &C, request: PageRequest) -> Action
where
    C: CatalogService + Clone + 'static,
{
    let client = client.clone();
    Action::RunTask(Task::perform(
        async move {
            client
                .trending(request.page, request.per_page)
                .await
                .map_err(|e| e.to_string())
        },
        move |result| app::Message::Home(Message::PageLoaded(request, result)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use miruro_api::ConsumetClient;

    #[test]
    fn test_without_client_reports_status() {
        let mut home = Home::new(&AppConfig::default());
        let action = home.enter::<ConsumetClient>(None);
        assert!(matches!(action, Action::SetStatus(_)));
        assert!(home.grid.is_empty());
    }

    #[test]
    fn test_first_visit_fetches_then_keeps_cards() {
        let client = ConsumetClient::new("http://127.0.0.1:9", std::time::Duration::from_secs(1))
            .unwrap();
        let mut home = Home::new(&AppConfig::default());
        assert!(matches!(home.enter(Some(&client)), Action::RunTask(_)));
        assert!(home.grid.is_loading());
        // A second enter while the first page is in flight does nothing.
        assert!(matches!(home.enter(Some(&client)), Action::None));
    }
}
