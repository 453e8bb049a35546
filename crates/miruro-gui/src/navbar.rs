//! Top bar: logo, search box with its suggestion dropdown, theme toggle.

use iced::widget::{button, column, container, row, stack, text, text_input, tooltip, Space};
use iced::{Alignment, Element, Length, Task};

use miruro_api::traits::CatalogService;
use miruro_core::config::AppConfig;
use miruro_core::debounce::Ticket;
use miruro_core::models::Anime;
use miruro_core::routes::Route;
use miruro_core::search_bar::SearchBar;
use miruro_core::theme_pref::ThemeMode;

use crate::app;
use crate::cover_cache::CoverCache;
use crate::screen::Action;
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets;

/// Height of the search row shown under the bar in compact mode.
const COMPACT_ROW_HEIGHT: f32 = 48.0;

pub struct Navbar {
    search: SearchBar,
    input_id: iced::widget::Id,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Handled by the app: go home and scroll to the top.
    LogoPressed,
    /// Handled by the app, which owns the preference store.
    ThemeToggled,
    /// Handled by the app.
    PreferencesPressed,
    InputChanged(String),
    DebounceElapsed(Ticket),
    ResultsLoaded {
        generation: u64,
        result: Result<Vec<Anime>, String>,
    },
    Clear,
    ToggleSearch,
    Select(usize),
    Hover(usize),
    ViewAll,
    Dismiss,
}

impl Navbar {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            search: SearchBar::new(
                config.debounce(),
                config.search.dropdown_results,
                config.appearance.compact_width,
            ),
            input_id: iced::widget::Id::new("navbar-search"),
        }
    }

    pub fn is_focused(&self) -> bool {
        self.search.is_focused()
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.search.set_viewport_width(width);
    }

    /// `/`: put the cursor in the search box.
    pub fn focus_search(&mut self) -> Task<app::Message> {
        self.search.focus();
        iced::widget::operation::focus(self.input_id.clone())
    }

    pub fn escape(&mut self) {
        self.search.escape();
    }

    /// A click landed somewhere other than the search input.
    pub fn blur(&mut self) {
        self.search.close_dropdown();
        self.search.blur();
    }

    pub fn select_next(&mut self) {
        self.search.select_next();
    }

    pub fn select_previous(&mut self) {
        self.search.select_previous();
    }

    /// Enter in the search box.
    pub fn submit(&mut self) -> Action {
        let seed = self
            .search
            .selected()
            .and_then(|i| self.search.results().get(i))
            .cloned();
        let route = self.search.submit();
        match seed {
            Some(anime) => Action::Open(anime),
            None => Action::Navigate(route),
        }
    }

    /// Mirror the new route into the box and put the box away.
    pub fn route_changed(&mut self, route: &Route) {
        self.search.route_changed();
        self.search.sync_query(route.query());
        self.search.escape();
    }

    pub fn update<C>(&mut self, msg: Message, client: Option<&C>) -> Action
    where
        C: CatalogService + Clone + 'static,
    {
        match msg {
            // Routed by the app before reaching here.
            Message::LogoPressed | Message::ThemeToggled | Message::PreferencesPressed => {
                Action::None
            }
            Message::InputChanged(value) => {
                self.search.focus();
                let ticket = self.search.input_changed(value);
                let window = self.search.debounce_window();
                Action::RunTask(Task::perform(
                    async move {
                        tokio::time::sleep(window).await;
                        ticket
                    },
                    |ticket| app::Message::Navbar(Message::DebounceElapsed(ticket)),
                ))
            }
            Message::DebounceElapsed(ticket) => {
                let Some(request) = self.search.debounce_elapsed(ticket) else {
                    return Action::None;
                };
                let generation = request.generation;
                let Some(client) = client else {
                    self.search
                        .results_loaded(generation, Err("catalog unavailable".into()));
                    return Action::None;
                };
                let client = client.clone();
                tracing::debug!(query = %request.query, generation, "fetching suggestions");
                Action::RunTask(Task::perform(
                    async move {
                        client
                            .search(&request.query, request.page, request.per_page)
                            .await
                            .map(|page| page.results)
                            .map_err(|e| e.to_string())
                    },
                    move |result| {
                        app::Message::Navbar(Message::ResultsLoaded { generation, result })
                    },
                ))
            }
            Message::ResultsLoaded { generation, result } => {
                self.search.results_loaded(generation, result);
                Action::RequestCovers(
                    self.search
                        .results()
                        .iter()
                        .map(|a| (a.id.clone(), a.cover_url().map(str::to_string)))
                        .collect(),
                )
            }
            Message::Clear => {
                self.search.clear();
                Action::RunTask(iced::widget::operation::focus(self.input_id.clone()))
            }
            Message::ToggleSearch => {
                self.search.toggle_input_visibility();
                if self.search.is_input_shown() {
                    Action::RunTask(self.focus_search())
                } else {
                    self.search.escape();
                    Action::None
                }
            }
            Message::Select(index) => {
                self.search.hover_select(index);
                self.submit()
            }
            Message::Hover(index) => {
                self.search.hover_select(index);
                Action::None
            }
            Message::ViewAll => Action::Navigate(self.search.view_all()),
            Message::Dismiss => {
                self.blur();
                Action::None
            }
        }
    }

    // ── View ──────────────────────────────────────────────────────

    pub fn view<'a>(&'a self, cs: &ColorScheme, mode: ThemeMode) -> Element<'a, Message> {
        use lucide_icons::iced as icons;

        let logo = button(
            row![
                icons::icon_clapperboard()
                    .size(style::TEXT_XL)
                    .color(cs.primary),
                text("Miruro")
                    .size(style::TEXT_LG)
                    .font(style::FONT_HEADING),
            ]
            .spacing(style::SPACE_XS)
            .align_y(Alignment::Center),
        )
        .on_press(Message::LogoPressed)
        .padding([style::SPACE_XS, style::SPACE_SM])
        .style(theme::logo_button(cs));

        let (theme_icon, theme_tip) = if mode.is_dark() {
            (icons::icon_sun(), "Light mode (Shift+D)")
        } else {
            (icons::icon_moon(), "Dark mode (Shift+D)")
        };
        let theme_toggle = tooltip(
            button(theme_icon.size(style::NAV_ICON_SIZE))
                .on_press(Message::ThemeToggled)
                .padding(style::SPACE_SM)
                .style(theme::icon_button(cs)),
            container(text(theme_tip).size(style::TEXT_XS))
                .padding([style::SPACE_XS, style::SPACE_SM])
                .style(theme::tooltip_bubble(cs)),
            tooltip::Position::Bottom,
        );

        let preferences = button(icons::icon_settings().size(style::NAV_ICON_SIZE))
            .on_press(Message::PreferencesPressed)
            .padding(style::SPACE_SM)
            .style(theme::icon_button(cs));

        let mut sides = row![logo, Space::new().width(Length::Fill)]
            .spacing(style::SPACE_SM)
            .align_y(Alignment::Center);
        if self.search.is_compact() {
            let icon = if self.search.is_input_shown() {
                icons::icon_x()
            } else {
                icons::icon_search()
            };
            sides = sides.push(
                button(icon.size(style::NAV_ICON_SIZE))
                    .on_press(Message::ToggleSearch)
                    .padding(style::SPACE_SM)
                    .style(theme::icon_button(cs)),
            );
        }
        sides = sides.push(preferences).push(theme_toggle);

        let sides = container(sides)
            .padding([0.0, style::SPACE_LG])
            .center_y(Length::Fixed(style::NAVBAR_HEIGHT))
            .width(Length::Fill);

        let bar: Element<'a, Message> = if self.search.is_compact() {
            sides.into()
        } else {
            stack![
                sides,
                container(self.search_box(cs, Length::Fixed(style::SEARCH_WIDTH)))
                    .center_x(Length::Fill)
                    .center_y(Length::Fixed(style::NAVBAR_HEIGHT)),
            ]
            .into()
        };

        let mut content = column![container(bar).style(theme::navbar_bg(cs)).width(Length::Fill)];
        if self.search.is_compact() && self.search.is_input_shown() {
            content = content.push(
                container(self.search_box(cs, Length::Fill))
                    .padding([0.0, style::SPACE_LG])
                    .center_y(Length::Fixed(COMPACT_ROW_HEIGHT))
                    .width(Length::Fill)
                    .style(theme::navbar_bg(cs)),
            );
        }
        content.into()
    }

    fn search_box<'a>(&'a self, cs: &ColorScheme, width: Length) -> Element<'a, Message> {
        let input = text_input("Search anime", self.search.query())
            .id(self.input_id.clone())
            .on_input(Message::InputChanged)
            .size(style::TEXT_SM)
            .padding([style::SPACE_XS, style::SPACE_XS])
            .width(Length::Fill)
            .style(theme::search_input(cs));

        let mut inner = row![
            lucide_icons::iced::icon_search()
                .size(style::TEXT_BASE)
                .color(cs.on_surface_variant),
            input,
        ]
        .spacing(style::SPACE_XS)
        .align_y(Alignment::Center);

        if self.search.can_clear() {
            inner = inner.push(
                button(lucide_icons::iced::icon_x().size(style::TEXT_SM))
                    .on_press(Message::Clear)
                    .padding(style::SPACE_XXS)
                    .style(theme::icon_button(cs)),
            );
        } else if !self.search.is_focused() {
            inner = inner.push(
                container(text("/").size(style::TEXT_XS).color(cs.outline))
                    .padding([0.0, style::SPACE_XS])
                    .style(theme::metadata_badge(cs)),
            );
        }

        container(inner)
            .padding([style::SPACE_XXS, style::SPACE_MD])
            .width(width)
            .style(theme::search_bar(cs, self.search.is_focused()))
            .into()
    }

    /// The suggestion list, when there is one to show.
    pub fn dropdown<'a>(
        &'a self,
        cs: &ColorScheme,
        covers: &'a CoverCache,
        phase: f32,
    ) -> Option<Element<'a, Message>> {
        if !self.search.dropdown_visible() {
            return None;
        }
        Some(widgets::search_dropdown(
            cs,
            self.search.results(),
            self.search.selected(),
            covers,
            phase,
            Message::Select,
            Message::Hover,
            Message::ViewAll,
        ))
    }

    /// Distance from the top of the window to the bottom of the search box.
    pub fn dropdown_offset(&self) -> f32 {
        if self.search.is_compact() {
            style::NAVBAR_HEIGHT + COMPACT_ROW_HEIGHT
        } else {
            style::NAVBAR_HEIGHT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miruro_api::ConsumetClient;
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

    fn navbar() -> Navbar {
        let config = AppConfig::from_toml_over_defaults("").unwrap();
        Navbar::new(&config)
    }

    /// Type `query`, let the debounce pass and deliver `ids` as results.
    fn with_results(nav: &mut Navbar, query: &str, ids: &[&str]) {
        let ticket = nav.search.input_changed(query.into());
        let request = nav.search.debounce_elapsed(ticket).unwrap();
        let action = nav.update::<ConsumetClient>(
            Message::ResultsLoaded {
                generation: request.generation,
                result: Ok(ids.iter().map(|id| anime(id)).collect()),
            },
            None,
        );
        match action {
            Action::RequestCovers(covers) => assert_eq!(covers.len(), ids.len()),
            _ => panic!("expected cover requests for the suggestions"),
        }
    }

    #[test]
    fn test_select_opens_clicked_result() {
        let mut nav = navbar();
        with_results(&mut nav, "frieren", &["1", "2"]);

        match nav.update::<ConsumetClient>(Message::Select(1), None) {
            Action::Open(anime) => assert_eq!(anime.id, "2"),
            _ => panic!("expected Open"),
        }
        assert!(!nav.is_focused());
    }

    #[test]
    fn test_view_all_searches_typed_text() {
        let mut nav = navbar();
        with_results(&mut nav, "frieren", &["1"]);
        nav.select_next();

        match nav.update::<ConsumetClient>(Message::ViewAll, None) {
            Action::Navigate(route) => assert_eq!(route, Route::search("frieren")),
            _ => panic!("expected Navigate"),
        }
    }

    #[test]
    fn test_submit_without_highlight_navigates_to_search() {
        let mut nav = navbar();
        with_results(&mut nav, "bocchi", &["1"]);
        match nav.submit() {
            Action::Navigate(route) => assert_eq!(route, Route::search("bocchi")),
            _ => panic!("expected Navigate"),
        }
    }

    #[test]
    fn test_dismiss_hides_dropdown() {
        let mut nav = navbar();
        with_results(&mut nav, "mob", &["1"]);
        assert!(nav.search.dropdown_visible());
        nav.update::<ConsumetClient>(Message::Dismiss, None);
        assert!(!nav.search.dropdown_visible());
        assert!(!nav.is_focused());
    }

    #[test]
    fn test_click_elsewhere_releases_shortcuts() {
        use miruro_core::shortcuts::{Key, KeyPress, Shortcut};

        let mut nav = navbar();
        // A query with no hits draws no dropdown, so no backdrop to click.
        nav.search.focus();
        with_results(&mut nav, "zzzz", &[]);
        assert!(nav.is_focused());
        assert!(!nav.search.dropdown_visible());

        nav.blur();
        let press = KeyPress {
            key: Key::Char('D'),
            shift: true,
            input_focused: nav.is_focused(),
        };
        assert_eq!(Shortcut::from_key(&press), Some(Shortcut::ToggleTheme));
    }

    #[test]
    fn test_click_on_navbar_chrome_closes_dropdown() {
        let mut nav = navbar();
        nav.search.focus();
        with_results(&mut nav, "mob", &["1", "2"]);
        assert!(nav.search.dropdown_visible());

        // Theme button.
        nav.escape();
        assert!(!nav.search.dropdown_visible());

        with_results(&mut nav, "mob psycho", &["1"]);
        nav.search.focus();
        assert!(nav.search.dropdown_visible());
        // Blank navbar space.
        nav.blur();
        assert!(!nav.search.dropdown_visible());
        assert_eq!(nav.search.query(), "mob psycho");
    }

    #[test]
    fn test_route_change_mirrors_query() {
        let mut nav = navbar();
        nav.route_changed(&Route::search("one piece"));
        assert_eq!(nav.search.query(), "one piece");
        nav.route_changed(&Route::Home);
        assert_eq!(nav.search.query(), "");
    }

    #[test]
    fn test_compact_offset() {
        let mut nav = navbar();
        nav.set_viewport_width(1200.0);
        assert_eq!(nav.dropdown_offset(), style::NAVBAR_HEIGHT);
        nav.set_viewport_width(400.0);
        assert!(nav.dropdown_offset() > style::NAVBAR_HEIGHT);
    }
}
