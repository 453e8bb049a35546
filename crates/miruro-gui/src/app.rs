use iced::widget::{column, container, mouse_area, stack, text, Space};
use iced::window;
use iced::{Element, Length, Padding, Subscription, Task, Theme};

use miruro_api::ConsumetClient;
use miruro_core::card::watch_route;
use miruro_core::config::AppConfig;
use miruro_core::models::Anime;
use miruro_core::routes::Route;
use miruro_core::shortcuts::{KeyPress, Shortcut};
use miruro_core::theme_pref::{PreferenceStore, ThemeMode};

use crate::cover_cache::{self, CoverCache, CoverState};
use crate::keyboard::KeyEvent;
use crate::navbar::{self, Navbar};
use crate::screen::{home, preferences, search, watch, Action, CoverRequest};
use crate::style;
use crate::subscription;
use crate::theme::{self, MiruroTheme};
use crate::window_state::WindowState;

/// Application state: a router over the screens plus the navbar.
pub struct Miruro {
    route: Route,
    client: Option<ConsumetClient>,
    // Theme
    prefs: PreferenceStore,
    current_theme: MiruroTheme,
    active_mode: ThemeMode,
    // Chrome & screens
    navbar: Navbar,
    home: home::Home,
    search: search::Search,
    watch: watch::Watch,
    preferences: preferences::Preferences,
    // Cover images
    cover_cache: CoverCache,
    pulse: u32,
    status_message: String,
    // Window persistence
    window_state: WindowState,
}

impl Default for Miruro {
    fn default() -> Self {
        let config = AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!(path = %AppConfig::config_path().display(), "using default config: {e}");
            AppConfig::default()
        });
        // First launch: leave an editable copy of the defaults behind.
        if !AppConfig::config_path().exists() {
            if let Err(e) = config.save() {
                tracing::warn!(path = %AppConfig::config_path().display(), "failed to write config: {e}");
            }
        }
        let client = match ConsumetClient::new(&config.api.base_url, config.request_timeout()) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::error!(base_url = %config.api.base_url, "catalog client unavailable: {e}");
                None
            }
        };

        let prefs = PreferenceStore::default_location();
        let active_mode = prefs.initial_theme(theme::system_prefers_dark);
        let current_theme = MiruroTheme::default_theme();
        tracing::info!(theme = %current_theme.name, mode = %active_mode, "appearance resolved");

        let window_state = WindowState::load();
        let mut navbar = Navbar::new(&config);
        navbar.set_viewport_width(window_state.width);

        Self {
            route: Route::Home,
            client,
            prefs,
            current_theme,
            active_mode,
            navbar,
            home: home::Home::new(&config),
            search: search::Search::new(&config),
            watch: watch::Watch::new(),
            preferences: preferences::Preferences::new(&config),
            cover_cache: CoverCache::default(),
            pulse: 0,
            status_message: "Ready".into(),
            window_state,
        }
    }
}

/// All messages the application can handle.
#[derive(Debug, Clone)]
pub enum Message {
    CoverLoaded {
        anime_id: String,
        result: Result<std::path::PathBuf, String>,
    },
    Key(KeyEvent),
    WindowEvent(window::Event),
    /// A click no widget handled.
    PointerPressed,
    SkeletonTick,
    Navbar(navbar::Message),
    Home(home::Message),
    Search(search::Message),
    Watch(watch::Message),
    Preferences(preferences::Message),
}

impl Miruro {
    pub fn new() -> (Self, Task<Message>) {
        let mut app = Self::default();
        let task = app.navigate(Route::Home, None);
        (app, task)
    }

    pub fn title(&self) -> String {
        match &self.route {
            Route::Search { query: Some(query) } => format!("{query} - Miruro"),
            Route::Watch { .. } => match self.watch.anime() {
                Some(anime) => format!("{} - Miruro", anime.display_title()),
                None => String::from("Miruro"),
            },
            Route::Preferences => String::from("Preferences - Miruro"),
            _ => String::from("Miruro"),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CoverLoaded { anime_id, result } => {
                match result {
                    Ok(path) => {
                        self.cover_cache
                            .states
                            .insert(anime_id, CoverState::Loaded(path));
                    }
                    Err(e) => {
                        tracing::debug!(anime_id = %anime_id, "cover download failed: {e}");
                        self.cover_cache.states.insert(anime_id, CoverState::Failed);
                    }
                }
                self.sync_card_images();
                Task::none()
            }
            Message::Key(event) => self.handle_key(event),
            Message::WindowEvent(event) => {
                match event {
                    window::Event::Resized(size) => {
                        self.window_state.width = size.width;
                        self.window_state.height = size.height;
                        self.window_state.save();
                        self.navbar.set_viewport_width(size.width);
                    }
                    window::Event::Moved(pos) => {
                        self.window_state.x = pos.x;
                        self.window_state.y = pos.y;
                        self.window_state.save();
                    }
                    _ => {}
                }
                Task::none()
            }
            Message::PointerPressed => {
                self.navbar.blur();
                Task::none()
            }
            Message::SkeletonTick => {
                self.pulse = self.pulse.wrapping_add(1);
                Task::none()
            }
            Message::Navbar(msg) => match msg {
                navbar::Message::LogoPressed => {
                    let task = self.navigate(Route::Home, None);
                    let scroll = iced::widget::operation::snap_to(
                        self.home.grid.scroll_id(),
                        iced::widget::scrollable::RelativeOffset::START,
                    );
                    Task::batch([task, scroll])
                }
                navbar::Message::ThemeToggled => {
                    self.navbar.escape();
                    self.set_mode(self.active_mode.toggle());
                    Task::none()
                }
                navbar::Message::PreferencesPressed => self.navigate(Route::Preferences, None),
                msg => {
                    let action = self.navbar.update(msg, self.client.as_ref());
                    self.handle_action(action)
                }
            },
            Message::Home(msg) => {
                let action = self.home.update(msg, self.client.as_ref());
                self.handle_action(action)
            }
            Message::Search(msg) => {
                let action = self.search.update(msg, self.client.as_ref());
                self.handle_action(action)
            }
            Message::Watch(msg) => {
                let action = self.watch.update(msg);
                self.handle_action(action)
            }
            Message::Preferences(msg) => {
                if let preferences::Message::ModeChanged(mode) = msg {
                    self.set_mode(mode);
                    return Task::none();
                }
                let action = self.preferences.update(msg);
                self.handle_action(action)
            }
        }
    }

    /// Switch screens. `seed` is the record the user clicked, shown on the
    /// watch page until the full one arrives.
    fn navigate(&mut self, route: Route, seed: Option<Anime>) -> Task<Message> {
        tracing::debug!(%route, "navigate");
        self.navbar.route_changed(&route);
        self.route = route.clone();

        let action = match route {
            Route::Home => self.home.enter(self.client.as_ref()),
            Route::Search { query } => self.search.enter(query, self.client.as_ref()),
            Route::Watch { id } => self.watch.enter(id, seed, self.client.as_ref()),
            Route::Preferences => Action::None,
        };
        self.handle_action(action)
    }

    fn handle_key(&mut self, event: KeyEvent) -> Task<Message> {
        let press = KeyPress {
            key: event.key,
            shift: event.shift,
            input_focused: event.captured || self.navbar.is_focused(),
        };
        let Some(shortcut) = Shortcut::from_key(&press) else {
            return Task::none();
        };
        tracing::debug!(?shortcut, "shortcut");

        match shortcut {
            Shortcut::FocusSearch => self.navbar.focus_search(),
            Shortcut::Escape => {
                self.navbar.escape();
                Task::none()
            }
            Shortcut::ToggleTheme => {
                self.set_mode(self.active_mode.toggle());
                Task::none()
            }
            Shortcut::SelectPrevious => {
                self.navbar.select_previous();
                Task::none()
            }
            Shortcut::SelectNext => {
                self.navbar.select_next();
                Task::none()
            }
            Shortcut::Submit => {
                let action = self.navbar.submit();
                self.handle_action(action)
            }
        }
    }

    /// Apply and persist a theme mode. A failed write keeps the new mode
    /// for this session.
    fn set_mode(&mut self, mode: ThemeMode) {
        self.active_mode = mode;
        if let Err(e) = self.prefs.set_theme(mode) {
            tracing::warn!(path = %self.prefs.path().display(), "failed to save theme preference: {e}");
        }
    }

    /// Interpret an Action returned by a screen.
    fn handle_action(&mut self, action: Action) -> Task<Message> {
        match action {
            Action::None => Task::none(),
            Action::Navigate(route) => self.navigate(route, None),
            Action::Open(anime) => self.navigate(watch_route(&anime), Some(anime)),
            Action::RunTask(task) => task,
            Action::RequestCovers(items) => self.batch_request_covers(items),
            Action::SetStatus(msg) => {
                self.status_message = msg;
                Task::none()
            }
        }
    }

    fn batch_request_covers(&mut self, items: Vec<CoverRequest>) -> Task<Message> {
        let tasks: Vec<Task<Message>> = items
            .into_iter()
            .map(|(id, url)| self.request_cover(id, url.as_deref()))
            .collect();
        // Covers already settled in the cache end their cards' skeletons now.
        self.sync_card_images();
        if tasks.is_empty() {
            Task::none()
        } else {
            Task::batch(tasks)
        }
    }

    /// Request a cover image download for an anime if not already requested.
    fn request_cover(&mut self, anime_id: String, cover_url: Option<&str>) -> Task<Message> {
        let Some(url) = cover_url else {
            self.cover_cache
                .states
                .entry(anime_id)
                .or_insert(CoverState::Failed);
            return Task::none();
        };
        if self.cover_cache.states.contains_key(&anime_id) {
            return Task::none();
        }
        let path = cover_cache::cover_path(&anime_id);
        if path.exists() {
            self.cover_cache
                .states
                .insert(anime_id, CoverState::Loaded(path));
            return Task::none();
        }
        self.cover_cache
            .states
            .insert(anime_id.clone(), CoverState::Loading);
        let url = url.to_string();
        Task::perform(
            {
                let anime_id = anime_id.clone();
                async move { cover_cache::fetch_cover(anime_id, url).await }
            },
            move |result| Message::CoverLoaded {
                anime_id: anime_id.clone(),
                result,
            },
        )
    }

    fn sync_card_images(&mut self) {
        self.home.grid.apply_covers(&self.cover_cache);
        self.search.grid.apply_covers(&self.cover_cache);
    }

    /// Skeleton pulse in `0.0..=1.0`.
    fn phase(&self) -> f32 {
        ((self.pulse as f32 * 0.15).sin() + 1.0) / 2.0
    }

    fn is_animating(&self) -> bool {
        self.cover_cache.any_loading()
            || self.home.grid.is_loading()
            || self.search.grid.is_loading()
            || self.watch.is_loading()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let cs = self.current_theme.colors(self.active_mode);
        let phase = self.phase();

        let page: Element<'_, Message> = match &self.route {
            Route::Home => self
                .home
                .view(cs, &self.cover_cache, phase)
                .map(Message::Home),
            Route::Search { .. } => self
                .search
                .view(cs, &self.cover_cache, phase)
                .map(Message::Search),
            Route::Watch { .. } => self
                .watch
                .view(cs, &self.cover_cache, phase)
                .map(Message::Watch),
            Route::Preferences => self
                .preferences
                .view(cs, self.active_mode)
                .map(Message::Preferences),
        };

        let status_bar = container(
            text(&self.status_message)
                .size(style::TEXT_XS)
                .line_height(style::LINE_HEIGHT_LOOSE),
        )
        .style(theme::status_bar(cs))
        .width(Length::Fill)
        .height(Length::Fixed(style::STATUS_BAR_HEIGHT))
        .padding([4.0, style::SPACE_MD]);

        let main: Element<'_, Message> = column![
            self.navbar.view(cs, self.active_mode).map(Message::Navbar),
            container(page).width(Length::Fill).height(Length::Fill),
            status_bar,
        ]
        .into();

        let Some(dropdown) = self.navbar.dropdown(cs, &self.cover_cache, phase) else {
            return main;
        };

        let offset = self.navbar.dropdown_offset();

        // Clicks below the navbar land here. Blank navbar space closes the
        // list through `PointerPressed`.
        let backdrop = container(
            mouse_area(Space::new().width(Length::Fill).height(Length::Fill))
                .on_press(Message::Navbar(navbar::Message::Dismiss)),
        )
        .padding(Padding::new(0.0).top(offset))
        .width(Length::Fill)
        .height(Length::Fill);

        let positioned = container(dropdown.map(Message::Navbar))
            .padding(Padding::new(0.0).top(offset + style::SPACE_XS))
            .center_x(Length::Fill);

        stack![main, backdrop, positioned].into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        subscription::subscriptions(self.is_animating())
    }

    pub fn theme(&self) -> Theme {
        self.current_theme.iced_theme(self.active_mode)
    }
}
