use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Element, Length, Task};

use miruro_api::traits::CatalogService;
use miruro_core::card::CardView;
use miruro_core::models::Anime;
use miruro_core::routes::Route;

use crate::app;
use crate::cover_cache::CoverCache;
use crate::screen::Action;
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets;

const ANILIST_ANIME_URL: &str = "https://anilist.co/anime";

/// Detail page for one anime.
///
/// Opens with whatever record the user clicked and replaces it with the
/// full `info` response once that arrives.
#[derive(Default)]
pub struct Watch {
    id: Option<String>,
    anime: Option<Anime>,
    loading: bool,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Loaded(String, Result<Anime, String>),
    OpenExternal,
    Back,
}

impl Watch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anime(&self) -> Option<&Anime> {
        self.anime.as_ref()
    }

    pub fn enter<C>(&mut self, id: String, seed: Option<Anime>, client: Option<&C>) -> Action
    where
        C: CatalogService + Clone + 'static,
    {
        if self.id.as_deref() == Some(id.as_str()) && (self.loading || self.anime.is_some()) {
            return Action::None;
        }

        self.anime = seed.filter(|a| a.id == id);
        self.id = Some(id.clone());
        self.error = None;

        let Some(client) = client else {
            self.loading = false;
            self.error = Some("catalog unavailable".into());
            return Action::SetStatus("Catalog unavailable".into());
        };

        self.loading = true;
        let client = client.clone();
        Action::RunTask(Task::perform(
            {
                let id = id.clone();
                async move { client.info(&id).await.map_err(|e| e.to_string()) }
            },
            move |result| app::Message::Watch(Message::Loaded(id.clone(), result)),
        ))
    }

    pub fn update(&mut self, msg: Message) -> Action {
        match msg {
            Message::Loaded(id, result) => {
                if self.id.as_deref() != Some(id.as_str()) {
                    tracing::debug!(anime_id = %id, "dropping info for a page no longer shown");
                    return Action::None;
                }
                self.loading = false;
                match result {
                    Ok(anime) => {
                        let cover = (anime.id.clone(), anime.cover_url().map(str::to_string));
                        self.anime = Some(anime);
                        Action::RequestCovers(vec![cover])
                    }
                    Err(e) => {
                        tracing::warn!(anime_id = %id, error = %e, "failed to load anime info");
                        self.error = Some(e);
                        Action::SetStatus("Couldn't load anime details".into())
                    }
                }
            }
            Message::OpenExternal => {
                let Some(id) = &self.id else {
                    return Action::None;
                };
                let url = format!("{ANILIST_ANIME_URL}/{id}");
                if let Err(e) = open::that(&url) {
                    tracing::warn!(%url, error = %e, "failed to open browser");
                    return Action::SetStatus(format!("Couldn't open {url}"));
                }
                Action::None
            }
            Message::Back => Action::Navigate(Route::Home),
        }
    }

    pub fn view<'a>(
        &'a self,
        cs: &'a ColorScheme,
        covers: &'a CoverCache,
        phase: f32,
    ) -> Element<'a, Message> {
        let Some(anime) = &self.anime else {
            return self.view_placeholder(cs, phase);
        };
        let card = CardView::from_anime(anime);

        let cover = widgets::rounded_cover(
            cs,
            covers,
            &anime.id,
            style::HERO_COVER_WIDTH,
            style::HERO_COVER_HEIGHT,
            style::RADIUS_LG,
            phase,
        );

        let mut titles = column![text(anime.display_title().to_string())
            .size(style::TEXT_2XL)
            .font(style::FONT_HEADING)
            .color(cs.on_surface)
            .line_height(style::LINE_HEIGHT_TIGHT)]
        .spacing(style::SPACE_XS);
        for alt in [&anime.title.romaji, &anime.title.native].into_iter().flatten() {
            if alt.trim().is_empty() || alt == anime.display_title() {
                continue;
            }
            titles = titles.push(
                text(alt.as_str())
                    .size(style::TEXT_BASE)
                    .color(cs.on_surface_variant)
                    .line_height(style::LINE_HEIGHT_NORMAL),
            );
        }

        let mut badges = row![].spacing(style::SPACE_XS).align_y(Alignment::Center);
        let accent = cs.accent(&card.accent);
        if let Some(kind) = &card.media_type {
            badges = badges.push(
                container(text(kind.clone()).size(style::TEXT_XS))
                    .padding([style::SPACE_XXS, style::BADGE_PADDING_H])
                    .style(theme::accent_badge(accent)),
            );
        }
        let status = anime.status.as_str();
        let facts = [
            (!status.is_empty()).then(|| status.to_string()),
            card.release_year.clone(),
            card.episodes.as_ref().map(|e| format!("{e} episodes")),
            card.score.as_ref().map(|s| format!("\u{2605} {s}")),
        ];
        for fact in facts.into_iter().flatten() {
            badges = badges.push(
                container(
                    text(fact)
                        .size(style::TEXT_XS)
                        .color(cs.on_surface_variant),
                )
                .padding([style::SPACE_XXS, style::BADGE_PADDING_H])
                .style(theme::metadata_badge(cs)),
            );
        }

        let actions = row![
            button(
                row![
                    lucide_icons::iced::icon_arrow_left().size(style::TEXT_SM),
                    text("Back").size(style::TEXT_SM),
                ]
                .spacing(style::SPACE_XS)
                .align_y(Alignment::Center),
            )
            .on_press(Message::Back)
            .padding([style::SPACE_XS, style::SPACE_LG])
            .style(theme::secondary_button(cs)),
            button(
                row![
                    lucide_icons::iced::icon_external_link().size(style::TEXT_SM),
                    text("Open on AniList").size(style::TEXT_SM),
                ]
                .spacing(style::SPACE_XS)
                .align_y(Alignment::Center),
            )
            .on_press(Message::OpenExternal)
            .padding([style::SPACE_XS, style::SPACE_LG])
            .style(theme::primary_button(cs)),
        ]
        .spacing(style::SPACE_SM);

        let mut details = column![titles, badges].spacing(style::SPACE_LG);
        if self.loading {
            details = details.push(
                text("Loading details...")
                    .size(style::TEXT_XS)
                    .color(cs.outline),
            );
        } else if let Some(error) = &self.error {
            details = details.push(
                text(format!("Couldn't load details: {error}"))
                    .size(style::TEXT_XS)
                    .color(cs.error),
            );
        }
        details = details.push(Space::new().height(style::SPACE_SM));
        details = details.push(actions);

        let content = row![cover, details.width(Length::Fill)]
            .spacing(style::SPACE_XL)
            .padding(style::SPACE_XL);

        widgets::styled_scrollable(content, cs)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_placeholder<'a>(&'a self, cs: &'a ColorScheme, phase: f32) -> Element<'a, Message> {
        if let Some(error) = &self.error {
            return widgets::empty_state(
                cs,
                lucide_icons::iced::icon_circle_alert()
                    .size(style::TEXT_3XL)
                    .color(cs.outline)
                    .into(),
                "Couldn't load this anime",
                error.as_str(),
                Some(("Back to home", Message::Back)),
            );
        }

        let lines = column![
            widgets::skeleton(cs, Length::Fixed(320.0), style::TEXT_2XL, style::RADIUS_SM, phase),
            widgets::skeleton(cs, Length::Fixed(200.0), style::TEXT_BASE, style::RADIUS_SM, phase),
            widgets::skeleton(cs, Length::Fixed(260.0), style::TEXT_SM, style::RADIUS_SM, phase),
        ]
        .spacing(style::SPACE_MD);

        row![
            widgets::skeleton(
                cs,
                Length::Fixed(style::HERO_COVER_WIDTH),
                style::HERO_COVER_HEIGHT,
                style::RADIUS_LG,
                phase,
            ),
            lines,
        ]
        .spacing(style::SPACE_XL)
        .padding(style::SPACE_XL)
        .into()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
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

    fn loading_watch(id: &str, seed: Option<Anime>) -> Watch {
        Watch {
            id: Some(id.into()),
            anime: seed,
            loading: true,
            error: None,
        }
    }

    #[test]
    fn test_info_replaces_seed_and_requests_cover() {
        let mut watch = loading_watch("7", Some(anime("7")));
        let mut full = anime("7");
        full.total_episodes = Some(12);

        match watch.update(Message::Loaded("7".into(), Ok(full))) {
            Action::RequestCovers(covers) => {
                assert_eq!(covers, vec![("7".to_string(), Some("https://img.example/7.jpg".to_string()))]);
            }
            _ => panic!("expected a cover request"),
        }
        assert!(!watch.is_loading());
        assert_eq!(watch.anime().and_then(|a| a.total_episodes), Some(12));
    }

    #[test]
    fn test_info_for_previous_page_is_dropped() {
        let mut watch = loading_watch("8", None);
        let action = watch.update(Message::Loaded("7".into(), Ok(anime("7"))));
        assert!(matches!(action, Action::None));
        assert!(watch.is_loading());
        assert!(watch.anime().is_none());
    }

    #[test]
    fn test_failure_keeps_seed() {
        let mut watch = loading_watch("7", Some(anime("7")));
        let action = watch.update(Message::Loaded("7".into(), Err("timeout".into())));
        assert!(matches!(action, Action::SetStatus(_)));
        assert_eq!(watch.anime().map(|a| a.id.as_str()), Some("7"));
        assert!(!watch.is_loading());
    }

    #[test]
    fn test_back_goes_home() {
        let mut watch = Watch::new();
        assert!(matches!(watch.update(Message::Back), Action::Navigate(Route::Home)));
    }
}
