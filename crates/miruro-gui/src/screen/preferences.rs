use std::path::PathBuf;

use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length};

use miruro_core::config::AppConfig;
use miruro_core::theme_pref::ThemeMode;

use crate::screen::Action;
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets;

/// Appearance choice and where things live on disk.
pub struct Preferences {
    config_path: PathBuf,
    data_dir: PathBuf,
    api_base: String,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Handled by the app, which owns the preference store.
    ModeChanged(ThemeMode),
    OpenDataDir,
}

impl Preferences {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            config_path: AppConfig::config_path(),
            data_dir: AppConfig::data_dir(),
            api_base: config.api.base_url.clone(),
        }
    }

    pub fn update(&mut self, msg: Message) -> Action {
        match msg {
            Message::ModeChanged(_) => Action::None,
            Message::OpenDataDir => {
                if let Err(e) = open::that(&self.data_dir) {
                    tracing::warn!(path = %self.data_dir.display(), error = %e, "failed to open data dir");
                    return Action::SetStatus("Couldn't open the data folder".into());
                }
                Action::None
            }
        }
    }

    pub fn view<'a>(&'a self, cs: &ColorScheme, mode: ThemeMode) -> Element<'a, Message> {
        let heading = text("Preferences")
            .size(style::TEXT_XL)
            .font(style::FONT_HEADING)
            .color(cs.on_surface)
            .line_height(style::LINE_HEIGHT_TIGHT);

        let mut modes = row![].spacing(style::SPACE_XS);
        for &option in ThemeMode::ALL {
            let label = match option {
                ThemeMode::Dark => "Dark",
                ThemeMode::Light => "Light",
            };
            let choice = button(text(label).size(style::TEXT_SM))
                .on_press(Message::ModeChanged(option))
                .padding([style::SPACE_XS, style::SPACE_LG]);
            modes = modes.push(if option == mode {
                choice.style(theme::primary_button(cs))
            } else {
                choice.style(theme::secondary_button(cs))
            });
        }

        let appearance = container(
            column![
                section_label(cs, "Appearance"),
                row![
                    text("Theme")
                        .size(style::TEXT_BASE)
                        .line_height(style::LINE_HEIGHT_NORMAL)
                        .width(Length::Fill),
                    modes,
                ]
                .align_y(Alignment::Center)
                .spacing(style::SPACE_MD),
                text("Shift+D toggles the theme from anywhere.")
                    .size(style::TEXT_XS)
                    .color(cs.outline),
            ]
            .spacing(style::SPACE_SM),
        )
        .style(theme::settings_panel(cs))
        .padding(style::SPACE_LG)
        .width(Length::Fill);

        let storage = container(
            column![
                section_label(cs, "Storage"),
                path_row(cs, "Config file", self.config_path.display().to_string()),
                path_row(cs, "Data folder", self.data_dir.display().to_string()),
                path_row(cs, "Catalog API", self.api_base.clone()),
                button(text("Open data folder").size(style::TEXT_SM))
                    .on_press(Message::OpenDataDir)
                    .padding([style::SPACE_XS, style::SPACE_LG])
                    .style(theme::secondary_button(cs)),
            ]
            .spacing(style::SPACE_SM),
        )
        .style(theme::settings_panel(cs))
        .padding(style::SPACE_LG)
        .width(Length::Fill);

        let content = column![heading, appearance, storage]
            .spacing(style::SPACE_LG)
            .padding(style::SPACE_XL)
            .max_width(720.0);

        widgets::styled_scrollable(container(content).center_x(Length::Fill), cs)
            .height(Length::Fill)
            .into()
    }
}

fn section_label<'a>(cs: &ColorScheme, label: &'a str) -> Element<'a, Message> {
    text(label)
        .size(style::TEXT_XS)
        .font(style::FONT_HEADING)
        .color(cs.on_surface_variant)
        .line_height(style::LINE_HEIGHT_LOOSE)
        .into()
}

fn path_row<'a>(cs: &ColorScheme, label: &'a str, value: String) -> Element<'a, Message> {
    row![
        text(label)
            .size(style::TEXT_SM)
            .color(cs.on_surface_variant)
            .width(Length::Fixed(120.0)),
        text(value)
            .size(style::TEXT_SM)
            .color(cs.on_surface)
            .wrapping(iced::widget::text::Wrapping::Glyph),
    ]
    .spacing(style::SPACE_MD)
    .into()
}
