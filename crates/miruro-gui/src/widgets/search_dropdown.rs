use iced::widget::{button, column, container, mouse_area, row, rule, text};
use iced::{Alignment, Element, Length};

use miruro_core::card::format_score;
use miruro_core::models::Anime;

use crate::cover_cache::CoverCache;
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets;

/// The suggestion list under the search bar.
///
/// `on_select(i)` fires on click, `on_hover(i)` when the pointer enters a
/// row, and `on_view_all` from the trailing row.
pub fn search_dropdown<'a, Message: Clone + 'static>(
    cs: &ColorScheme,
    results: &'a [Anime],
    selected: Option<usize>,
    covers: &'a CoverCache,
    phase: f32,
    on_select: impl Fn(usize) -> Message,
    on_hover: impl Fn(usize) -> Message,
    on_view_all: Message,
) -> Element<'a, Message> {
    let mut list = column![].spacing(style::SPACE_XXS);

    for (i, anime) in results.iter().enumerate() {
        let thumb = widgets::rounded_cover(
            cs,
            covers,
            &anime.id,
            style::THUMB_WIDTH,
            style::THUMB_HEIGHT,
            style::RADIUS_SM,
            phase,
        );

        let details = column![
            text(anime.display_title())
                .size(style::TEXT_SM)
                .font(style::FONT_HEADING)
                .color(cs.on_surface)
                .line_height(style::LINE_HEIGHT_NORMAL)
                .wrapping(iced::widget::text::Wrapping::None),
            text(result_meta(anime))
                .size(style::TEXT_XS)
                .color(cs.on_surface_variant)
                .line_height(style::LINE_HEIGHT_LOOSE),
        ]
        .spacing(style::SPACE_XXS);

        let item = button(
            row![thumb, details]
                .spacing(style::SPACE_MD)
                .align_y(Alignment::Center),
        )
        .on_press(on_select(i))
        .padding(style::SPACE_XS)
        .width(Length::Fill)
        .style(theme::dropdown_item(selected == Some(i), cs));

        list = list.push(mouse_area(item).on_enter(on_hover(i)));
    }

    let view_all = button(
        container(
            text("View all results")
                .size(style::TEXT_SM)
                .color(cs.primary),
        )
        .center_x(Length::Fill),
    )
    .on_press(on_view_all)
    .padding(style::SPACE_SM)
    .width(Length::Fill)
    .style(theme::dropdown_item(false, cs));

    container(column![list, rule::horizontal(1), view_all].spacing(style::SPACE_XS))
        .padding(style::SPACE_SM)
        .width(Length::Fixed(style::DROPDOWN_WIDTH))
        .style(theme::dropdown(cs))
        .into()
}

/// `TV · 12 eps · ★ 8.4`
fn result_meta(anime: &Anime) -> String {
    let mut parts = Vec::with_capacity(3);
    if let Some(kind) = anime.media_type.as_deref().filter(|t| !t.is_empty()) {
        parts.push(kind.to_string());
    }
    if let Some(eps) = anime.episode_count() {
        parts.push(format!("{eps} eps"));
    }
    if let Some(score) = anime.score() {
        parts.push(format!("\u{2605} {}", format_score(score)));
    }
    parts.join("  \u{00B7}  ")
}
