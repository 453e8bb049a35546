use iced::widget::{button, column, container, mouse_area, row, stack, text, tooltip, Space};
use iced::{Alignment, Color, Element, Length};

use miruro_core::card::{CardState, CardView, StatusIndicator};

use crate::cover_cache::CoverCache;
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets;

/// Card width: cover + horizontal padding inside the card.
pub const CARD_WIDTH: f32 = style::COVER_WIDTH + 2.0 * style::SPACE_SM;

/// Messages a card emits.
pub struct CardEvents<Message> {
    pub on_enter: Message,
    pub on_exit: Message,
    pub on_press: Message,
}

/// One anime in a grid.
///
/// Pulses as a skeleton until the cover settles. Afterwards it shows the
/// cover, a title line with the airing dot, the romaji title, and a
/// year/episodes/score line. Hovering veils the cover and reveals the
/// media-type badge.
pub fn anime_card<'a, Message: Clone + 'static>(
    cs: &ColorScheme,
    view: &'a CardView,
    state: CardState,
    covers: &'a CoverCache,
    phase: f32,
    events: CardEvents<Message>,
) -> Element<'a, Message> {
    if state.is_loading() {
        let placeholder = column![
            widgets::skeleton(
                cs,
                Length::Fixed(style::COVER_WIDTH),
                style::COVER_HEIGHT,
                style::RADIUS_MD,
                phase,
            ),
            widgets::skeleton(cs, Length::Fill, style::TEXT_SM, style::RADIUS_SM, phase),
            widgets::skeleton(
                cs,
                Length::Fixed(style::COVER_WIDTH * 0.6),
                style::TEXT_XS,
                style::RADIUS_SM,
                phase,
            ),
        ]
        .spacing(style::SPACE_XS)
        .padding(style::SPACE_SM)
        .width(Length::Fixed(CARD_WIDTH));

        return mouse_area(placeholder).on_press(events.on_press).into();
    }

    let accent = cs.accent(&view.accent);

    let cover = widgets::rounded_cover(
        cs,
        covers,
        &view.id,
        style::COVER_WIDTH,
        style::COVER_HEIGHT,
        style::RADIUS_MD,
        phase,
    );

    let cover_area: Element<'a, Message> = if state.show_detail() {
        stack![cover, hover_overlay(cs, view, accent)].into()
    } else {
        cover
    };

    // Title with airing dot; the full title lives in the tooltip.
    let mut title_row = row![].spacing(style::SPACE_XS).align_y(Alignment::Center);
    if let Some(indicator) = view.indicator {
        let color = match indicator {
            StatusIndicator::Ongoing => cs.status_ongoing,
            StatusIndicator::Completed => cs.status_completed,
        };
        title_row = title_row.push(
            container(Space::new().width(style::STATUS_DOT).height(style::STATUS_DOT))
                .style(theme::status_dot(color)),
        );
    }
    title_row = title_row.push(
        text(view.title.as_str())
            .size(style::TEXT_SM)
            .font(style::FONT_HEADING)
            .color(cs.on_surface)
            .line_height(style::LINE_HEIGHT_NORMAL)
            .wrapping(iced::widget::text::Wrapping::WordOrGlyph),
    );
    let title_el = tooltip(
        container(title_row)
            .height(Length::Fixed(
                style::TEXT_SM * style::LINE_HEIGHT_NORMAL * 2.0 + 2.0,
            ))
            .clip(true),
        container(text(view.tooltip.as_str()).size(style::TEXT_XS))
            .padding([style::SPACE_XS, style::SPACE_SM])
            .style(theme::tooltip_bubble(cs)),
        tooltip::Position::Bottom,
    );

    let mut body = column![cover_area, title_el]
        .spacing(style::SPACE_XS)
        .padding(style::SPACE_SM)
        .width(Length::Fixed(CARD_WIDTH));

    if !view.romaji.is_empty() {
        body = body.push(
            text(view.romaji.as_str())
                .size(style::TEXT_XS)
                .color(cs.outline)
                .line_height(style::LINE_HEIGHT_LOOSE)
                .wrapping(iced::widget::text::Wrapping::None),
        );
    }

    let meta = meta_line(view);
    if !meta.is_empty() {
        body = body.push(
            text(meta)
                .size(style::TEXT_XS)
                .color(cs.on_surface_variant)
                .line_height(style::LINE_HEIGHT_LOOSE),
        );
    }

    let card = button(body)
        .padding(0)
        .width(Length::Fixed(CARD_WIDTH))
        .on_press(events.on_press)
        .style(theme::anime_card_button(cs, accent));

    mouse_area(card)
        .on_enter(events.on_enter)
        .on_exit(events.on_exit)
        .into()
}

fn hover_overlay<'a, Message: 'a>(
    cs: &ColorScheme,
    view: &'a CardView,
    accent: Color,
) -> Element<'a, Message> {
    let mut overlay = column![].spacing(style::SPACE_XS).padding(style::SPACE_SM);

    if let Some(media_type) = &view.media_type {
        overlay = overlay.push(
            container(text(media_type.as_str()).size(style::TEXT_XS))
                .padding([style::SPACE_XXS, style::BADGE_PADDING_H])
                .style(theme::accent_badge(accent)),
        );
    }

    overlay = overlay.push(
        container(
            lucide_icons::iced::icon_play()
                .size(style::TEXT_3XL)
                .color(Color::WHITE),
        )
        .center_x(Length::Fill)
        .center_y(Length::Fill),
    );

    container(overlay)
        .width(Length::Fixed(style::COVER_WIDTH))
        .height(Length::Fixed(style::COVER_HEIGHT))
        .style(theme::hover_overlay(cs))
        .into()
}

/// `2019 · 24 eps · ★ 8.6`, skipping whatever is unknown.
pub fn meta_line(view: &CardView) -> String {
    let mut parts = Vec::with_capacity(3);
    if let Some(year) = &view.release_year {
        parts.push(year.clone());
    }
    if let Some(eps) = &view.episodes {
        parts.push(format!("{eps} eps"));
    }
    if let Some(score) = &view.score {
        parts.push(format!("\u{2605} {score}"));
    }
    parts.join("  \u{00B7}  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use miruro_core::models::{Anime, AnimeTitle};

    #[test]
    fn test_meta_line_skips_unknowns() {
        let mut anime = Anime {
            id: "1".into(),
            title: AnimeTitle {
                english: Some("Frieren".into()),
                ..Default::default()
            },
            release_date: Some(2023),
            total_episodes: Some(28),
            rating: Some(91),
            ..Default::default()
        };
        let view = CardView::from_anime(&anime);
        assert_eq!(meta_line(&view), "2023  \u{00B7}  28 eps  \u{00B7}  \u{2605} 9.1");

        anime.release_date = None;
        anime.rating = None;
        let view = CardView::from_anime(&anime);
        assert_eq!(meta_line(&view), "28 eps");

        anime.total_episodes = None;
        assert_eq!(meta_line(&CardView::from_anime(&anime)), "");
    }
}
