use iced::widget::container;
use iced::{ContentFit, Element, Length};

use crate::cover_cache::{CoverCache, CoverState};
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets;

/// Render a cover image with rounded corners.
///
/// A cover still downloading pulses as a skeleton; one that failed or has
/// no URL gets a framed placeholder icon.
pub fn rounded_cover<'a, Message: 'static>(
    cs: &ColorScheme,
    covers: &'a CoverCache,
    anime_id: &str,
    width: f32,
    height: f32,
    radius: f32,
    phase: f32,
) -> Element<'a, Message> {
    match covers.get(anime_id) {
        Some(CoverState::Loaded(path)) => container(
            iced::widget::image(path.as_path())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Cover)
                .border_radius(radius),
        )
        .width(Length::Fixed(width))
        .height(Length::Fixed(height))
        .style(theme::cover_placeholder(cs, radius))
        .into(),
        Some(CoverState::Loading) => {
            widgets::skeleton(cs, Length::Fixed(width), height, radius, phase)
        }
        Some(CoverState::Failed) | None => {
            let icon_size = if width <= style::THUMB_WIDTH {
                style::TEXT_BASE
            } else {
                style::TEXT_3XL
            };
            container(
                lucide_icons::iced::icon_film()
                    .size(icon_size)
                    .color(cs.outline)
                    .center(),
            )
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .center_x(Length::Fixed(width))
            .center_y(Length::Fixed(height))
            .style(theme::cover_placeholder(cs, radius))
            .into()
        }
    }
}
