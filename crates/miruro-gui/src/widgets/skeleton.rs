use iced::widget::{container, Space};
use iced::{Element, Length};

use crate::theme::{self, ColorScheme};

/// A pulsing placeholder block of fixed size.
///
/// `phase` comes from the app's animation tick, in `0.0..=1.0`.
pub fn skeleton<'a, Message: 'a>(
    cs: &ColorScheme,
    width: impl Into<Length>,
    height: f32,
    radius: f32,
    phase: f32,
) -> Element<'a, Message> {
    container(Space::new().width(Length::Fill).height(Length::Fill))
        .width(width)
        .height(Length::Fixed(height))
        .style(theme::skeleton(cs, phase, radius))
        .into()
}
