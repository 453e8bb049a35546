use iced::widget::{button, center, column, text};
use iced::{Alignment, Element, Length};

use crate::style;
use crate::theme::{self, ColorScheme};

/// Centered placeholder for grids with nothing to show: an icon, a
/// headline, a hint, and optionally one button (e.g. "Try again").
pub fn empty_state<'a, Message: Clone + 'a>(
    cs: &ColorScheme,
    icon: Element<'a, Message>,
    headline: &'a str,
    hint: &'a str,
    action: Option<(&'a str, Message)>,
) -> Element<'a, Message> {
    let mut content = column![
        icon,
        text(headline)
            .size(style::TEXT_XL)
            .font(style::FONT_HEADING)
            .color(cs.on_surface_variant)
            .line_height(style::LINE_HEIGHT_TIGHT),
        text(hint)
            .size(style::TEXT_SM)
            .color(cs.outline)
            .line_height(style::LINE_HEIGHT_LOOSE),
    ]
    .spacing(style::SPACE_MD)
    .align_x(Alignment::Center);

    if let Some((label, on_press)) = action {
        content = content.push(
            button(text(label).size(style::TEXT_SM))
                .on_press(on_press)
                .padding([style::SPACE_XS, style::SPACE_LG])
                .style(theme::secondary_button(cs)),
        );
    }

    center(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
