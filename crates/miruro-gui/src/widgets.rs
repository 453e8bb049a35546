pub mod anime_card;
pub mod empty_state;
pub mod rounded_cover;
pub mod search_dropdown;
pub mod skeleton;

pub use anime_card::anime_card;
pub use empty_state::empty_state;
pub use rounded_cover::rounded_cover;
pub use search_dropdown::search_dropdown;
pub use skeleton::skeleton;

use iced::widget::scrollable;
use iced::Element;

use crate::theme::{self, ColorScheme};

/// A scrollable with consistent direction and style across the application.
pub fn styled_scrollable<'a, Message: 'a>(
    content: impl Into<Element<'a, Message>>,
    cs: &ColorScheme,
) -> scrollable::Scrollable<'a, Message> {
    scrollable(content)
        .direction(scrollable::Direction::Vertical(
            scrollable::Scrollbar::new()
                .width(6)
                .scroller_width(4)
                .margin(2),
        ))
        .style(theme::overlay_scrollbar(cs))
}
