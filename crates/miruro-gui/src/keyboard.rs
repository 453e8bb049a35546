//! Global keyboard shortcuts.
//!
//! Translates iced key events into the toolkit-free key model. Which
//! presses become shortcuts depends on search focus, so the app decides
//! that with `miruro_core::shortcuts::Shortcut::from_key`.

use iced::event;
use iced::keyboard;
use iced::Subscription;

use miruro_core::shortcuts::Key;

use crate::app::Message;

/// A key press as seen by the app.
#[derive(Debug, Clone, Copy)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
    /// A widget (the search input) already consumed the event.
    pub captured: bool,
}

/// Subscription that converts keyboard events to `Message::Key`.
pub fn keyboard_subscription() -> Subscription<Message> {
    iced::event::listen_with(|event, status, _id| match event {
        iced::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::Key(KeyEvent {
                key: map_key(&key),
                shift: modifiers.shift(),
                captured: status == event::Status::Captured,
            }))
        }
        _ => None,
    })
}

fn map_key(key: &keyboard::Key) -> Key {
    use keyboard::key::Named;

    match key {
        keyboard::Key::Named(Named::Escape) => Key::Escape,
        keyboard::Key::Named(Named::Enter) => Key::Enter,
        keyboard::Key::Named(Named::ArrowUp) => Key::ArrowUp,
        keyboard::Key::Named(Named::ArrowDown) => Key::ArrowDown,
        keyboard::Key::Character(c) => {
            let mut chars = c.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Key::Char(ch),
                _ => Key::Other,
            }
        }
        _ => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyboard::key::Named;

    #[test]
    fn test_map_key() {
        assert_eq!(map_key(&keyboard::Key::Named(Named::Escape)), Key::Escape);
        assert_eq!(map_key(&keyboard::Key::Character("/".into())), Key::Char('/'));
        assert_eq!(map_key(&keyboard::Key::Character("D".into())), Key::Char('D'));
        assert_eq!(map_key(&keyboard::Key::Named(Named::F5)), Key::Other);
    }
}
