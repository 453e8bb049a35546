//! Toolkit-independent keyboard shortcut table.
//!
//! The GUI translates its native key events into [`KeyPress`] and asks for
//! the matching [`Shortcut`]. Focus rules live here so they can be tested.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Enter,
    ArrowUp,
    ArrowDown,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
    /// Whether the search input currently has keyboard focus.
    pub input_focused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// `/` — focus the search box.
    FocusSearch,
    /// Escape — leave the search box and close the dropdown.
    Escape,
    /// Shift+D — flip between dark and light.
    ToggleTheme,
    /// Arrow up in the search box.
    SelectPrevious,
    /// Arrow down in the search box.
    SelectNext,
    /// Enter in the search box.
    Submit,
}

impl Shortcut {
    pub fn from_key(press: &KeyPress) -> Option<Self> {
        match press.key {
            Key::Escape => Some(Self::Escape),
            // Typing a slash into the box is text, not a shortcut.
            Key::Char('/') if !press.input_focused => Some(Self::FocusSearch),
            Key::Char(c) if press.shift && c.eq_ignore_ascii_case(&'d') && !press.input_focused => {
                Some(Self::ToggleTheme)
            }
            Key::ArrowUp if press.input_focused => Some(Self::SelectPrevious),
            Key::ArrowDown if press.input_focused => Some(Self::SelectNext),
            Key::Enter if press.input_focused => Some(Self::Submit),
            _ => None,
        }
    }
}
