//! Style functions parameterized by ColorScheme.
//!
//! Each function returns a closure suitable for Iced's `.style()` method,
//! capturing the needed color tokens from a `ColorScheme`.

use iced::widget::{button, container, scrollable, text_input};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

use crate::style;

use super::ColorScheme;

/// Grouped settings block on the preferences page.
pub fn settings_panel(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let fill = cs.surface_container_low;
    let edge = cs.outline_variant;
    move |_theme| container::Style {
        background: Some(fill.into()),
        border: Border {
            color: Color { a: 0.6, ..edge },
            width: 1.0,
            radius: style::RADIUS_LG.into(),
        },
        ..Default::default()
    }
}

/// Bottom status line.
pub fn status_bar(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let fg = cs.outline;
    let fill = cs.surface_container_low;
    move |_theme| container::Style {
        text_color: Some(fg),
        background: Some(fill.into()),
        ..Default::default()
    }
}

/// Top navigation bar: elevated surface with a hairline underneath.
pub fn navbar_bg(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_low;
    let border_color = cs.outline_variant;
    move |_theme| container::Style {
        text_color: None,
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 0.0,
            radius: 0.0.into(),
        },
        shadow: Shadow {
            color: Color {
                a: 0.25,
                ..border_color
            },
            offset: Vector::new(0.0, 1.0),
            blur_radius: 0.0,
        },
        ..Default::default()
    }
}

/// Primary action button.
pub fn primary_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let primary = cs.primary;
    let primary_hover = cs.primary_hover;
    let on_primary = cs.on_primary;

    move |_theme, status| {
        let bg = match status {
            button::Status::Hovered | button::Status::Pressed => primary_hover,
            _ => primary,
        };
        button::Style {
            background: Some(Background::Color(bg)),
            text_color: on_primary,
            border: Border {
                radius: style::RADIUS_MD.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

/// Tonal pill for secondary actions (Back, Retry, Try again).
pub fn secondary_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let rest = cs.surface_container_high;
    let lifted = cs.surface_bright;
    let label = cs.on_surface;

    move |_theme, status| {
        let fill = match status {
            button::Status::Hovered | button::Status::Pressed => lifted,
            _ => rest,
        };
        button::Style {
            background: Some(fill.into()),
            text_color: label,
            border: Border {
                radius: style::RADIUS_FULL.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

/// Transparent icon button: no border, subtle hover.
pub fn icon_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let surface_bright = cs.surface_bright;
    let on_surface = cs.on_surface;

    move |_theme, status| {
        let bg = match status {
            button::Status::Hovered => Some(Background::Color(surface_bright)),
            _ => None,
        };
        button::Style {
            background: bg,
            text_color: on_surface,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: style::RADIUS_FULL.into(),
            },
            ..Default::default()
        }
    }
}

/// Logo button: plain text, no chrome.
pub fn logo_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let on_surface = cs.on_surface;
    let primary = cs.primary;

    move |_theme, status| button::Style {
        background: None,
        text_color: match status {
            button::Status::Hovered => primary,
            _ => on_surface,
        },
        ..Default::default()
    }
}

/// The bare input inside the search pill; the pill draws the frame.
pub fn search_input(cs: &ColorScheme) -> impl Fn(&Theme, text_input::Status) -> text_input::Style {
    let value = cs.on_surface;
    let hint = cs.outline;
    let icon = cs.on_surface_variant;
    let selection = cs.primary_container;

    move |_theme, status| text_input::Style {
        background: Color::TRANSPARENT.into(),
        border: Border::default(),
        icon,
        placeholder: match status {
            text_input::Status::Focused { .. } => Color { a: 0.6, ..hint },
            _ => hint,
        },
        value,
        selection,
    }
}

/// Composite search bar container: pill-shaped, primary border while active.
pub fn search_bar(cs: &ColorScheme, active: bool) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container;
    let border_color = if active { cs.primary } else { cs.outline_variant };
    move |_theme| container::Style {
        text_color: None,
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: style::RADIUS_FULL.into(),
        },
        ..Default::default()
    }
}

/// Floating suggestion list under the search bar.
pub fn dropdown(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_high;
    let border_color = cs.outline_variant;
    let shadow = cs.scrim;
    move |_theme| container::Style {
        text_color: None,
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: style::RADIUS_LG.into(),
        },
        shadow: Shadow {
            color: Color { a: 0.35, ..shadow },
            offset: Vector::new(0.0, 6.0),
            blur_radius: 18.0,
        },
        ..Default::default()
    }
}

/// One row of the suggestion list. The highlighted row is filled.
pub fn dropdown_item(
    selected: bool,
    cs: &ColorScheme,
) -> impl Fn(&Theme, button::Status) -> button::Style {
    let surface_bright = cs.surface_bright;
    let primary_container = cs.primary_container;
    let on_surface = cs.on_surface;

    move |_theme, status| {
        let bg = if selected {
            Some(Background::Color(primary_container))
        } else {
            match status {
                button::Status::Hovered => Some(Background::Color(surface_bright)),
                _ => None,
            }
        };
        button::Style {
            background: bg,
            text_color: on_surface,
            border: Border {
                radius: style::RADIUS_MD.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

/// Frame behind a cover: visible while the image is missing.
pub fn cover_placeholder(cs: &ColorScheme, radius: f32) -> impl Fn(&Theme) -> container::Style {
    let fill = cs.surface_container;
    move |_theme| container::Style {
        background: Some(fill.into()),
        border: Border {
            radius: radius.into(),
            ..Border::default()
        },
        ..Default::default()
    }
}

/// Pulsing skeleton block. `phase` is in `0.0..=1.0`.
pub fn skeleton(cs: &ColorScheme, phase: f32, radius: f32) -> impl Fn(&Theme) -> container::Style {
    let base = cs.skeleton;
    let alpha = 0.55 + 0.45 * phase.clamp(0.0, 1.0);
    move |_theme| container::Style {
        background: Some(Background::Color(Color { a: alpha, ..base })),
        border: Border {
            radius: radius.into(),
            ..Border::default()
        },
        ..Default::default()
    }
}

/// Anime card button: transparent, lifted with the anime's accent on hover.
pub fn anime_card_button(
    cs: &ColorScheme,
    accent: Color,
) -> impl Fn(&Theme, button::Status) -> button::Style {
    let surface_container = cs.surface_container;
    move |_theme, status| {
        let (bg, shadow) = match status {
            button::Status::Hovered | button::Status::Pressed => (
                Some(Background::Color(surface_container)),
                Shadow {
                    color: Color { a: 0.35, ..accent },
                    offset: Vector::new(0.0, 4.0),
                    blur_radius: 12.0,
                },
            ),
            _ => (None, Shadow::default()),
        };
        button::Style {
            background: bg,
            text_color: Color::TRANSPARENT,
            border: Border {
                radius: style::RADIUS_MD.into(),
                ..Border::default()
            },
            shadow,
            ..Default::default()
        }
    }
}

/// Dark veil over the cover while a card is hovered.
pub fn hover_overlay(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let scrim = cs.scrim;
    move |_theme| container::Style {
        text_color: Some(Color::WHITE),
        background: Some(Background::Color(scrim)),
        border: Border {
            radius: style::RADIUS_MD.into(),
            ..Border::default()
        },
        ..Default::default()
    }
}

/// Round airing-status dot.
pub fn status_dot(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme| container::Style {
        background: Some(Background::Color(color)),
        border: Border {
            radius: style::RADIUS_FULL.into(),
            ..Border::default()
        },
        ..Default::default()
    }
}

/// Media-type badge tinted with the anime's accent color.
pub fn accent_badge(accent: Color) -> impl Fn(&Theme) -> container::Style {
    let bg = Color { a: 0.85, ..accent };
    move |_theme| container::Style {
        text_color: Some(Color::WHITE),
        background: Some(Background::Color(bg)),
        border: Border {
            radius: style::RADIUS_SM.into(),
            ..Border::default()
        },
        ..Default::default()
    }
}

/// Neutral metadata chip (year, episodes, score).
pub fn metadata_badge(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_high;
    let text = cs.on_surface_variant;
    move |_theme| container::Style {
        text_color: Some(text),
        background: Some(Background::Color(bg)),
        border: Border {
            radius: style::RADIUS_SM.into(),
            ..Border::default()
        },
        ..Default::default()
    }
}

/// Floating bubble for tooltips (full card titles, navbar hints).
pub fn tooltip_bubble(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let fill = cs.surface_bright;
    let fg = cs.on_surface;
    let shade = cs.scrim;

    move |_theme| container::Style {
        text_color: Some(fg),
        background: Some(fill.into()),
        border: Border {
            radius: style::RADIUS_SM.into(),
            ..Border::default()
        },
        shadow: Shadow {
            color: Color { a: 0.3, ..shade },
            offset: Vector::new(0.0, 2.0),
            blur_radius: 8.0,
        },
        ..Default::default()
    }
}

/// Slim scroller with no visible rail. Fades in while hovered or dragged.
pub fn overlay_scrollbar(
    cs: &ColorScheme,
) -> impl Fn(&Theme, scrollable::Status) -> scrollable::Style {
    let thumb = cs.on_surface_variant;

    move |_theme, status| {
        let alpha = match status {
            scrollable::Status::Dragged { .. } => 0.6,
            scrollable::Status::Hovered { .. } => 0.35,
            _ => 0.12,
        };
        let rail = scrollable::Rail {
            background: None,
            border: Border::default(),
            scroller: scrollable::Scroller {
                background: Color { a: alpha, ..thumb }.into(),
                border: Border {
                    radius: style::RADIUS_FULL.into(),
                    ..Border::default()
                },
            },
        };

        scrollable::Style {
            container: container::Style::default(),
            vertical_rail: rail,
            horizontal_rail: rail,
            gap: None,
            auto_scroll: scrollable::AutoScroll {
                background: Color::TRANSPARENT.into(),
                border: Border::default(),
                shadow: Shadow::default(),
                icon: thumb,
            },
        }
    }
}
