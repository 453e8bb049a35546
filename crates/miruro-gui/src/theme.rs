//! Dark and light palettes and the iced theme built from them.
//!
//! Both variants live in one embedded TOML file.

mod catalog;
mod colors;

pub use catalog::*;
pub use colors::*;

use iced::Theme;

pub use miruro_core::theme_pref::ThemeMode;

/// Embedded theme source (contains both dark and light).
pub(crate) const DEFAULT_THEME_TOML: &str = include_str!("../assets/themes/default.toml");

/// A fully loaded theme with both appearance variants.
#[derive(Debug, Clone)]
pub struct MiruroTheme {
    pub name: String,
    pub dark: ColorScheme,
    pub light: ColorScheme,
}

impl MiruroTheme {
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let file: ThemeFile =
            toml::from_str(toml_str).map_err(|e| format!("theme parse error: {e}"))?;
        Ok(Self {
            name: file.meta.name.clone(),
            dark: ColorScheme::from_variant(&file.dark),
            light: ColorScheme::from_variant(&file.light),
        })
    }

    pub fn default_theme() -> Self {
        Self::from_toml(DEFAULT_THEME_TOML).expect("embedded default theme is valid TOML")
    }

    pub fn colors(&self, mode: ThemeMode) -> &ColorScheme {
        match mode {
            ThemeMode::Dark => &self.dark,
            ThemeMode::Light => &self.light,
        }
    }

    pub fn iced_theme(&self, mode: ThemeMode) -> Theme {
        build_theme(&self.name, self.colors(mode))
    }
}

/// Ask the OS whether it is in dark mode. Unknown counts as dark.
pub fn system_prefers_dark() -> bool {
    match dark_light::detect() {
        Ok(dark_light::Mode::Light) => false,
        Ok(_) => true,
        Err(e) => {
            tracing::debug!("could not detect system appearance: {e}");
            true
        }
    }
}

pub fn build_theme(name: &str, cs: &ColorScheme) -> Theme {
    use iced::theme::Palette;

    Theme::custom(
        name.to_string(),
        Palette {
            background: cs.surface,
            text: cs.on_surface,
            primary: cs.primary,
            success: cs.status_ongoing,
            warning: cs.primary_hover,
            danger: cs.error,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_theme_loads() {
        let theme = MiruroTheme::default_theme();
        assert_eq!(theme.name, "Miruro");
        assert_ne!(
            theme.colors(ThemeMode::Dark).surface,
            theme.colors(ThemeMode::Light).surface
        );
    }
}
