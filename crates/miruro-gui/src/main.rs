mod app;
mod cover_cache;
mod keyboard;
mod logging;
mod navbar;
mod screen;
mod style;
mod subscription;
mod theme;
mod widgets;
mod window_state;

use clap::Parser;

use miruro_core::config::AppConfig;

/// Browse trending anime and search the catalog.
#[derive(Debug, Parser)]
#[command(name = "miruro", version, about)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> iced::Result {
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.verbose, &AppConfig::data_dir().join("logs"));

    let ws = window_state::WindowState::load();

    let mut win = iced::window::Settings {
        size: ws.size(),
        min_size: Some(iced::Size::new(360.0, 300.0)),
        ..Default::default()
    };

    if let Some(pos) = ws.position() {
        win.position = iced::window::Position::Specific(pos);
    } else {
        win.position = iced::window::Position::Centered;
    }

    iced::application(app::Miruro::new, app::Miruro::update, app::Miruro::view)
        .title(app::Miruro::title)
        .subscription(app::Miruro::subscription)
        .theme(app::Miruro::theme)
        .font(lucide_icons::LUCIDE_FONT_BYTES)
        .window(win)
        .run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_verbose_flag() {
        assert!(Cli::try_parse_from(["miruro", "--verbose"]).unwrap().verbose);
        assert!(!Cli::try_parse_from(["miruro"]).unwrap().verbose);
        assert!(Cli::try_parse_from(["miruro", "--bogus"]).is_err());
    }
}
