pub mod grid;
pub mod home;
pub mod preferences;
pub mod search;
pub mod watch;

use iced::Task;

use miruro_core::models::Anime;
use miruro_core::routes::Route;

use crate::app;

/// A cover download the app should start: anime id and cover URL.
pub type CoverRequest = (String, Option<String>);

/// Actions that a screen can request from the app router.
///
/// Screens return these from `update()` instead of directly mutating
/// shared state; the app interprets them in one place.
pub enum Action {
    /// No side-effect.
    None,
    /// Go to another route.
    Navigate(Route),
    /// Open the watch page of an anime already on screen.
    Open(Anime),
    /// Run an async Iced task that eventually produces an app::Message.
    RunTask(Task<app::Message>),
    /// Download covers for freshly loaded cards.
    RequestCovers(Vec<CoverRequest>),
    /// Update the status bar message.
    SetStatus(String),
}
