//! Actions returned by screen event handlers.

use crossterm::event::KeyEvent;
use tokio::time::Instant;

use super::app::Screen;
use crate::lookup::SearchSession;

/// An action that a screen handler returns to the [`App`](super::App).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Quit the application.
    Quit,
}

/// Common behavior for the lookup screens.
pub trait ScreenState {
    /// Process a key event received at `now` and return an [`Action`].
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Action;

    /// The screen's search session.
    fn session(&self) -> &SearchSession;

    fn session_mut(&mut self) -> &mut SearchSession;

    /// Called after a completion replaced the session's results.
    fn results_replaced(&mut self);
}
