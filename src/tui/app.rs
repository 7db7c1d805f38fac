use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::client::RecordSource;
use crate::lookup::{Completion, Dispatcher, Effect, Request, Resolution, SessionEvent};

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::screens::{CallsignLookupState, SearchFormState, draw_callsign, draw_search};
use super::widgets::{StatusBarContext, draw_status_bar};

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Multi-field search by callsign and name.
    Search,
    /// Records for a single callsign.
    Callsign,
}

impl Screen {
    /// Human-readable label for the status bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::Callsign => "Callsign",
        }
    }
}

/// The mounted screen and its state. Each screen owns its own session.
#[derive(Debug)]
enum ActiveScreen {
    Search(SearchFormState),
    Callsign(CallsignLookupState),
}

impl ActiveScreen {
    fn mount(screen: Screen, quiet: Duration) -> Self {
        match screen {
            Screen::Search => Self::Search(SearchFormState::new(quiet)),
            Screen::Callsign => Self::Callsign(CallsignLookupState::new(quiet)),
        }
    }

    fn screen(&self) -> Screen {
        match self {
            Self::Search(_) => Screen::Search,
            Self::Callsign(_) => Screen::Callsign,
        }
    }

    fn state(&self) -> &dyn ScreenState {
        match self {
            Self::Search(state) => state,
            Self::Callsign(state) => state,
        }
    }

    fn state_mut(&mut self) -> &mut dyn ScreenState {
        match self {
            Self::Search(state) => state,
            Self::Callsign(state) => state,
        }
    }
}

/// Top-level application state.
pub struct App {
    active: ActiveScreen,
    quiet: Duration,
    host: String,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` starting on the [`Screen::Search`] screen.
    ///
    /// `quiet` is the debounce period for both screens; `host` is shown in
    /// the status bar.
    pub fn new(quiet: Duration, host: impl Into<String>) -> Self {
        Self {
            active: ActiveScreen::mount(Screen::Search, quiet),
            quiet,
            host: host.into(),
            should_quit: false,
        }
    }

    /// Main event loop: draw, then wait for a key, a debounce deadline, or
    /// a completed request.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub async fn run<B: Backend, S: RecordSource + 'static>(
        &mut self,
        terminal: &mut Terminal<B>,
        source: S,
    ) -> Result<(), AppError> {
        let (tx, mut completions) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(source, tx);
        let mut events = EventStream::new();

        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            let deadline = self.active.state().session().deadline();

            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) => self.handle_key(key, Instant::now()),
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err.into()),
                    None => break,
                },
                () = wait_until(deadline) => {
                    if let Some(request) = self.debounce_elapsed(Instant::now()) {
                        dispatcher.dispatch(request);
                    }
                }
                Some(completion) = completions.recv() => {
                    self.apply_completion(completion, Instant::now());
                }
            }
        }

        self.active.state_mut().session_mut().teardown();
        Ok(())
    }

    /// Renders the status bar, the active screen, and nothing else.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [status_area, body_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());

        draw_status_bar(&self.status(), frame, status_area);
        match &self.active {
            ActiveScreen::Search(state) => draw_search(state, frame, body_area),
            ActiveScreen::Callsign(state) => draw_callsign(state, frame, body_area),
        }
    }

    /// Handles a key event: global keys first, then screen-specific.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.active.state_mut().handle_key(key, now) {
            Action::None => {}
            Action::Navigate(screen) => self.navigate(screen),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Unmounts the current screen and mounts `screen` with a fresh session.
    /// The outgoing session's pending debounce and in-flight request are
    /// cancelled.
    pub fn navigate(&mut self, screen: Screen) {
        if self.active.screen() == screen {
            return;
        }
        self.active.state_mut().session_mut().teardown();
        tracing::debug!(from = self.active.screen().label(), to = screen.label(), "navigate");
        self.active = ActiveScreen::mount(screen, self.quiet);
    }

    /// Delivers a debounce tick to the active session. Returns the request
    /// to dispatch, if one was issued.
    pub fn debounce_elapsed(&mut self, now: Instant) -> Option<Request> {
        match self
            .active
            .state_mut()
            .session_mut()
            .handle(SessionEvent::DebounceElapsed, now)
        {
            Effect::Dispatch(request) => {
                tracing::debug!(token = %request.token, query = ?request.query, "dispatching");
                Some(request)
            }
            _ => None,
        }
    }

    /// Routes a completed request to the active session.
    pub fn apply_completion(&mut self, completion: Completion, now: Instant) -> Option<Resolution> {
        let state = self.active.state_mut();
        match state
            .session_mut()
            .handle(SessionEvent::ResponseArrived(completion), now)
        {
            Effect::Resolved(resolution) => {
                if let Resolution::Applied(_) = resolution {
                    state.results_replaced();
                }
                Some(resolution)
            }
            _ => None,
        }
    }

    /// Status bar content for the current state.
    pub fn status(&self) -> StatusBarContext {
        let session = self.active.state().session();
        StatusBarContext {
            screen: self.active.screen().label().to_string(),
            host: self.host.clone(),
            result_count: session.results().len(),
            searching: session.is_searching(),
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.active.screen()
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

/// Resolves at `deadline`, or never when there is none.
async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
