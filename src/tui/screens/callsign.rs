//! Single-field callsign lookup screen.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use tokio::time::Instant;

use crate::lookup::{KeyStrategy, SearchSession, SessionEvent};
use crate::model::{Query, is_callsign_char};
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::widgets::form::FIELD_HEIGHT;
use crate::tui::widgets::{Form, FormField, ResultCursor, draw_form, draw_record_list};

/// State for the callsign lookup screen.
///
/// Lookup results carry no FRN, so expand flags are keyed by position.
#[derive(Debug)]
pub struct CallsignLookupState {
    form: Form,
    session: SearchSession,
    cursor: ResultCursor,
}

impl CallsignLookupState {
    pub fn new(quiet: Duration) -> Self {
        Self {
            form: Form::new(vec![FormField::new("Callsign")]),
            session: SearchSession::new(quiet, KeyStrategy::Index),
            cursor: ResultCursor::default(),
        }
    }

    pub fn query(&self) -> Query {
        Query::callsign(self.form.value(0))
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn cursor(&self) -> ResultCursor {
        self.cursor
    }

    fn input_changed(&mut self, now: Instant) {
        let query = self.query();
        self.session.handle(SessionEvent::InputChanged(query), now);
    }
}

impl ScreenState for CallsignLookupState {
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Action {
        match key.code {
            KeyCode::Char(ch) if is_callsign_char(ch) => {
                self.form.insert_char(ch.to_ascii_uppercase());
                self.input_changed(now);
            }
            KeyCode::Backspace => {
                if self.form.delete_char() {
                    self.input_changed(now);
                }
            }
            KeyCode::Up => self.cursor.select_prev(),
            KeyCode::Down => self.cursor.select_next(self.session.results().len()),
            KeyCode::Enter => {
                self.session.toggle(self.cursor.selected());
            }
            KeyCode::F(2) => return Action::Navigate(Screen::Search),
            KeyCode::Esc => return Action::Quit,
            _ => {}
        }
        Action::None
    }

    fn session(&self) -> &SearchSession {
        &self.session
    }

    fn session_mut(&mut self) -> &mut SearchSession {
        &mut self.session
    }

    fn results_replaced(&mut self) {
        self.cursor.reset();
    }
}

/// Renders the callsign lookup screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_callsign(state: &CallsignLookupState, frame: &mut Frame, area: Rect) {
    let [title_area, form_area, results_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let title = Paragraph::new("Callsign Lookup")
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(title, title_area);

    draw_form(state.form(), frame, form_area);
    draw_record_list(state.session(), state.cursor(), frame, results_area);

    let footer = Paragraph::new("↑↓: select  Enter: expand  F2: search  Esc: quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
