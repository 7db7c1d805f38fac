//! Multi-field search screen: callsign, first name, and last name.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use tokio::time::Instant;

use crate::lookup::{KeyStrategy, SearchSession, SessionEvent};
use crate::model::{Query, SearchCriteria};
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::widgets::form::FIELD_HEIGHT;
use crate::tui::widgets::{Form, FormField, ResultCursor, draw_form, draw_record_list};

/// Field index for the callsign.
const CALLSIGN: usize = 0;
/// Field index for the first name.
const FIRST_NAME: usize = 1;
/// Field index for the last name.
const LAST_NAME: usize = 2;

/// State for the search screen.
#[derive(Debug)]
pub struct SearchFormState {
    form: Form,
    session: SearchSession,
    cursor: ResultCursor,
}

impl SearchFormState {
    /// Creates an empty search form whose queries wait `quiet` after the last keystroke.
    pub fn new(quiet: Duration) -> Self {
        Self {
            form: Form::new(vec![
                FormField::new("Callsign"),
                FormField::new("First Name"),
                FormField::new("Last Name"),
            ]),
            session: SearchSession::new(quiet, KeyStrategy::Identity),
            cursor: ResultCursor::default(),
        }
    }

    /// The query for the current combined values of all three fields.
    pub fn query(&self) -> Query {
        Query::Search(SearchCriteria::new(
            self.form.value(CALLSIGN),
            self.form.value(FIRST_NAME),
            self.form.value(LAST_NAME),
        ))
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

impl ScreenState for SearchFormState {
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Action {
        match key.code {
            KeyCode::Tab => self.form.focus_next(),
            KeyCode::BackTab => self.form.focus_prev(),
            KeyCode::Char(ch) => {
                let ch = if self.form.focus() == CALLSIGN {
                    ch.to_ascii_uppercase()
                } else {
                    ch
                };
                self.form.insert_char(ch);
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
            KeyCode::F(2) => return Action::Navigate(Screen::Callsign),
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

/// Renders the search screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_search(state: &SearchFormState, frame: &mut Frame, area: Rect) {
    let form_height = FIELD_HEIGHT * state.form().fields().len() as u16;
    let [title_area, form_area, results_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(form_height),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let title = Paragraph::new("FCC Search")
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(title, title_area);

    draw_form(state.form(), frame, form_area);
    draw_record_list(state.session(), state.cursor(), frame, results_area);

    let footer = Paragraph::new("Tab: next field  ↑↓: select  Enter: expand  F2: callsign lookup  Esc: quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    use super::*;
    use crate::lookup::{Completion, Effect, Phase};
    use crate::model::LicenseRecord;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn type_str(state: &mut SearchFormState, text: &str, now: Instant) {
        for ch in text.chars() {
            state.handle_key(press(KeyCode::Char(ch)), now);
        }
    }

    fn record(call: &str, frn: &str) -> LicenseRecord {
        LicenseRecord {
            call_sign: call.into(),
            frn: frn.into(),
            first_name: "Hiram".into(),
            last_name: "Maxim".into(),
            call_count: 1,
            ..LicenseRecord::default()
        }
    }

    /// Types `text`, lets the debounce elapse, and answers with `records`.
    fn search_and_answer(state: &mut SearchFormState, text: &str, records: Vec<LicenseRecord>) {
        let start = Instant::now();
        type_str(state, text, start);
        let effect = state
            .session_mut()
            .handle(SessionEvent::DebounceElapsed, start + ms(250));
        let Effect::Dispatch(request) = effect else {
            panic!("expected Dispatch, got {effect:?}");
        };
        state.session_mut().handle(
            SessionEvent::ResponseArrived(Completion {
                token: request.token,
                result: Ok(records),
            }),
            start + ms(300),
        );
        state.results_replaced();
    }

    mod input {
        use super::*;

        #[test]
        fn callsign_is_uppercased() {
            let mut state = SearchFormState::new(ms(250));
            type_str(&mut state, "w1aw", Instant::now());
            assert_eq!(state.form().value(CALLSIGN), "W1AW");
        }

        #[test]
        fn names_keep_case() {
            let mut state = SearchFormState::new(ms(250));
            state.handle_key(press(KeyCode::Tab), Instant::now());
            type_str(&mut state, "Hiram", Instant::now());
            assert_eq!(state.form().value(FIRST_NAME), "Hiram");
        }

        #[test]
        fn query_combines_all_fields() {
            let mut state = SearchFormState::new(ms(250));
            let now = Instant::now();
            type_str(&mut state, "w1", now);
            state.handle_key(press(KeyCode::Tab), now);
            state.handle_key(press(KeyCode::Tab), now);
            type_str(&mut state, "Maxim", now);
            assert_eq!(
                state.query(),
                Query::Search(SearchCriteria::new("W1", "", "Maxim"))
            );
        }

        #[test]
        fn typing_starts_debounce() {
            let mut state = SearchFormState::new(ms(250));
            let now = Instant::now();
            state.handle_key(press(KeyCode::Char('W')), now);
            assert_eq!(state.session().phase(), Phase::AwaitingDebounce);
            assert_eq!(state.session().deadline(), Some(now + ms(250)));
        }

        #[test]
        fn backspace_on_empty_field_does_not_schedule() {
            let mut state = SearchFormState::new(ms(250));
            state.handle_key(press(KeyCode::Backspace), Instant::now());
            assert_eq!(state.session().phase(), Phase::Idle);
        }

        #[test]
        fn debounced_query_uses_latest_values() {
            let mut state = SearchFormState::new(ms(250));
            let start = Instant::now();
            type_str(&mut state, "W1A", start);
            state.handle_key(press(KeyCode::Backspace), start + ms(100));
            let effect = state
                .session_mut()
                .handle(SessionEvent::DebounceElapsed, start + ms(350));
            let Effect::Dispatch(request) = effect else {
                panic!("expected Dispatch, got {effect:?}");
            };
            assert_eq!(request.query, Query::Search(SearchCriteria::new("W1", "", "")));
        }

        #[test]
        fn clearing_all_fields_keeps_results() {
            let mut state = SearchFormState::new(ms(250));
            search_and_answer(&mut state, "W", vec![record("W1AW", "1")]);

            let start = Instant::now();
            state.handle_key(press(KeyCode::Backspace), start);
            let effect = state
                .session_mut()
                .handle(SessionEvent::DebounceElapsed, start + ms(250));
            assert!(matches!(effect, Effect::None));
            assert_eq!(state.session().results().len(), 1);
        }
    }

    mod results {
        use super::*;

        #[test]
        fn enter_toggles_selected_record_only() {
            let mut state = SearchFormState::new(ms(250));
            search_and_answer(&mut state, "W1", vec![record("W1AW", "1"), record("W1XYZ", "2")]);

            state.handle_key(press(KeyCode::Down), Instant::now());
            state.handle_key(press(KeyCode::Enter), Instant::now());
            assert!(!state.session().is_expanded(0));
            assert!(state.session().is_expanded(1));

            state.handle_key(press(KeyCode::Enter), Instant::now());
            assert!(!state.session().is_expanded(1));
        }

        #[test]
        fn enter_with_no_results_is_noop() {
            let mut state = SearchFormState::new(ms(250));
            assert_eq!(state.handle_key(press(KeyCode::Enter), Instant::now()), Action::None);
            assert!(!state.session().is_expanded(0));
        }

        #[test]
        fn new_results_reset_cursor() {
            let mut state = SearchFormState::new(ms(250));
            search_and_answer(&mut state, "W1", vec![record("W1AW", "1"), record("W1XYZ", "2")]);
            state.handle_key(press(KeyCode::Down), Instant::now());
            assert_eq!(state.cursor().selected(), 1);

            search_and_answer(&mut state, "A", vec![record("W1AWA", "3")]);
            assert_eq!(state.cursor().selected(), 0);
        }

        #[test]
        fn down_stops_at_last_result() {
            let mut state = SearchFormState::new(ms(250));
            search_and_answer(&mut state, "W1", vec![record("W1AW", "1")]);
            state.handle_key(press(KeyCode::Down), Instant::now());
            assert_eq!(state.cursor().selected(), 0);
        }
    }

    mod navigation {
        use super::*;

        #[test]
        fn f2_goes_to_callsign_lookup() {
            let mut state = SearchFormState::new(ms(250));
            assert_eq!(
                state.handle_key(press(KeyCode::F(2)), Instant::now()),
                Action::Navigate(Screen::Callsign)
            );
        }

        #[test]
        fn esc_quits() {
            let mut state = SearchFormState::new(ms(250));
            assert_eq!(state.handle_key(press(KeyCode::Esc), Instant::now()), Action::Quit);
        }

        #[test]
        fn tab_cycles_fields() {
            let mut state = SearchFormState::new(ms(250));
            state.handle_key(press(KeyCode::Tab), Instant::now());
            assert_eq!(state.form().focus(), FIRST_NAME);
            state.handle_key(press(KeyCode::BackTab), Instant::now());
            state.handle_key(press(KeyCode::BackTab), Instant::now());
            assert_eq!(state.form().focus(), LAST_NAME);
        }
    }

    mod rendering {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        use super::*;
        use crate::tui::widgets::buffer_to_string;

        fn render(state: &SearchFormState) -> String {
            let backend = TestBackend::new(100, 24);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|frame| draw_search(state, frame, frame.area()))
                .unwrap();
            buffer_to_string(terminal.backend().buffer())
        }

        #[test]
        fn renders_fields_and_empty_results() {
            let output = render(&SearchFormState::new(ms(250)));
            assert!(output.contains("FCC Search"));
            assert!(output.contains("Callsign"));
            assert!(output.contains("First Name"));
            assert!(output.contains("Last Name"));
            assert!(output.contains("No results"));
        }

        #[test]
        fn renders_collapsed_and_expanded_records() {
            let mut state = SearchFormState::new(ms(250));
            let expanded = LicenseRecord {
                city: "Newington".into(),
                state: "CT".into(),
                operator_class: "E".into(),
                call_count: 2,
                call_history: "W1AW,K1OLD".into(),
                ..record("W1AW", "1")
            };
            search_and_answer(&mut state, "W1", vec![expanded, record("W1XYZ", "2")]);
            state.handle_key(press(KeyCode::Enter), Instant::now());

            let output = render(&state);
            assert!(output.contains("Hiram Maxim (W1AW)"));
            assert!(output.contains("Location: Newington, CT"));
            assert!(output.contains("Class: Amateur Extra"));
            assert!(output.contains("1 Prior Callsign: K1OLD"));
            assert!(output.contains("Hiram Maxim (W1XYZ)"));
        }
    }
}
