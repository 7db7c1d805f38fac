//! Expandable record list: one headline per record, details when expanded.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::lookup::SearchSession;
use crate::model::LicenseRecord;

/// Highlighted row in a result list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultCursor {
    selected: usize,
}

impl ResultCursor {
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Moves up by one (no wrap).
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves down by one, stopping at the last of `len` rows.
    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }
}

/// Text lines for one record.
///
/// Collapsed: `First Last (CALL)`. Expanded adds location, class, grant date,
/// status and expiry when known, and the prior-callsign summary when the
/// operator has held more than one callsign.
pub fn record_lines(record: &LicenseRecord, expanded: bool) -> Vec<String> {
    let mut lines = vec![record.headline()];
    if !expanded {
        return lines;
    }
    lines.push(format!("  Location: {}, {}", record.city, record.state));
    lines.push(format!("  Class: {}", record.operator_class().label()));
    lines.push(format!("  Granted: {}", record.grant_date));
    if let Some(status) = record.license_status() {
        lines.push(format!("  Status: {}", status.label()));
    }
    if !record.expired_date.is_empty() {
        lines.push(format!("  Expires: {}", record.expired_date));
    }
    if !record.cancellation_date.is_empty() {
        lines.push(format!("  Cancelled: {}", record.cancellation_date));
    }
    if let Some(summary) = record.history_summary() {
        lines.push(format!("  {summary}"));
    }
    lines
}

/// Renders the session's results with the cursor row highlighted.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_record_list(session: &SearchSession, cursor: ResultCursor, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Results ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if session.results().is_empty() {
        let paragraph = Paragraph::new(vec![Line::from(""), Line::from("No results")])
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = session
        .results()
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let lines: Vec<Line> = record_lines(record, session.is_expanded(i))
                .into_iter()
                .map(Line::from)
                .collect();
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default().with_selected(Some(cursor.selected()));
    frame.render_stateful_widget(list, area, &mut state);
}
