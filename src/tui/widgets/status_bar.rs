//! Status bar widget: one-line lookup context display.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Data passed to the status bar widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// Label of the active screen.
    pub screen: String,
    /// Host of the record-search service.
    pub host: String,
    /// Records currently displayed.
    pub result_count: usize,
    /// Whether a request is in flight.
    pub searching: bool,
}

/// Renders a one-line status bar.
///
/// Display format (left-aligned, Cyan):
/// - Idle:      `[Search] localhost:3000  12 results`
/// - Searching: `[Search] localhost:3000  12 results  searching…` (marker in Yellow)
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let cyan = Style::default().fg(Color::Cyan);
    let yellow = Style::default().fg(Color::Yellow);

    let noun = if ctx.result_count == 1 {
        "result"
    } else {
        "results"
    };
    let mut spans = vec![
        Span::styled(format!("[{}] ", ctx.screen), cyan),
        Span::styled(ctx.host.clone(), cyan),
        Span::styled(format!("  {} {noun}", ctx.result_count), cyan),
    ];
    if ctx.searching {
        spans.push(Span::styled("  searching\u{2026}", yellow));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
