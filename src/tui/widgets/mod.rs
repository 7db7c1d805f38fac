//! Reusable TUI widgets.

pub mod form;
pub mod record_list;
pub mod status_bar;

pub use form::{Form, FormField, draw_form};
pub use record_list::{ResultCursor, draw_record_list, record_lines};
pub use status_bar::{StatusBarContext, draw_status_bar};

/// Flattens a test buffer into newline-separated rows.
#[cfg(test)]
pub(crate) fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let mut s = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
        }
        s.push('\n');
    }
    s
}
