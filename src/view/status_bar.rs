//! Bottom status line.

use super::styles::status_style;
use crate::state::StatusLine;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Draw the status line into `area`, coloured by its tone.
pub fn render_status_bar(frame: &mut Frame, area: Rect, status: &StatusLine) {
    let line = Line::styled(status.text.clone(), status_style(status.tone));
    frame.render_widget(Paragraph::new(line), area);
}
