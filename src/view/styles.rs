//! Colours of the scope display.

use crate::state::StatusTone;
use ratatui::style::{Color, Modifier, Style};

/// Waveform trace.
pub const TRACE: Style = Style::new().fg(Color::Cyan);

/// Hover guide line.
pub const HOVER_GUIDE: Style = Style::new().fg(Color::DarkGray);

/// Hover marker.
pub const HOVER_MARKER: Style = Style::new().fg(Color::Yellow);

/// Axis labels.
pub const AXIS_LABEL: Style = Style::new().fg(Color::DarkGray);

/// Plot border.
pub const PLOT_BORDER: Style = Style::new().fg(Color::Gray);

/// Help category header.
pub const SECTION_HEADER: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Help key column.
pub const HELP_KEY: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Help description column.
pub const HELP_TEXT: Style = Style::new().fg(Color::White);

/// De-emphasised text.
pub const MUTED_TEXT: Style = Style::new().fg(Color::DarkGray);

const ORANGE: Color = Color::Rgb(0xFF, 0xA5, 0x00);

/// Status bar style for a status tone.
pub fn status_style(tone: StatusTone) -> Style {
    let color = match tone {
        StatusTone::Disconnected => Color::Red,
        StatusTone::Connecting => Color::Yellow,
        StatusTone::Paused => ORANGE,
        StatusTone::Connected => Color::Green,
        StatusTone::Notice => Color::Cyan,
    };
    Style::new().fg(color).add_modifier(Modifier::BOLD)
}
