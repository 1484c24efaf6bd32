//! Help overlay widget displaying keyboard and mouse controls.
//!
//! Shows a centered modal overlay. Triggered and dismissed by '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::styles::{HELP_KEY, HELP_TEXT, MUTED_TEXT, SECTION_HEADER};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, area);

    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content())
        .block(
            Block::default()
                .title(" Controls ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };
    let hint = Paragraph::new(Line::from(vec![Span::styled(
        " Press ? to close ",
        MUTED_TEXT.add_modifier(Modifier::DIM),
    )]))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

/// Rect of `percent_x` × `percent_y` of `area`, centered in it.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

fn entry(keys: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {keys:<12}"), HELP_KEY),
        Span::styled(description, HELP_TEXT),
    ])
}

fn build_help_content() -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled("Stream", SECTION_HEADER)),
        entry("Space", "Pause / resume (backlog replays on resume)"),
        entry("a", "Re-enable auto-scale"),
        entry("d", "Save visible samples (paused only)"),
        Line::default(),
        Line::from(Span::styled("View", SECTION_HEADER)),
        entry("Wheel", "Zoom vertical scale (manual)"),
        entry("+ / -", "Zoom sample window"),
        entry("← / →", "Pan sample window"),
        entry("0", "Show whole buffer"),
        entry("Hover", "Inspect value (paused only)"),
        Line::default(),
        Line::from(Span::styled("Application", SECTION_HEADER)),
        entry("f / F11", "Toggle fullscreen"),
        entry("?", "Toggle this help"),
        entry("q / Esc", "Quit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn rendered_text(width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render_help_overlay(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn centered_rect_calculates_correct_dimensions() {
        let centered = centered_rect(80, 80, Rect::new(0, 0, 100, 50));

        assert_eq!(centered, Rect::new(10, 5, 80, 40));
    }

    #[test]
    fn overlay_lists_stream_controls() {
        let text = rendered_text(100, 40);

        assert!(text.contains("Controls"));
        assert!(text.contains("Pause"));
        assert!(text.contains("auto-scale"));
        assert!(text.contains("Press ? to close"));
    }
}
