//! Screen layout and pointer mapping.
//!
//! The layout is computed once per frame and kept by the app so mouse events
//! arriving between frames map against the geometry the user actually sees.

use super::constants::{STATUS_BAR_HEIGHT, Y_LABEL_WIDTH};
use crate::state::Viewport;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

/// Title of the plot border.
pub const PLOT_TITLE: &str = " RTT Scope ";

/// Areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeLayout {
    /// Bordered plot frame (hidden in fullscreen).
    pub frame: Option<Rect>,
    /// Area the waveform is drawn into.
    pub plot: Rect,
    /// Column left of the plot holding y-axis labels.
    pub y_labels: Option<Rect>,
    /// Status line.
    pub status: Option<Rect>,
}

/// Plot border block.
pub fn plot_block() -> Block<'static> {
    Block::default().title(PLOT_TITLE).borders(Borders::ALL)
}

/// Split `area` into plot, label column and status bar.
///
/// Fullscreen gives the whole area to the plot.
pub fn compute_layout(area: Rect, fullscreen: bool) -> ScopeLayout {
    if fullscreen {
        return ScopeLayout {
            frame: None,
            plot: area,
            y_labels: None,
            status: None,
        };
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(STATUS_BAR_HEIGHT)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(Y_LABEL_WIDTH), Constraint::Min(1)])
        .split(rows[0]);

    let frame = columns[1];
    let plot = plot_block().inner(frame);
    let y_labels = Rect {
        y: plot.y,
        height: plot.height,
        ..columns[0]
    };

    ScopeLayout {
        frame: Some(frame),
        plot,
        y_labels: Some(y_labels),
        status: Some(rows[1]),
    }
}

/// Map a terminal cell to data coordinates (x = buffer position, y = value).
///
/// Returns `None` outside the plot. Cells map through their centre.
pub fn pointer_to_data(
    plot: Rect,
    viewport: &Viewport,
    column: u16,
    row: u16,
) -> Option<(f64, f64)> {
    if plot.width == 0 || plot.height == 0 {
        return None;
    }
    if column < plot.x || column >= plot.right() || row < plot.y || row >= plot.bottom() {
        return None;
    }

    let x_range = viewport.x();
    let y_range = viewport.y();
    let fx = (f64::from(column - plot.x) + 0.5) / f64::from(plot.width);
    let fy = (f64::from(row - plot.y) + 0.5) / f64::from(plot.height);

    Some((
        x_range.min + fx * x_range.span(),
        y_range.max - fy * y_range.span(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_reserves_status_and_labels() {
        let layout = compute_layout(Rect::new(0, 0, 80, 24), false);

        assert_eq!(layout.status, Some(Rect::new(0, 23, 80, 1)));
        assert_eq!(layout.frame, Some(Rect::new(11, 0, 69, 23)));
        assert_eq!(layout.plot, Rect::new(12, 1, 67, 21));
        assert_eq!(layout.y_labels, Some(Rect::new(0, 1, 11, 21)));
    }

    #[test]
    fn fullscreen_gives_everything_to_plot() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = compute_layout(area, true);

        assert_eq!(layout.plot, area);
        assert_eq!(layout.status, None);
        assert_eq!(layout.frame, None);
    }

    #[test]
    fn pointer_maps_cell_centres() {
        let plot = Rect::new(10, 0, 10, 10);
        let viewport = Viewport::new(100, 1000.0);

        let (x, y) = pointer_to_data(plot, &viewport, 10, 0).unwrap();
        assert_eq!(x, 5.0);
        assert_eq!(y, 950.0);

        let (x, y) = pointer_to_data(plot, &viewport, 19, 9).unwrap();
        assert_eq!(x, 95.0);
        assert_eq!(y, 50.0);
    }

    #[test]
    fn pointer_outside_plot_is_none() {
        let plot = Rect::new(10, 5, 10, 10);
        let viewport = Viewport::new(100, 1000.0);

        assert_eq!(pointer_to_data(plot, &viewport, 9, 6), None);
        assert_eq!(pointer_to_data(plot, &viewport, 20, 6), None);
        assert_eq!(pointer_to_data(plot, &viewport, 12, 4), None);
        assert_eq!(pointer_to_data(plot, &viewport, 12, 15), None);
    }

    #[test]
    fn pointer_follows_zoomed_viewport() {
        let plot = Rect::new(0, 0, 10, 10);
        let mut viewport = Viewport::new(100, 1000.0);
        viewport.zoom_x(2.0);

        let (x, _) = pointer_to_data(plot, &viewport, 0, 0).unwrap();
        assert_eq!(x, 27.5);
    }
}
