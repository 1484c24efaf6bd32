//! Waveform plot.

use super::constants::{DOTS_PER_CELL, Y_LABEL_COUNT};
use super::layout::{plot_block, ScopeLayout};
use super::styles;
use crate::state::{AxisRange, Hover, ScrollingBuffer, Viewport};
use ratatui::{
    layout::{Alignment, Rect},
    symbols::Marker,
    text::Line as TextLine,
    widgets::{
        canvas::{Canvas, Line, Points},
        Paragraph,
    },
    Frame,
};

/// Visible samples as plot points, reduced to a min/max envelope per column.
///
/// When more samples are visible than there are horizontal dots, each dot
/// column keeps only its extreme values, so spikes stay visible.
pub fn waveform_points(
    buffer: &ScrollingBuffer,
    x: AxisRange,
    columns: usize,
) -> Vec<(f64, f64)> {
    let visible: Vec<(usize, u32)> = buffer.positions_within(x.min, x.max).collect();
    let columns = columns.max(1);

    if visible.len() <= columns * 2 {
        return visible
            .into_iter()
            .map(|(index, value)| (index as f64, f64::from(value)))
            .collect();
    }

    let per_column = visible.len().div_ceil(columns);
    let mut points = Vec::with_capacity(columns * 2);
    for chunk in visible.chunks(per_column) {
        let (mut lo, mut hi) = (chunk[0], chunk[0]);
        for &sample in chunk {
            if sample.1 < lo.1 {
                lo = sample;
            }
            if sample.1 > hi.1 {
                hi = sample;
            }
        }
        // Keep arrival order so the trace does not double back
        let (first, second) = if lo.0 <= hi.0 { (lo, hi) } else { (hi, lo) };
        points.push((first.0 as f64, f64::from(first.1)));
        if second != first {
            points.push((second.0 as f64, f64::from(second.1)));
        }
    }
    points
}

/// Y-axis label texts, top to bottom.
pub fn y_axis_labels(y: AxisRange) -> Vec<String> {
    let steps = (Y_LABEL_COUNT - 1) as f64;
    (0..Y_LABEL_COUNT)
        .map(|i| format!("{:.0}", y.max - y.span() * i as f64 / steps))
        .collect()
}

/// Draw the plot frame, labels, waveform and hover guide.
pub fn render_chart(
    frame: &mut Frame,
    layout: &ScopeLayout,
    buffer: &ScrollingBuffer,
    viewport: &Viewport,
    hover: Option<Hover>,
) {
    if let Some(frame_area) = layout.frame {
        frame.render_widget(plot_block().border_style(styles::PLOT_BORDER), frame_area);
    }
    if let Some(label_area) = layout.y_labels {
        render_y_labels(frame, label_area, viewport.y());
    }

    let plot = layout.plot;
    if plot.width == 0 || plot.height == 0 {
        return;
    }

    let x = viewport.x();
    let y = viewport.y();
    let points = waveform_points(buffer, x, usize::from(plot.width) * DOTS_PER_CELL);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([x.min, x.max])
        .y_bounds([y.min, y.max])
        .paint(move |ctx| {
            for pair in points.windows(2) {
                ctx.draw(&Line {
                    x1: pair[0].0,
                    y1: pair[0].1,
                    x2: pair[1].0,
                    y2: pair[1].1,
                    color: styles::TRACE.fg.unwrap_or_default(),
                });
            }
            if let [(px, py)] = points.as_slice() {
                ctx.draw(&Points {
                    coords: &[(*px, *py)],
                    color: styles::TRACE.fg.unwrap_or_default(),
                });
            }

            if let Some(hover) = hover {
                let hx = hover.index as f64;
                ctx.layer();
                ctx.draw(&Line {
                    x1: hx,
                    y1: y.min,
                    x2: hx,
                    y2: y.max,
                    color: styles::HOVER_GUIDE.fg.unwrap_or_default(),
                });
                ctx.draw(&Points {
                    coords: &[(hx, f64::from(hover.value))],
                    color: styles::HOVER_MARKER.fg.unwrap_or_default(),
                });
            }
        });

    frame.render_widget(canvas, plot);
}

fn render_y_labels(frame: &mut Frame, area: Rect, y: AxisRange) {
    if area.height == 0 {
        return;
    }
    let labels = y_axis_labels(y);
    let last_row = area.height.saturating_sub(1);

    for (i, label) in labels.iter().enumerate() {
        let row = match i {
            0 => 0,
            i if i + 1 == labels.len() => last_row,
            _ => last_row / 2,
        };
        let cell = Rect {
            y: area.y + row,
            height: 1,
            width: area.width.saturating_sub(1),
            ..area
        };
        frame.render_widget(
            Paragraph::new(TextLine::styled(label.clone(), styles::AXIS_LABEL))
                .alignment(Alignment::Right),
            cell,
        );
    }
}
