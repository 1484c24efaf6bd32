//! Auto-scale heuristic for the vertical axis.
//!
//! The target range centres the signal and gives it 1.5× headroom. It is
//! only applied when the current view is more than 10 % too tight or more
//! than twice too loose, so a steady signal does not re-range every tick.

use super::buffer::ScrollingBuffer;
use super::viewport::AxisRange;

/// Smallest vertical span ever targeted.
pub const MIN_SPAN: f64 = 100.0;

/// Raw signal spans below this are treated as a flat line.
pub const FLAT_SIGNAL_SPAN: f64 = 1.0;

/// Headroom multiplier: the signal fills about two thirds of the view.
pub const HEADROOM: f64 = 1.5;

/// Re-range when the target is wider than `view_span * TOO_TIGHT`.
pub const TOO_TIGHT: f64 = 1.1;

/// Re-range when the target is narrower than `view_span * TOO_LOOSE`.
pub const TOO_LOOSE: f64 = 0.5;

/// Range that would frame the buffer's current contents.
pub fn target_range(buffer: &ScrollingBuffer) -> AxisRange {
    let (lo, hi) = buffer.min_max();
    let (y_min, y_max) = (f64::from(lo), f64::from(hi));

    let raw_span = y_max - y_min;
    let signal_span = if raw_span < FLAT_SIGNAL_SPAN {
        MIN_SPAN
    } else {
        raw_span
    };
    let target_span = (signal_span * HEADROOM).max(MIN_SPAN);

    AxisRange::centered((y_min + y_max) / 2.0, target_span)
}

/// Whether a view of `view_span` should be replaced by one of `target_span`.
///
/// A non-finite view span always needs replacing.
pub fn needs_rescale(target_span: f64, view_span: f64) -> bool {
    !view_span.is_finite()
        || target_span > view_span * TOO_TIGHT
        || target_span < view_span * TOO_LOOSE
}

/// New y range for `current`, or `None` if it is close enough already.
pub fn auto_scale(buffer: &ScrollingBuffer, current: AxisRange) -> Option<AxisRange> {
    let target = target_range(buffer);
    needs_rescale(target.span(), current.span()).then_some(target)
}
