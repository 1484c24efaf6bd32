//! Layout dimension constants for TUI rendering.

use std::time::Duration;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width of the y-axis label column, in cells.
///
/// Wide enough for a 10-digit u32 value.
pub const Y_LABEL_WIDTH: u16 = 11;

/// Number of labels drawn on the y axis (top, middle, bottom).
pub const Y_LABEL_COUNT: usize = 3;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 70;

/// Interval between frames (60 Hz).
pub const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Braille dots per terminal cell, horizontally.
pub const DOTS_PER_CELL: usize = 2;
