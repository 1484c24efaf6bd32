//! Scope state machine (pure).
//!
//! Buffer, backlog, auto-scale, cursor and status logic are plain data and
//! functions testable without a terminal or a socket. `ScopeSession` ties
//! them to a `SampleSource` and is driven by the render shell.

pub mod autoscale;
pub mod backlog;
pub mod buffer;
pub mod cursor;
pub mod pause;
pub mod session;
pub mod status;
pub mod throughput;
pub mod viewport;

// Re-export for convenience
pub use autoscale::{auto_scale, needs_rescale, target_range};
pub use backlog::{Backlog, BACKLOG_FACTOR};
pub use buffer::{ScrollingBuffer, DEFAULT_SAMPLE_COUNT};
pub use cursor::{map_cursor, Hover};
pub use pause::{PauseController, Routed, StreamMode, Transition};
pub use session::{ScopeSession, SessionSettings, ViewState};
pub use status::{format_status, StatusContext, StatusLine, StatusTone, TransientMessage};
pub use throughput::ThroughputMeter;
pub use viewport::{AxisRange, Viewport, DEFAULT_INITIAL_Y_MAX};
