//! Scope session: the single owner of all mutable scope state.
//!
//! The render shell calls [`ScopeSession::tick`] once per frame and hands
//! every input event to [`ScopeSession::handle_event`] between frames. Both
//! run on the same thread, so nothing here is shared or locked.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use super::autoscale::auto_scale;
use super::buffer::{ScrollingBuffer, DEFAULT_SAMPLE_COUNT};
use super::cursor::{map_cursor, Hover};
use super::pause::{PauseController, Routed, StreamMode, Transition};
use super::status::{format_status, StatusContext, StatusLine, TransientMessage};
use super::throughput::ThroughputMeter;
use super::viewport::{Viewport, DEFAULT_INITIAL_Y_MAX, PAN_STEP, ZOOM_STEP};
use crate::config::KeyBindings;
use crate::export::{export_snapshot, ExportOutcome};
use crate::model::{ScopeAction, ScopeEvent, WheelDirection};
use crate::source::{LinkState, SampleDecoder, SampleSource};

/// Notice shown when a snapshot is requested while live.
pub const SNAPSHOT_NEEDS_PAUSE: &str = "Snapshot is only available in PAUSE mode.";

/// Notice shown when the visible window holds no samples.
pub const NOTHING_VISIBLE: &str = "No data points visible in the current view.";

/// Construction parameters of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    /// Buffer capacity N.
    pub sample_count: usize,
    /// Initial upper bound of the y axis.
    pub initial_y_max: f64,
    /// Whether auto-scale starts enabled.
    pub auto_scale: bool,
    /// Directory snapshots are written into.
    pub snapshot_dir: PathBuf,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            initial_y_max: DEFAULT_INITIAL_Y_MAX,
            auto_scale: true,
            snapshot_dir: PathBuf::from("."),
        }
    }
}

/// Interaction flags read by the render shell every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    /// Whether auto-scale drives the y range.
    pub auto_scale_enabled: bool,
    /// Sample under the pointer (paused only).
    pub hover: Option<Hover>,
    /// Whether the help overlay is shown.
    pub help_visible: bool,
    /// Whether axis and status chrome are hidden.
    pub fullscreen: bool,
}

/// Source, decoder, buffer, backlog, viewport and view state of one scope.
pub struct ScopeSession<S: SampleSource> {
    source: S,
    decoder: SampleDecoder,
    buffer: ScrollingBuffer,
    pause: PauseController,
    viewport: Viewport,
    view: ViewState,
    throughput: ThroughputMeter,
    message: Option<TransientMessage>,
    key_bindings: KeyBindings,
    snapshot_dir: PathBuf,
}

impl<S: SampleSource> ScopeSession<S> {
    /// New live session reading from `source`.
    pub fn new(source: S, settings: SessionSettings, now: Instant) -> Self {
        let buffer = ScrollingBuffer::new(settings.sample_count);
        let capacity = buffer.capacity();
        let throughput = ThroughputMeter::new(now, source.bytes_received());

        Self {
            source,
            decoder: SampleDecoder::new(),
            buffer,
            pause: PauseController::new(capacity),
            viewport: Viewport::new(capacity, settings.initial_y_max),
            view: ViewState {
                auto_scale_enabled: settings.auto_scale,
                ..ViewState::default()
            },
            throughput,
            message: None,
            key_bindings: KeyBindings::default(),
            snapshot_dir: settings.snapshot_dir,
        }
    }

    /// Replace the default key bindings.
    pub fn with_key_bindings(mut self, key_bindings: KeyBindings) -> Self {
        self.key_bindings = key_bindings;
        self
    }

    /// Scrolling buffer contents.
    pub fn buffer(&self) -> &ScrollingBuffer {
        &self.buffer
    }

    /// Visible x/y ranges.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Interaction flags.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Live or paused.
    pub fn mode(&self) -> StreamMode {
        self.pause.mode()
    }

    /// Whether paused.
    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    /// Samples waiting in the backlog.
    pub fn backlog_len(&self) -> usize {
        self.pause.backlog().len()
    }

    /// Link state of the source.
    pub fn link_state(&self) -> LinkState {
        self.source.link_state()
    }

    /// The sample source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the sample source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Last computed throughput in kB/s.
    pub fn kbps(&self) -> f64 {
        self.throughput.kbps()
    }

    /// Pending notice, if still active at `now`.
    pub fn message(&self, now: Instant) -> Option<&TransientMessage> {
        self.message.as_ref().filter(|m| m.is_active(now))
    }

    /// Directory snapshots are written into.
    pub fn snapshot_dir(&self) -> &Path {
        &self.snapshot_dir
    }

    /// One frame: receive, decode, route, auto-scale, then status bookkeeping.
    pub fn tick(&mut self, now: Instant) {
        if let Some(bytes) = self.source.receive_at(now) {
            let samples = self.decoder.decode(&bytes);
            self.ingest(&samples);
        }

        // A new connection starts word-aligned
        if self.source.link_state() != LinkState::Connected && self.decoder.pending_bytes() > 0 {
            debug!(
                discarded = self.decoder.pending_bytes(),
                "Dropping partial word after disconnect"
            );
            self.decoder.reset();
        }

        self.throughput.update(now, self.source.bytes_received());

        if self.message.as_ref().is_some_and(|m| !m.is_active(now)) {
            self.message = None;
        }
    }

    /// Deliver decoded samples: into the buffer when live, the backlog when paused.
    pub fn ingest(&mut self, samples: &[u32]) {
        match self.pause.route(samples, &mut self.buffer) {
            Routed::Appended => self.apply_auto_scale(),
            Routed::Buffered { dropped } if dropped > 0 => {
                debug!(dropped, "Backlog full, dropped oldest samples");
            }
            Routed::Buffered { .. } | Routed::Empty => {}
        }
    }

    /// Dispatch one input event. Returns true if the application should quit.
    pub fn handle_event(&mut self, event: ScopeEvent, now: Instant) -> bool {
        match event {
            ScopeEvent::PointerMoved { x, .. } => {
                self.update_hover(x);
                false
            }
            ScopeEvent::PointerLeft => {
                self.view.hover = None;
                false
            }
            ScopeEvent::WheelScrolled { direction } => {
                self.disable_auto_scale_if_live();
                let factor = match direction {
                    WheelDirection::Up => ZOOM_STEP,
                    WheelDirection::Down => 1.0 / ZOOM_STEP,
                };
                self.viewport.zoom_y(factor);
                false
            }
            ScopeEvent::ButtonPressed { id } => {
                if id.adjusts_scale() {
                    self.disable_auto_scale_if_live();
                }
                false
            }
            ScopeEvent::KeyPressed { key } => match self.key_bindings.get(key) {
                Some(action) => self.handle_action(action, now),
                None => false,
            },
            ScopeEvent::Resized { width, height } => {
                debug!(width, height, "Resized");
                false
            }
        }
    }

    /// Dispatch one operator action. Returns true if the application should quit.
    pub fn handle_action(&mut self, action: ScopeAction, now: Instant) -> bool {
        if action.is_x_navigation() {
            // The pointer now sits over a different sample until it moves again
            self.view.hover = None;
        }

        match action {
            ScopeAction::TogglePause => self.toggle_pause(),
            ScopeAction::EnableAutoScale => {
                if !self.view.auto_scale_enabled {
                    info!("Auto-scale enabled");
                }
                self.view.auto_scale_enabled = true;
            }
            ScopeAction::Snapshot => self.snapshot(now, Local::now()),
            ScopeAction::ZoomInX => self.viewport.zoom_x(ZOOM_STEP),
            ScopeAction::ZoomOutX => self.viewport.zoom_x(1.0 / ZOOM_STEP),
            ScopeAction::PanLeft => self.viewport.pan_x(-PAN_STEP),
            ScopeAction::PanRight => self.viewport.pan_x(PAN_STEP),
            ScopeAction::ResetX => self.viewport.reset_x(),
            ScopeAction::ToggleFullscreen => self.view.fullscreen = !self.view.fullscreen,
            ScopeAction::ToggleHelp => self.view.help_visible = !self.view.help_visible,
            ScopeAction::Quit => return true,
        }
        false
    }

    /// Export the visible samples as of local time `at` (paused only).
    ///
    /// The outcome is reported through the transient status notice.
    pub fn snapshot(&mut self, now: Instant, at: DateTime<Local>) {
        if !self.pause.is_paused() {
            self.notify(SNAPSHOT_NEEDS_PAUSE, now);
            return;
        }

        match export_snapshot(&self.buffer, self.viewport.x(), &self.snapshot_dir, at) {
            Ok(ExportOutcome::Written { path, .. }) => {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.notify(format!("Snapshot saved to {name}"), now);
            }
            Ok(ExportOutcome::NothingVisible) => self.notify(NOTHING_VISIBLE, now),
            Err(err) => {
                warn!(error = %err, "Snapshot failed");
                self.notify(format!("Failed to save snapshot: {err}"), now);
            }
        }
    }

    /// Status line as of `now`.
    pub fn status_line(&self, now: Instant) -> StatusLine {
        format_status(&StatusContext {
            link: self.source.link_state(),
            paused: self.pause.is_paused(),
            auto_scale: self.view.auto_scale_enabled,
            kbps: self.throughput.kbps(),
            hover: self.view.hover,
            message: self.message.as_ref(),
            now,
        })
    }

    /// Release the source connection.
    pub fn close(&mut self) {
        self.source.close();
    }

    fn toggle_pause(&mut self) {
        match self.pause.toggle(&mut self.buffer) {
            Transition::Paused => info!("Paused"),
            Transition::Resumed { replayed } => {
                info!(replayed, "Resumed");
                self.view.hover = None;
                if replayed > 0 {
                    self.apply_auto_scale();
                }
            }
        }
    }

    fn update_hover(&mut self, x: f64) {
        self.view.hover = if self.pause.is_paused() {
            map_cursor(&self.buffer, x)
        } else {
            None
        };
    }

    fn apply_auto_scale(&mut self) {
        if !self.view.auto_scale_enabled {
            return;
        }
        if let Some(range) = auto_scale(&self.buffer, self.viewport.y()) {
            self.viewport.set_y(range);
        }
    }

    fn disable_auto_scale_if_live(&mut self) {
        if !self.pause.is_paused() && self.view.auto_scale_enabled {
            self.view.auto_scale_enabled = false;
            info!("Auto-scale disabled (manual interaction)");
        }
    }

    fn notify(&mut self, text: impl Into<String>, now: Instant) {
        self.message = Some(TransientMessage::new(text, now));
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
