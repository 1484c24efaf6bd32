//! TUI rendering and terminal management (impure shell)
//!
//! Owns the terminal and the 60 Hz frame clock. Terminal events are reduced
//! to `ScopeEvent`s and handed to the session; every frame ticks the session
//! and redraws.

pub mod chart;
pub mod constants;
mod help;
pub mod layout;
mod status_bar;
mod styles;

pub use chart::{render_chart, waveform_points, y_axis_labels};
pub use help::render_help_overlay;
pub use layout::{compute_layout, pointer_to_data, ScopeLayout};
pub use status_bar::render_status_bar;
pub use styles::status_style;

use crate::model::{PointerButton, ScopeEvent, WheelDirection};
use crate::source::SampleSource;
use crate::state::ScopeSession;
use constants::FRAME_INTERVAL;
use crossterm::{
    event::{self, Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use std::io::{self, Stdout};
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct ScopeApp<B, S>
where
    B: ratatui::backend::Backend,
    S: SampleSource,
{
    terminal: Terminal<B>,
    session: ScopeSession<S>,
    /// Layout of the last drawn frame (for pointer mapping)
    last_layout: Option<ScopeLayout>,
}

impl<S: SampleSource> ScopeApp<CrosstermBackend<Stdout>, S> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture
    pub fn new(session: ScopeSession<S>) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self {
            terminal,
            session,
            last_layout: None,
        })
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Input is handled as it arrives; the
    /// session is ticked and the screen redrawn once per frame interval.
    pub fn run(&mut self) -> Result<(), TuiError> {
        let mut next_frame = Instant::now();

        loop {
            let now = Instant::now();
            if now >= next_frame {
                self.session.tick(now);
                self.draw(now)?;
                next_frame = now + FRAME_INTERVAL;
                continue;
            }

            if event::poll(next_frame - now)? {
                let event = event::read()?;
                if self.handle_terminal_event(event, Instant::now()) {
                    return Ok(());
                }
            }
        }
    }
}

impl<B, S> ScopeApp<B, S>
where
    B: ratatui::backend::Backend,
    S: SampleSource,
{
    /// Create an app around an existing terminal (any backend)
    pub fn with_terminal(terminal: Terminal<B>, session: ScopeSession<S>) -> Self {
        Self {
            terminal,
            session,
            last_layout: None,
        }
    }

    /// The session driven by this app
    pub fn session(&self) -> &ScopeSession<S> {
        &self.session
    }

    /// Mutable access to the session
    pub fn session_mut(&mut self) -> &mut ScopeSession<S> {
        &mut self.session
    }

    /// The terminal (for inspecting a test backend)
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Handle one terminal event
    ///
    /// Returns true if app should quit
    pub fn handle_terminal_event(&mut self, event: Event, now: Instant) -> bool {
        match event {
            // Release/repeat events would double-toggle pause on some terminals
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.session.handle_event(ScopeEvent::KeyPressed { key }, now)
            }
            Event::Mouse(mouse) => match self.map_mouse(mouse) {
                Some(scope_event) => self.session.handle_event(scope_event, now),
                None => false,
            },
            Event::Resize(width, height) => {
                self.last_layout = None;
                self.session
                    .handle_event(ScopeEvent::Resized { width, height }, now)
            }
            _ => false,
        }
    }

    /// Reduce a mouse event to a scope event, mapping the pointer through the
    /// last drawn plot area
    fn map_mouse(&self, mouse: MouseEvent) -> Option<ScopeEvent> {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let layout = self.last_layout?;
                Some(
                    match pointer_to_data(
                        layout.plot,
                        self.session.viewport(),
                        mouse.column,
                        mouse.row,
                    ) {
                        Some((x, y)) => ScopeEvent::PointerMoved { x, y },
                        None => ScopeEvent::PointerLeft,
                    },
                )
            }
            MouseEventKind::ScrollUp => Some(ScopeEvent::WheelScrolled {
                direction: WheelDirection::Up,
            }),
            MouseEventKind::ScrollDown => Some(ScopeEvent::WheelScrolled {
                direction: WheelDirection::Down,
            }),
            MouseEventKind::Down(button) => Some(ScopeEvent::ButtonPressed {
                id: match button {
                    MouseButton::Left => PointerButton::Primary,
                    MouseButton::Right => PointerButton::Secondary,
                    MouseButton::Middle => PointerButton::Tertiary,
                },
            }),
            _ => None,
        }
    }

    /// Render the current frame
    pub fn draw(&mut self, now: Instant) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        let layout = compute_layout(area, self.session.view().fullscreen);
        self.last_layout = Some(layout);

        let session = &self.session;
        self.terminal.draw(|frame| render_scope(frame, session, &layout, now))?;
        Ok(())
    }
}

/// Draw one frame of the scope
pub fn render_scope<S: SampleSource>(
    frame: &mut Frame,
    session: &ScopeSession<S>,
    layout: &ScopeLayout,
    now: Instant,
) {
    render_chart(
        frame,
        layout,
        session.buffer(),
        session.viewport(),
        session.view().hover,
    );

    if let Some(status_area) = layout.status {
        render_status_bar(frame, status_area, &session.status_line(now));
    }

    if session.view().help_visible {
        render_help_overlay(frame);
    }
}

/// Initialize and run the TUI for `session`
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// even when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_session<S: SampleSource>(session: ScopeSession<S>) -> Result<(), TuiError> {
    let mut app = ScopeApp::new(session)?;

    let result = app.run();
    app.session_mut().close();
    debug!("Event loop finished");

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
