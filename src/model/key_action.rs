//! Domain-level keyboard actions independent of key bindings.

/// Operator intents the session reacts to.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `ScopeAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeAction {
    // Stream control
    /// Freeze the display and buffer incoming samples in the backlog. Default: Space
    TogglePause,
    /// Turn auto-scaling back on after manual zooming. Default: a
    EnableAutoScale,
    /// Export the visible samples to a text file (paused only). Default: d
    Snapshot,

    // Horizontal window
    /// Narrow the visible sample window around its centre. Default: +
    ZoomInX,
    /// Widen the visible sample window around its centre. Default: -
    ZoomOutX,
    /// Move the visible window towards older samples. Default: ←
    PanLeft,
    /// Move the visible window towards newer samples. Default: →
    PanRight,
    /// Show the whole buffer again. Default: 0
    ResetX,

    // Application
    /// Hide or restore the axis and status bar chrome. Default: f/F11
    ToggleFullscreen,
    /// Show help overlay with keyboard shortcuts. Default: ?
    ToggleHelp,
    /// Exit the application. Default: q/Esc/Ctrl+c
    Quit,
}

impl ScopeAction {
    /// Whether this action changes the horizontal viewport.
    pub fn is_x_navigation(self) -> bool {
        matches!(
            self,
            ScopeAction::ZoomInX
                | ScopeAction::ZoomOutX
                | ScopeAction::PanLeft
                | ScopeAction::PanRight
                | ScopeAction::ResetX
        )
    }
}
