//! Input events delivered by the render shell to the session.
//!
//! The shell reduces terminal mouse/keyboard/resize events to this closed
//! set before handing them to the core. Pointer coordinates are already in
//! data space (x = buffer position, y = sample value).

use crossterm::event::KeyEvent;

/// Pointer button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left button.
    Primary,
    /// Right button (pan/zoom drag in most plot viewers).
    Secondary,
    /// Middle button (pan/zoom drag in most plot viewers).
    Tertiary,
}

impl PointerButton {
    /// Whether pressing this button is a manual scale interaction.
    pub fn adjusts_scale(self) -> bool {
        matches!(self, PointerButton::Secondary | PointerButton::Tertiary)
    }
}

/// Wheel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelDirection {
    /// Wheel rolled away from the user (zoom in).
    Up,
    /// Wheel rolled towards the user (zoom out).
    Down,
}

/// One input event, as seen by the core.
#[derive(Debug, Clone, PartialEq)]
pub enum ScopeEvent {
    /// Pointer moved inside the plot.
    PointerMoved {
        /// Buffer-space x coordinate.
        x: f64,
        /// Value-space y coordinate.
        y: f64,
    },
    /// Pointer moved outside the plot area.
    PointerLeft,
    /// Mouse wheel rolled over the plot.
    WheelScrolled {
        /// Roll direction.
        direction: WheelDirection,
    },
    /// Mouse button pressed.
    ButtonPressed {
        /// Which button.
        id: PointerButton,
    },
    /// Key pressed.
    KeyPressed {
        /// Raw key event, mapped to an action through `KeyBindings`.
        key: KeyEvent,
    },
    /// Terminal resized. Layout only, no data effect.
    Resized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}
