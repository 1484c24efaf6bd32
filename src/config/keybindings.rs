//! Keyboard bindings configuration.

use crate::model::key_action::ScopeAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to scope actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, ScopeAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only code and modifiers take part in the lookup. Character keys are
    /// case-insensitive: SHIFT is ignored and letters are looked up in lower
    /// case, so `A` (Shift or Caps Lock) acts like `a`. Terminals also
    /// disagree on whether symbols such as `?` or `+` carry SHIFT.
    pub fn get(&self, key: KeyEvent) -> Option<ScopeAction> {
        let normalized = match key.code {
            KeyCode::Char(c) => KeyEvent::new(
                KeyCode::Char(c.to_ascii_lowercase()),
                key.modifiers.difference(KeyModifiers::SHIFT),
            ),
            code => KeyEvent::new(code, key.modifiers),
        };
        self.bindings.get(&normalized).copied()
    }

    /// Bind `key` to `action`, replacing any previous binding.
    pub fn bind(&mut self, key: KeyEvent, action: ScopeAction) {
        self.bindings.insert(key, action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        // Stream control
        bindings.insert(
            KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE),
            ScopeAction::TogglePause,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE),
            ScopeAction::EnableAutoScale,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE),
            ScopeAction::Snapshot,
        );

        // Horizontal window
        bindings.insert(
            KeyEvent::new(KeyCode::Char('+'), KeyModifiers::NONE),
            ScopeAction::ZoomInX,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('='), KeyModifiers::NONE),
            ScopeAction::ZoomInX,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('-'), KeyModifiers::NONE),
            ScopeAction::ZoomOutX,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Left, KeyModifiers::NONE),
            ScopeAction::PanLeft,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Right, KeyModifiers::NONE),
            ScopeAction::PanRight,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('0'), KeyModifiers::NONE),
            ScopeAction::ResetX,
        );

        // Application controls
        bindings.insert(
            KeyEvent::new(KeyCode::Char('f'), KeyModifiers::NONE),
            ScopeAction::ToggleFullscreen,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::F(11), KeyModifiers::NONE),
            ScopeAction::ToggleFullscreen,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE),
            ScopeAction::ToggleHelp,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            ScopeAction::Quit,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            ScopeAction::Quit,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            ScopeAction::Quit,
        );

        Self { bindings }
    }
}
