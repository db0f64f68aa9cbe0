//! Keyboard bindings configuration.

use crate::model::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to wall actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }

    /// Bind `code` with `modifiers` to `action`, replacing any previous binding.
    pub fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;

        keys.bind(KeyCode::Char('m'), none, KeyAction::ShowMore);
        keys.bind(KeyCode::Char('r'), none, KeyAction::Relayout);

        keys.bind(KeyCode::Tab, none, KeyAction::FocusNext);
        keys.bind(KeyCode::Char('j'), none, KeyAction::FocusNext);
        keys.bind(KeyCode::Down, none, KeyAction::FocusNext);
        keys.bind(KeyCode::BackTab, KeyModifiers::SHIFT, KeyAction::FocusPrev);
        keys.bind(KeyCode::Char('k'), none, KeyAction::FocusPrev);
        keys.bind(KeyCode::Up, none, KeyAction::FocusPrev);

        keys.bind(KeyCode::Enter, none, KeyAction::OpenFocused);
        keys.bind(KeyCode::Esc, none, KeyAction::CloseModal);

        keys.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn defaults_cover_wall_actions() {
        let keys = KeyBindings::default();
        let none = KeyModifiers::NONE;
        assert_eq!(keys.get(key(KeyCode::Char('m'), none)), Some(KeyAction::ShowMore));
        assert_eq!(keys.get(key(KeyCode::Char('r'), none)), Some(KeyAction::Relayout));
        assert_eq!(keys.get(key(KeyCode::Char('q'), none)), Some(KeyAction::Quit));
        assert_eq!(
            keys.get(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            keys.get(key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(KeyAction::FocusPrev)
        );
    }

    #[test]
    fn modifiers_distinguish_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(keys.get(key(KeyCode::Char('m'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn bind_replaces_existing() {
        let mut keys = KeyBindings::default();
        keys.bind(KeyCode::Char('m'), KeyModifiers::NONE, KeyAction::Relayout);
        assert_eq!(
            keys.get(key(KeyCode::Char('m'), KeyModifiers::NONE)),
            Some(KeyAction::Relayout)
        );
    }
}
