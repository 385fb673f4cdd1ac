//! Fixed key binding table for the chat screen.
//!
//! The table is built once when the loop starts. Keys without a binding are
//! forwarded to the composer as text editing input.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    InsertNewline,
    DismissNotification,
    ScrollLineUp,
    ScrollLineDown,
    PageUp,
    PageDown,
    ScrollToTop,
    ScrollToBottom,
    Quit,
}

pub struct KeyBindings {
    table: Vec<(KeyCode, KeyModifiers, KeyAction)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        use KeyAction::*;
        let table = vec![
            (KeyCode::Enter, KeyModifiers::NONE, Submit),
            (KeyCode::Enter, KeyModifiers::ALT, InsertNewline),
            (KeyCode::Enter, KeyModifiers::SHIFT, InsertNewline),
            (KeyCode::Char('j'), KeyModifiers::CONTROL, InsertNewline),
            (KeyCode::Esc, KeyModifiers::NONE, DismissNotification),
            (KeyCode::Up, KeyModifiers::CONTROL, ScrollLineUp),
            (KeyCode::Down, KeyModifiers::CONTROL, ScrollLineDown),
            (KeyCode::PageUp, KeyModifiers::NONE, PageUp),
            (KeyCode::PageDown, KeyModifiers::NONE, PageDown),
            (KeyCode::Home, KeyModifiers::CONTROL, ScrollToTop),
            (KeyCode::End, KeyModifiers::CONTROL, ScrollToBottom),
            (KeyCode::Char('c'), KeyModifiers::CONTROL, Quit),
            (KeyCode::Char('d'), KeyModifiers::CONTROL, Quit),
        ];
        Self { table }
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.table
            .iter()
            .find(|(code, modifiers, _)| *code == key.code && *modifiers == key.modifiers)
            .map(|(_, _, action)| *action)
    }
}
