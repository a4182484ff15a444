//! Page features: state, key handling and rendering per route.

pub mod login;
pub mod signup;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use newsapp_core::routes::Route;

use crate::effects::UiEffect;

/// Result of a page handling one key.
#[derive(Debug, Default)]
pub struct PageUpdate {
    pub effects: Vec<UiEffect>,
    pub navigate: Option<Route>,
}

impl PageUpdate {
    pub fn stay() -> Self {
        Self::default()
    }

    pub fn navigate(route: Route) -> Self {
        Self {
            effects: Vec::new(),
            navigate: Some(route),
        }
    }

    pub fn with_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Editing applied to a focused text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TextEdit {
    Insert(String),
    Backspace,
}

impl TextEdit {
    /// Maps a key to an edit, if it is one.
    pub(crate) fn from_key(key: &KeyEvent) -> Option<Self> {
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Char(c) if plain => Some(TextEdit::Insert(c.to_string())),
            KeyCode::Backspace => Some(TextEdit::Backspace),
            _ => None,
        }
    }

    /// Applies the edit to a copy of `value`.
    pub(crate) fn apply(&self, value: &str) -> String {
        let mut next = value.to_string();
        match self {
            TextEdit::Insert(text) => next.push_str(text),
            TextEdit::Backspace => {
                next.pop();
            }
        }
        next
    }
}

/// Pasted text with line breaks removed (all inputs are single-line).
pub(crate) fn paste_edit(text: &str) -> TextEdit {
    TextEdit::Insert(text.replace(['\r', '\n'], ""))
}

/// Steps a list cursor by one within `len` items.
pub(crate) fn step_cursor(cursor: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        0
    } else if forward {
        (cursor + 1).min(len - 1)
    } else {
        cursor.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_edit_from_key() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::SHIFT);
        assert_eq!(
            TextEdit::from_key(&key),
            Some(TextEdit::Insert("a".to_string()))
        );

        let ctrl = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(TextEdit::from_key(&ctrl), None);
    }

    #[test]
    fn test_backspace_pops_one_char() {
        assert_eq!(TextEdit::Backspace.apply("héé"), "hé");
        assert_eq!(TextEdit::Backspace.apply(""), "");
    }

    #[test]
    fn test_paste_strips_newlines() {
        assert_eq!(
            paste_edit("a@b.c\r\n").apply(""),
            "a@b.c".to_string()
        );
    }

    #[test]
    fn test_step_cursor_clamps() {
        assert_eq!(step_cursor(0, 3, false), 0);
        assert_eq!(step_cursor(2, 3, true), 2);
        assert_eq!(step_cursor(1, 3, true), 2);
        assert_eq!(step_cursor(0, 0, true), 0);
    }
}
