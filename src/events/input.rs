//! Input event types and key mappings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Simplified key representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    Left,
    Right,
    Home,
    End,
    Other,
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            _ => Key::Other,
        }
    }
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
            shift: mods.contains(KeyModifiers::SHIFT),
        }
    }
}

/// A processed input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        Self {
            key: Key::from(event.code),
            modifiers: Modifiers::from(event.modifiers),
        }
    }
}

impl InputEvent {
    /// The typed character, if this is plain text input.
    pub fn text(&self) -> Option<char> {
        match self.key {
            Key::Char(c) if !self.modifiers.ctrl && !self.modifiers.alt => Some(c),
            _ => None,
        }
    }

    /// Check if this matches a key binding string (e.g., "Ctrl+c", ":", "Enter").
    ///
    /// Shift is not compared for character keys: the character already
    /// carries it (`:` arrives as Shift+`:` on most layouts).
    pub fn matches(&self, binding: &str) -> bool {
        let mut expected_ctrl = false;
        let mut expected_alt = false;
        let mut expected_shift = false;
        let mut expected_key = "";

        for part in binding.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" => expected_ctrl = true,
                "alt" => expected_alt = true,
                "shift" => expected_shift = true,
                _ => expected_key = part,
            }
        }
        let is_char = matches!(self.key, Key::Char(_));
        if self.modifiers.ctrl != expected_ctrl
            || self.modifiers.alt != expected_alt
            || (!is_char && self.modifiers.shift != expected_shift)
        {
            return false;
        }

        match expected_key.to_lowercase().as_str() {
            "enter" => self.key == Key::Enter,
            "esc" | "escape" => self.key == Key::Escape,
            "backspace" => self.key == Key::Backspace,
            "delete" | "del" => self.key == Key::Delete,
            "tab" => self.key == Key::Tab,
            "left" => self.key == Key::Left,
            "right" => self.key == Key::Right,
            "home" => self.key == Key::Home,
            "end" => self.key == Key::End,
            s if s.chars().count() == 1 => {
                if let Some(c) = s.chars().next() {
                    self.key == Key::Char(c) || self.key == Key::Char(c.to_ascii_uppercase())
                } else {
                    false
                }
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(code: KeyCode, modifiers: KeyModifiers) -> InputEvent {
        InputEvent::from(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_colon_with_shift_matches() {
        assert!(event(KeyCode::Char(':'), KeyModifiers::SHIFT).matches(":"));
        assert!(event(KeyCode::Char(':'), KeyModifiers::NONE).matches(":"));
        assert!(!event(KeyCode::Char(';'), KeyModifiers::NONE).matches(":"));
    }

    #[test]
    fn test_ctrl_bindings() {
        assert!(event(KeyCode::Char('c'), KeyModifiers::CONTROL).matches("Ctrl+c"));
        assert!(!event(KeyCode::Char('c'), KeyModifiers::NONE).matches("Ctrl+c"));
        assert!(!event(KeyCode::Char('c'), KeyModifiers::CONTROL).matches("c"));
    }

    #[test]
    fn test_named_keys() {
        assert!(event(KeyCode::Enter, KeyModifiers::NONE).matches("Enter"));
        assert!(event(KeyCode::Esc, KeyModifiers::NONE).matches("esc"));
        assert!(!event(KeyCode::Enter, KeyModifiers::SHIFT).matches("Enter"));
    }

    #[test]
    fn test_text() {
        assert_eq!(event(KeyCode::Char('S'), KeyModifiers::SHIFT).text(), Some('S'));
        assert_eq!(event(KeyCode::Char('s'), KeyModifiers::CONTROL).text(), None);
        assert_eq!(event(KeyCode::Enter, KeyModifiers::NONE).text(), None);
    }
}
