//! Application-level state.

use super::StatusMessage;

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keystrokes are shortcuts; nothing is echoed.
    #[default]
    Normal,
    /// Typing a `:` command line.
    Command,
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current input mode.
    pub input_mode: InputMode,
    /// Last status line message.
    pub status: Option<StatusMessage>,
    /// Whether a refresh pass is running.
    pub refreshing: bool,
    /// Whether the next draw must clear the whole screen first.
    pub needs_clear: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Current command input.
    pub input_buffer: String,
    /// Cursor position in input buffer, in characters.
    pub cursor_position: usize,
}

impl AppState {
    /// Create a new application state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a command is being typed.
    pub fn is_editing(&self) -> bool {
        self.input_mode == InputMode::Command
    }

    /// Clear the input buffer.
    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    /// Take the typed line and reset the buffer.
    pub fn take_input(&mut self) -> String {
        self.cursor_position = 0;
        std::mem::take(&mut self.input_buffer)
    }

    /// Add a character at the cursor.
    pub fn push_char(&mut self, c: char) {
        let index = self.byte_index();
        self.input_buffer.insert(index, c);
        self.cursor_position += 1;
    }

    /// Remove the character before the cursor.
    pub fn pop_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let index = self.byte_index();
            self.input_buffer.remove(index);
        }
    }

    /// Move cursor left.
    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn cursor_right(&mut self) {
        if self.cursor_position < self.input_buffer.chars().count() {
            self.cursor_position += 1;
        }
    }

    fn byte_index(&self) -> usize {
        self.input_buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_editing() {
        let mut state = AppState::new();
        for c in "folow".chars() {
            state.push_char(c);
        }
        state.cursor_left();
        state.cursor_left();
        state.push_char('l');
        assert_eq!(state.input_buffer, "follow");

        state.cursor_right();
        state.cursor_right();
        state.cursor_right();
        state.pop_char();
        assert_eq!(state.input_buffer, "follo");

        assert_eq!(state.take_input(), "follo");
        assert!(state.input_buffer.is_empty());
        assert_eq!(state.cursor_position, 0);
    }

    #[test]
    fn test_multibyte_input() {
        let mut state = AppState::new();
        state.push_char('é');
        state.push_char('x');
        state.cursor_left();
        state.pop_char();
        assert_eq!(state.input_buffer, "x");
    }
}
