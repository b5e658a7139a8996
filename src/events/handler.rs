//! Event handler for processing input events.

use super::InputEvent;
use crate::config::KeyBindings;
use crate::error::Result;
use crate::state::{Action, InputMode, Store};
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};
use std::time::Duration;

/// Turns terminal events into actions.
pub struct EventHandler {
    /// Key bindings.
    keybindings: KeyBindings,
    /// How long to wait for an event before yielding.
    tick_rate: Duration,
    /// Input mode as of the last store snapshot.
    input_mode: InputMode,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new(keybindings: KeyBindings, tick_rate: Duration) -> Self {
        Self {
            keybindings,
            tick_rate,
            input_mode: InputMode::Normal,
        }
    }

    /// Update the store snapshot for mode-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.input_mode = store.app.input_mode;
    }

    /// Get the next action from user input.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        if event::poll(self.tick_rate)? {
            return Ok(self.handle_event(event::read()?));
        }
        Ok(None)
    }

    /// Map a terminal event to an action.
    pub fn handle_event(&self, event: CrosstermEvent) -> Option<Action> {
        match event {
            CrosstermEvent::Key(key) => self.handle_key(key),
            CrosstermEvent::Resize(width, height) => Some(Action::Resize(width, height)),
            _ => None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let input = InputEvent::from(key);
        if input.matches(&self.keybindings.quit) {
            return Some(Action::Quit);
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode(input),
            InputMode::Command => self.handle_command_mode(key, input),
        }
    }

    fn handle_normal_mode(&self, input: InputEvent) -> Option<Action> {
        if input.matches(&self.keybindings.command) {
            return Some(Action::EnterCommandMode);
        }
        None
    }

    fn handle_command_mode(&self, key: KeyEvent, input: InputEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::CancelCommand),
            KeyCode::Enter => Some(Action::SubmitCommand),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Left => Some(Action::CursorLeft),
            KeyCode::Right => Some(Action::CursorRight),
            _ => input.text().map(Action::InputChar),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc;

    fn handler_in(mode: InputMode) -> EventHandler {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut store = Store::new(tx);
        store.app.input_mode = mode;

        let mut handler = EventHandler::new(KeyBindings::default(), Duration::from_millis(10));
        handler.update_store_snapshot(&store);
        handler
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_normal_mode() {
        let handler = handler_in(InputMode::Normal);
        assert!(matches!(
            handler.handle_event(key(KeyCode::Char(':'), KeyModifiers::SHIFT)),
            Some(Action::EnterCommandMode)
        ));
        assert!(handler
            .handle_event(key(KeyCode::Char('f'), KeyModifiers::NONE))
            .is_none());
        assert!(matches!(
            handler.handle_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn test_command_mode() {
        let handler = handler_in(InputMode::Command);
        assert!(matches!(
            handler.handle_event(key(KeyCode::Char(':'), KeyModifiers::SHIFT)),
            Some(Action::InputChar(':'))
        ));
        assert!(matches!(
            handler.handle_event(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Action::SubmitCommand)
        ));
        assert!(matches!(
            handler.handle_event(key(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Action::CancelCommand)
        ));
        assert!(matches!(
            handler.handle_event(key(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(Action::InputBackspace)
        ));
        assert!(matches!(
            handler.handle_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn test_resize() {
        let handler = handler_in(InputMode::Normal);
        assert!(matches!(
            handler.handle_event(CrosstermEvent::Resize(120, 40)),
            Some(Action::Resize(120, 40))
        ));
    }
}
