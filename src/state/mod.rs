//! State management for Stonkwatch.
//!
//! The tracked instruments live in the shared [`Registry`]. The interactive
//! loop keeps a [`Store`] holding the last rows it was told about plus UI
//! state, and updates it by reducing [`Action`]s, whether they come from
//! keystrokes or from the background refresher.

mod app_state;
mod instrument;
mod registry;
mod status;

pub use app_state::{AppState, InputMode};
pub use instrument::{Instrument, InstrumentKind, OptionContract, OptionKind, Quote};
pub use registry::{RefreshFailure, RefreshReport, Registry};
pub use status::{StatusLevel, StatusMessage, StatusReporter};

use crate::error::Result;
use chrono::{DateTime, Local};
use tokio::sync::mpsc;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Command line
    EnterCommandMode,
    CancelCommand,
    InputChar(char),
    InputBackspace,
    CursorLeft,
    CursorRight,
    SubmitCommand,

    // Instruments
    InstrumentsUpdated(Vec<Instrument>),
    RefreshStarted,
    RefreshFinished,

    // Status line
    ShowStatus(StatusMessage),

    // Terminal
    Resize(u16, u16),

    // Quit
    Quit,
}

/// The interactive loop's state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Rows as of the last registry snapshot.
    pub instruments: Vec<Instrument>,
    /// When the last refresh pass finished.
    pub last_refreshed: Option<DateTime<Local>>,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a new store with the given action sender.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            app: AppState::new(),
            instruments: Vec::new(),
            last_refreshed: None,
            action_tx,
        }
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Command line
            Action::EnterCommandMode => {
                self.app.clear_input();
                self.app.input_mode = InputMode::Command;
            }
            Action::CancelCommand | Action::SubmitCommand => {
                self.app.clear_input();
                self.app.input_mode = InputMode::Normal;
            }
            Action::InputChar(c) => {
                if self.app.is_editing() {
                    self.app.push_char(c);
                }
            }
            Action::InputBackspace => self.app.pop_char(),
            Action::CursorLeft => self.app.cursor_left(),
            Action::CursorRight => self.app.cursor_right(),

            // Instruments
            Action::InstrumentsUpdated(instruments) => {
                self.instruments = instruments;
            }
            Action::RefreshStarted => self.app.refreshing = true,
            Action::RefreshFinished => {
                self.app.refreshing = false;
                self.last_refreshed = Some(Local::now());
                self.app.needs_clear = true;
            }

            // Status line
            Action::ShowStatus(status) => self.app.status = Some(status),

            // Terminal
            Action::Resize(_, _) => self.app.needs_clear = true,

            // Quit
            Action::Quit => self.app.should_quit = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx)
    }

    #[test]
    fn test_command_mode_round_trip() {
        let mut store = store();
        store.reduce(Action::InputChar('x'));
        assert!(store.app.input_buffer.is_empty());

        store.reduce(Action::EnterCommandMode);
        for c in "refresh".chars() {
            store.reduce(Action::InputChar(c));
        }
        assert_eq!(store.app.input_mode, InputMode::Command);
        assert_eq!(store.app.input_buffer, "refresh");

        store.reduce(Action::CancelCommand);
        assert_eq!(store.app.input_mode, InputMode::Normal);
        assert!(store.app.input_buffer.is_empty());
    }

    #[test]
    fn test_refresh_cycle() {
        let mut store = store();
        store.reduce(Action::RefreshStarted);
        assert!(store.app.refreshing);

        store.reduce(Action::InstrumentsUpdated(vec![
            Instrument::equity("SPY").with_quote(dec!(291.5), dec!(291.5)),
        ]));
        store.reduce(Action::RefreshFinished);

        assert!(!store.app.refreshing);
        assert!(store.app.needs_clear);
        assert!(store.last_refreshed.is_some());
        assert_eq!(store.instruments.len(), 1);
    }

    #[test]
    fn test_status_replaces_previous() {
        let mut store = store();
        store.reduce(Action::ShowStatus(StatusMessage::info("first")));
        store.reduce(Action::ShowStatus(StatusMessage::error("second")));

        let status = store.app.status.as_ref().unwrap();
        assert_eq!(status.message, "second");
        assert_eq!(status.level, StatusLevel::Error);
    }

    #[test]
    fn test_resize_and_quit() {
        let mut store = store();
        store.reduce(Action::Resize(80, 24));
        assert!(store.app.needs_clear);

        store.reduce(Action::Quit);
        assert!(store.app.should_quit);
    }

    #[test]
    fn test_dispatch_fails_after_receiver_dropped() {
        let store = store();
        assert!(matches!(
            store.dispatch(Action::Quit),
            Err(crate::Error::Channel(_))
        ));
    }
}
