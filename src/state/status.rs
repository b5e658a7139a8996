//! Status line messages and the reporter that emits them.

use super::Action;
use chrono::{DateTime, Local};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// A timestamped message for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub message: String,
    pub level: StatusLevel,
    pub at: DateTime<Local>,
}

impl StatusMessage {
    pub fn new(level: StatusLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            at: Local::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Error, message)
    }
}

/// Logs a message and shows it on the status line.
///
/// Cheap to clone; both the interactive loop and the scheduler hold one.
#[derive(Debug, Clone)]
pub struct StatusReporter {
    action_tx: mpsc::UnboundedSender<Action>,
}

impl StatusReporter {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self { action_tx }
    }

    pub fn info(&self, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);
        self.send(StatusMessage::info(message));
    }

    pub fn warning(&self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.send(StatusMessage::warning(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        error!("{}", message);
        self.send(StatusMessage::error(message));
    }

    /// Forward any other action to the interactive loop.
    pub fn dispatch(&self, action: Action) {
        // The receiver only goes away on shutdown.
        let _ = self.action_tx.send(action);
    }

    fn send(&self, status: StatusMessage) {
        self.dispatch(Action::ShowStatus(status));
    }
}
