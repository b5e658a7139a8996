//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, the refresh scheduler, and rendering.

use crate::api::{ApiClientBuilder, QuoteSource};
use crate::commands::{CommandDispatcher, CommandOutcome};
use crate::config::Config;
use crate::error::Result;
use crate::events::EventHandler;
use crate::refresh::{RefreshJob, RefreshScheduler};
use crate::state::{Action, Registry, StatusMessage, StatusReporter, Store};
use crate::ui::Ui;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Renderer.
    ui: Ui,
    /// Event handler.
    event_handler: EventHandler,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Command dispatcher.
    dispatcher: CommandDispatcher,
    /// Background refresher.
    scheduler: RefreshScheduler,
    /// The pass the scheduler runs.
    refresh_job: RefreshJob,
    /// Configuration.
    config: Config,
}

impl App {
    /// Create a new application.
    pub fn new(config: Config) -> Result<Self> {
        let client = ApiClientBuilder::new()
            .config(config.provider.clone())
            .build()?;
        let source: Arc<dyn QuoteSource> = Arc::new(client);

        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let store = Store::new(action_tx.clone());
        let reporter = StatusReporter::new(action_tx);

        let registry = Arc::new(Registry::new());
        let scheduler = RefreshScheduler::new();
        let refresh_job = RefreshJob::new(
            Arc::clone(&registry),
            Arc::clone(&source),
            reporter.clone(),
        );
        let dispatcher = CommandDispatcher::new(registry, source, scheduler.clone(), reporter);

        let event_handler = EventHandler::new(
            config.keybindings.clone(),
            Duration::from_millis(config.ui.tick_rate_ms),
        );

        Ok(Self {
            terminal,
            store,
            ui: Ui::new(config.ui.clone()),
            event_handler,
            action_rx,
            dispatcher,
            scheduler,
            refresh_job,
            config,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        let job = self.refresh_job.clone();
        self.scheduler
            .start(self.config.refresh.period(), move || {
                let job = job.clone();
                async move {
                    job.run().await;
                    Ok(())
                }
            });

        self.store.dispatch(Action::ShowStatus(StatusMessage::info(format!(
            "type {}follow <symbol> to track an equity",
            self.config.keybindings.command
        ))))?;

        // Main event loop
        loop {
            // Update event handler with current state
            self.event_handler.update_store_snapshot(&self.store);

            // Full redraw after a resize or a refresh pass
            if self.store.app.needs_clear {
                self.terminal.clear()?;
                self.store.app.needs_clear = false;
            }

            // Render UI
            self.terminal.draw(|frame| {
                self.ui.render(frame, &self.store);
            })?;

            // Handle events and actions
            tokio::select! {
                // Handle terminal events
                result = self.event_handler.next() => {
                    if let Some(action) = result? {
                        self.handle_action(action).await;
                    }
                }

                // Handle actions from the channel
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action).await;
                }
            }

            // Check if we should quit
            if self.store.app.should_quit {
                break;
            }
        }

        info!("Exiting");
        Ok(())
    }

    /// Handle an action.
    async fn handle_action(&mut self, action: Action) {
        match action {
            Action::SubmitCommand => {
                let line = self.store.app.take_input();
                self.store.reduce(Action::SubmitCommand);

                if self.dispatcher.dispatch(&line).await == CommandOutcome::Exit {
                    self.store.reduce(Action::Quit);
                }
            }
            _ => {
                // Let the store handle the action
                self.store.reduce(action);
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
