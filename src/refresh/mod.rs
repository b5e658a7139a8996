//! Background refreshing of the tracked instruments.

mod scheduler;

pub use scheduler::{RefreshScheduler, SchedulerState};

use crate::api::QuoteSource;
use crate::state::{Action, RefreshReport, Registry, StatusReporter};
use std::sync::Arc;

/// One refresh pass over the registry, reported to the interactive loop.
#[derive(Clone)]
pub struct RefreshJob {
    registry: Arc<Registry>,
    source: Arc<dyn QuoteSource>,
    reporter: StatusReporter,
}

impl RefreshJob {
    pub fn new(
        registry: Arc<Registry>,
        source: Arc<dyn QuoteSource>,
        reporter: StatusReporter,
    ) -> Self {
        Self {
            registry,
            source,
            reporter,
        }
    }

    /// Refresh every instrument, report each failure on the status line and
    /// publish the new rows.
    pub async fn run(&self) -> RefreshReport {
        self.reporter.dispatch(Action::RefreshStarted);

        let report = self.registry.refresh_all(self.source.as_ref()).await;
        for failure in &report.failures {
            self.reporter.error(format!(
                "failed to refresh {}: {}",
                failure.identifier, failure.error
            ));
        }
        if report.is_clean() && !report.refreshed.is_empty() {
            self.reporter
                .info(format!("refreshed {} instruments", report.refreshed.len()));
        }

        self.registry
            .with_rows(|rows| self.reporter.dispatch(Action::InstrumentsUpdated(rows.to_vec())))
            .await;
        self.reporter.dispatch(Action::RefreshFinished);
        report
    }
}
