//! The tracked-instrument registry.

use super::Instrument;
use crate::api::{QuoteSource, fetch_quote};
use crate::error::{Error, Result};
use tokio::sync::Mutex;
use tracing::debug;

/// One instrument that could not be refreshed.
#[derive(Debug)]
pub struct RefreshFailure {
    pub identifier: String,
    pub error: Error,
}

/// Per-instrument outcome of a refresh pass.
#[derive(Debug, Default)]
pub struct RefreshReport {
    /// Identifiers updated in place, in registry order.
    pub refreshed: Vec<String>,
    /// Instruments left untouched.
    pub failures: Vec<RefreshFailure>,
}

impl RefreshReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Ordered, shared collection of tracked instruments.
///
/// Insertion order is display order and duplicates are kept. Every operation
/// takes the same lock, so a refresh pass never sees rows appear or vanish.
#[derive(Debug, Default)]
pub struct Registry {
    instruments: Mutex<Vec<Instrument>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instrument.
    pub async fn add(&self, instrument: Instrument) {
        debug!("Tracking {}", instrument);
        self.instruments.lock().await.push(instrument);
    }

    /// Remove the first instrument whose identifier is `identifier`.
    pub async fn remove(&self, identifier: &str) -> Result<Instrument> {
        let mut instruments = self.instruments.lock().await;
        let index = instruments
            .iter()
            .position(|i| i.identifier() == identifier)
            .ok_or_else(|| Error::not_found(format!("{} is not followed", identifier)))?;
        Ok(instruments.remove(index))
    }

    /// Copy of the current rows.
    pub async fn snapshot(&self) -> Vec<Instrument> {
        self.instruments.lock().await.clone()
    }

    /// Run `f` over the current rows while holding the lock.
    ///
    /// Whatever `f` sends is ordered with every other mutation, so rows
    /// published from here are never older than rows published before.
    pub async fn with_rows<R>(&self, f: impl FnOnce(&[Instrument]) -> R) -> R {
        let instruments = self.instruments.lock().await;
        f(instruments.as_slice())
    }

    pub async fn len(&self) -> usize {
        self.instruments.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.instruments.lock().await.is_empty()
    }

    /// Refresh every instrument in order.
    ///
    /// A failing instrument keeps its old quote and is listed in the report;
    /// the pass always visits every row. Failures are not logged here, the
    /// caller reports them.
    pub async fn refresh_all(&self, source: &dyn QuoteSource) -> RefreshReport {
        let mut instruments = self.instruments.lock().await;
        let mut report = RefreshReport::default();

        for instrument in instruments.iter_mut() {
            match fetch_quote(source, instrument).await {
                Ok(quote) => {
                    instrument.apply(quote);
                    report.refreshed.push(instrument.identifier().to_string());
                }
                Err(error) => {
                    report.failures.push(RefreshFailure {
                        identifier: instrument.identifier().to_string(),
                        error,
                    });
                }
            }
        }

        debug!(
            "Refreshed {} instruments, {} failed",
            report.refreshed.len(),
            report.failures.len()
        );
        report
    }
}
