//! Command execution.

use super::Command;
use crate::api::QuoteSource;
use crate::error::Result;
use crate::refresh::RefreshScheduler;
use crate::state::{Action, Instrument, OptionContract, OptionKind, Registry, StatusReporter};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;

/// What the interactive loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Exit,
}

/// Runs typed commands against the registry and the scheduler.
///
/// Every failure is reported on the status line; none reaches the caller.
pub struct CommandDispatcher {
    registry: Arc<Registry>,
    source: Arc<dyn QuoteSource>,
    scheduler: RefreshScheduler,
    reporter: StatusReporter,
}

impl CommandDispatcher {
    pub fn new(
        registry: Arc<Registry>,
        source: Arc<dyn QuoteSource>,
        scheduler: RefreshScheduler,
        reporter: StatusReporter,
    ) -> Self {
        Self {
            registry,
            source,
            scheduler,
            reporter,
        }
    }

    /// Parse and run one command line.
    pub async fn dispatch(&self, line: &str) -> CommandOutcome {
        debug!("Dispatching command line {:?}", line);

        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                self.reporter.error(e.to_string());
                return CommandOutcome::Continue;
            }
        };

        let name = command.name().to_string();
        match self.execute(command).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.reporter.error(format!("{} failed: {}", name, e));
                CommandOutcome::Continue
            }
        }
    }

    async fn execute(&self, command: Command) -> Result<CommandOutcome> {
        match command {
            Command::Follow { symbol } => self.follow(symbol).await?,
            Command::Unfollow { identifier } => self.unfollow(&identifier).await?,
            Command::FollowOption {
                underlying,
                expiry,
                strike,
                kind,
            } => self.follow_option(underlying, expiry, strike, kind).await?,
            Command::Refresh => self.refresh(),
            Command::Exit => return Ok(CommandOutcome::Exit),
            Command::Unknown(name) if name.is_empty() => self.reporter.warning("unknown command"),
            Command::Unknown(name) => self
                .reporter
                .warning(format!("unknown command: {}", name)),
        }
        Ok(CommandOutcome::Continue)
    }

    /// Fetch first; only a successfully priced equity is added.
    async fn follow(&self, symbol: String) -> Result<()> {
        let quote = self.source.fetch_equity(&symbol).await?;

        let mut instrument = Instrument::equity(symbol);
        instrument.apply(quote);
        self.reporter.info(format!("following {}", instrument));
        self.registry.add(instrument).await;
        self.publish().await;
        Ok(())
    }

    async fn follow_option(
        &self,
        underlying: String,
        expiry: NaiveDate,
        strike: Decimal,
        kind: OptionKind,
    ) -> Result<()> {
        let option = self
            .source
            .fetch_option(&underlying, expiry, strike, kind)
            .await?;

        let mut instrument = Instrument::option(
            option.contract_symbol,
            OptionContract {
                underlying,
                expiry,
                strike,
                kind,
            },
        );
        instrument.apply(option.quote);

        if instrument.has_baseline() {
            self.reporter.info(format!("following {}", instrument));
        } else {
            self.reporter.warning(format!(
                "following {} (no previous close available)",
                instrument
            ));
        }
        self.registry.add(instrument).await;
        self.publish().await;
        Ok(())
    }

    async fn unfollow(&self, identifier: &str) -> Result<()> {
        let removed = self.registry.remove(identifier).await?;
        self.reporter.info(format!("unfollowed {}", removed.identifier()));
        self.publish().await;
        Ok(())
    }

    fn refresh(&self) {
        if self.scheduler.trigger() {
            self.reporter.info("refreshing");
        } else {
            self.reporter.warning("refresh scheduler is not running");
        }
    }

    /// Send the current rows to the interactive loop.
    async fn publish(&self) {
        self.registry
            .with_rows(|rows| self.reporter.dispatch(Action::InstrumentsUpdated(rows.to_vec())))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockQuoteSource, OptionQuote};
    use crate::error::Error;
    use crate::state::{InstrumentKind, Quote, StatusLevel, StatusMessage};
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct Harness {
        dispatcher: CommandDispatcher,
        registry: Arc<Registry>,
        rx: mpsc::UnboundedReceiver<Action>,
    }

    impl Harness {
        fn new(source: MockQuoteSource) -> Self {
            Self::with_scheduler(source, RefreshScheduler::new())
        }

        fn with_scheduler(source: MockQuoteSource, scheduler: RefreshScheduler) -> Self {
            let (tx, rx) = mpsc::unbounded_channel();
            let registry = Arc::new(Registry::new());
            let dispatcher = CommandDispatcher::new(
                Arc::clone(&registry),
                Arc::new(source),
                scheduler,
                StatusReporter::new(tx),
            );
            Self {
                dispatcher,
                registry,
                rx,
            }
        }

        /// The last status message sent so far.
        fn last_status(&mut self) -> Option<StatusMessage> {
            let mut last = None;
            while let Ok(action) = self.rx.try_recv() {
                if let Action::ShowStatus(status) = action {
                    last = Some(status);
                }
            }
            last
        }
    }

    #[tokio::test]
    async fn test_follow_adds_priced_equity() {
        let mut source = MockQuoteSource::new();
        source
            .expect_fetch_equity()
            .times(1)
            .returning(|_| Ok(Quote::new(dec!(291.5), Some(dec!(290)))));
        let mut harness = Harness::new(source);

        let outcome = harness.dispatcher.dispatch("follow SPY").await;
        assert_eq!(outcome, CommandOutcome::Continue);

        let rows = harness.registry.snapshot().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].identifier(), "SPY");
        assert_eq!(rows[0].price, Some(dec!(291.5)));
        assert_eq!(harness.last_status().unwrap().level, StatusLevel::Info);
    }

    #[tokio::test]
    async fn test_follow_failure_adds_nothing() {
        let mut source = MockQuoteSource::new();
        source
            .expect_fetch_equity()
            .returning(|_| Err(Error::no_quote("unknown symbol NOPE")));
        let mut harness = Harness::new(source);

        harness.dispatcher.dispatch("follow NOPE").await;

        assert!(harness.registry.is_empty().await);
        let status = harness.last_status().unwrap();
        assert_eq!(status.level, StatusLevel::Error);
        assert!(status.message.starts_with("follow failed"));
    }

    #[tokio::test]
    async fn test_followcall_uses_contract_symbol() {
        let mut source = MockQuoteSource::new();
        source
            .expect_fetch_option()
            .times(1)
            .returning(|underlying, expiry, strike, kind| {
                assert_eq!(underlying, "SPY");
                assert_eq!(expiry, NaiveDate::from_ymd_opt(2020, 3, 8).unwrap());
                assert_eq!(strike, dec!(300));
                assert_eq!(kind, OptionKind::Call);
                Ok(OptionQuote {
                    contract_symbol: "SPY200308C00300000".to_string(),
                    quote: Quote::new(dec!(5.25), Some(dec!(5))),
                })
            });
        let harness = Harness::new(source);

        harness
            .dispatcher
            .dispatch("followcall SPY 2020-03-08 300")
            .await;

        let rows = harness.registry.snapshot().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].identifier(), "SPY200308C00300000");
        assert_eq!(rows[0].price, Some(dec!(5.25)));
        assert!(matches!(rows[0].kind(), InstrumentKind::Option(c) if c.underlying == "SPY"));
    }

    #[tokio::test]
    async fn test_followput_without_previous_close_warns() {
        let mut source = MockQuoteSource::new();
        source.expect_fetch_option().returning(|_, _, _, _| {
            Ok(OptionQuote {
                contract_symbol: "SPY200308P00300000".to_string(),
                quote: Quote::new(dec!(12.4), None),
            })
        });
        let mut harness = Harness::new(source);

        harness
            .dispatcher
            .dispatch("followput SPY 2020-03-08 300")
            .await;

        assert_eq!(harness.registry.len().await, 1);
        assert_eq!(harness.last_status().unwrap().level, StatusLevel::Warning);
    }

    #[tokio::test]
    async fn test_bad_strike_is_reported() {
        let mut source = MockQuoteSource::new();
        source.expect_fetch_option().never();
        let mut harness = Harness::new(source);

        let outcome = harness
            .dispatcher
            .dispatch("followcall SPY 2020-03-08 abc")
            .await;

        assert_eq!(outcome, CommandOutcome::Continue);
        assert!(harness.registry.is_empty().await);
        assert_eq!(harness.last_status().unwrap().level, StatusLevel::Error);
    }

    #[tokio::test]
    async fn test_unfollow() {
        let mut harness = Harness::new(MockQuoteSource::new());
        harness.registry.add(Instrument::equity("SPY")).await;

        harness.dispatcher.dispatch("unfollow SPY").await;
        assert!(harness.registry.is_empty().await);

        harness.dispatcher.dispatch("unfollow SPY").await;
        let status = harness.last_status().unwrap();
        assert_eq!(status.level, StatusLevel::Error);
        assert!(status.message.contains("SPY is not followed"));
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let mut harness = Harness::new(MockQuoteSource::new());
        harness.registry.add(Instrument::equity("SPY")).await;

        let outcome = harness.dispatcher.dispatch("bogus").await;
        assert_eq!(outcome, CommandOutcome::Continue);
        assert!(harness.last_status().unwrap().message.contains("unknown command"));
        assert_eq!(harness.registry.len().await, 1);

        harness.dispatcher.dispatch("").await;
        assert_eq!(harness.last_status().unwrap().message, "unknown command");
    }

    #[tokio::test]
    async fn test_exit() {
        let harness = Harness::new(MockQuoteSource::new());
        assert_eq!(harness.dispatcher.dispatch("exit").await, CommandOutcome::Exit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_triggers_scheduler() {
        let fired = Arc::new(AtomicUsize::new(0));
        let (fired_tx, mut fired_rx) = mpsc::unbounded_channel();
        let scheduler = RefreshScheduler::new();
        let counter = Arc::clone(&fired);
        scheduler.start(Duration::from_secs(60), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            let fired_tx = fired_tx.clone();
            async move {
                let _ = fired_tx.send(());
                Ok(())
            }
        });

        let mut harness = Harness::with_scheduler(MockQuoteSource::new(), scheduler.clone());
        harness.dispatcher.dispatch("REFRESH").await;
        fired_rx.recv().await.unwrap();

        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(harness.last_status().unwrap().level, StatusLevel::Info);

        scheduler.stop();
        harness.dispatcher.dispatch("refresh").await;
        assert_eq!(harness.last_status().unwrap().level, StatusLevel::Warning);
    }
}
