//! The quote provider boundary.

use crate::error::Result;
use crate::state::{Instrument, InstrumentKind, OptionKind, Quote};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A quote for a single option contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionQuote {
    /// The provider's symbol for the contract (e.g. `SPY200308C00300000`).
    pub contract_symbol: String,
    pub quote: Quote,
}

/// Something that can price instruments.
///
/// Every call is independent: a failure for one symbol says nothing about
/// any other.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the mid-quote and previous close of an equity.
    async fn fetch_equity(&self, symbol: &str) -> Result<Quote>;

    /// Fetch the mid-quote of the contract at `strike` in the `kind` side of
    /// the `underlying` chain expiring on `expiry`.
    async fn fetch_option(
        &self,
        underlying: &str,
        expiry: NaiveDate,
        strike: Decimal,
        kind: OptionKind,
    ) -> Result<OptionQuote>;
}

/// Fetch a fresh quote for a tracked instrument.
pub async fn fetch_quote(source: &dyn QuoteSource, instrument: &Instrument) -> Result<Quote> {
    match instrument.kind() {
        InstrumentKind::Equity => source.fetch_equity(instrument.identifier()).await,
        InstrumentKind::Option(contract) => source
            .fetch_option(
                &contract.underlying,
                contract.expiry,
                contract.strike,
                contract.kind,
            )
            .await
            .map(|option| option.quote),
    }
}
