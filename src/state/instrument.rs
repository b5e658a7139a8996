//! Tracked instruments: equities and option contracts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionKind {
    Call,
    Put,
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

/// The contract terms of a tracked option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Ticker whose option chain the contract belongs to.
    pub underlying: String,
    /// Expiration date.
    pub expiry: NaiveDate,
    /// Strike price.
    pub strike: Decimal,
    /// Call or put.
    pub kind: OptionKind,
}

/// What kind of instrument is being tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstrumentKind {
    Equity,
    Option(OptionContract),
}

/// A freshly fetched quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Mid-quote (average of best bid and best ask).
    pub price: Decimal,
    /// Prior regular-session close, when the provider reports one.
    pub previous_close: Option<Decimal>,
}

impl Quote {
    pub fn new(price: Decimal, previous_close: Option<Decimal>) -> Self {
        Self {
            price,
            previous_close,
        }
    }
}

/// A tracked equity or option contract.
///
/// Equality compares `identifier` only, so an option and an equity with the
/// same identifier are equal. `unfollow` relies on this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instrument {
    identifier: String,
    /// Latest mid-quote, `None` until the first successful fetch.
    pub price: Option<Decimal>,
    /// Baseline for the percent change, `None` when unknown.
    pub previous_close: Option<Decimal>,
    kind: InstrumentKind,
}

impl Instrument {
    /// Create an equity with no quote yet.
    pub fn equity(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            price: None,
            previous_close: None,
            kind: InstrumentKind::Equity,
        }
    }

    /// Create an option contract with no quote yet.
    ///
    /// `identifier` is the provider's contract symbol.
    pub fn option(identifier: impl Into<String>, contract: OptionContract) -> Self {
        Self {
            identifier: identifier.into(),
            price: None,
            previous_close: None,
            kind: InstrumentKind::Option(contract),
        }
    }

    /// Set the quote fields directly.
    pub fn with_quote(mut self, price: Decimal, previous_close: Decimal) -> Self {
        self.price = Some(price);
        self.previous_close = Some(previous_close);
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn kind(&self) -> &InstrumentKind {
        &self.kind
    }

    /// Overwrite price and previous close with a fresh quote.
    pub fn apply(&mut self, quote: Quote) {
        self.price = Some(quote.price);
        self.previous_close = quote.previous_close;
    }

    /// Whether both the price and the previous close are known.
    ///
    /// A zero previous close is known: its percent change is zero.
    pub fn has_baseline(&self) -> bool {
        self.price.is_some() && self.previous_close.is_some()
    }

    /// Percent change from the previous close.
    ///
    /// Zero when the previous close is zero or either side is unset.
    pub fn percent_change(&self) -> Decimal {
        match (self.price, self.previous_close) {
            (Some(price), Some(close)) if !close.is_zero() => {
                (price / close - Decimal::ONE) * Decimal::ONE_HUNDRED
            }
            _ => Decimal::ZERO,
        }
    }
}

impl PartialEq for Instrument {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for Instrument {}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            InstrumentKind::Equity => write!(f, "{}", self.identifier),
            InstrumentKind::Option(c) => write!(
                f,
                "{} ({} {} {} {})",
                self.identifier, c.underlying, c.expiry, c.strike, c.kind
            ),
        }
    }
}
