//! Quote provider integration.
//!
//! This module defines the `QuoteSource` capability the tracker depends on
//! and its Yahoo Finance implementation.

mod client;
mod converter;
mod source;

pub use client::{ApiClient, ApiClientBuilder};
pub use converter::DataConverter;
pub use source::{OptionQuote, QuoteSource, fetch_quote};

#[cfg(test)]
pub use source::MockQuoteSource;
