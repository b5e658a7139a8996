//! Yahoo Finance payloads and their conversion to quotes.

use super::OptionQuote;
use crate::error::{Error, Result};
use crate::state::{OptionKind, Quote};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Top-level response of `/v7/finance/options/{symbol}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    pub option_chain: OptionChain,
}

#[derive(Debug, Deserialize)]
pub struct OptionChain {
    /// `null` when the provider reports an error.
    #[serde(default)]
    pub result: Option<Vec<ChainResult>>,
    pub error: Option<ProviderError>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderError {
    pub code: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainResult {
    pub underlying_symbol: Option<String>,
    pub quote: Option<UnderlyingQuote>,
    #[serde(default)]
    pub options: Vec<ExpiryChain>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnderlyingQuote {
    pub symbol: Option<String>,
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
    pub regular_market_price: Option<Decimal>,
    pub regular_market_previous_close: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct ExpiryChain {
    #[serde(default)]
    pub calls: Vec<ContractRow>,
    #[serde(default)]
    pub puts: Vec<ContractRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRow {
    pub contract_symbol: String,
    pub strike: Decimal,
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
    pub last_price: Option<Decimal>,
    pub change: Option<Decimal>,
}

/// Converts provider responses to quotes.
pub struct DataConverter;

impl DataConverter {
    /// Parse a raw response body.
    pub fn parse(body: &str) -> Result<OptionsResponse> {
        Ok(serde_json::from_str(body)?)
    }

    /// Extract the underlying's quote.
    pub fn equity_quote(symbol: &str, response: OptionsResponse) -> Result<Quote> {
        let result = Self::single_result(symbol, response)?;
        let quote = result
            .quote
            .ok_or_else(|| Error::no_quote(format!("{} has no quote", symbol)))?;

        let price = mid_price(quote.bid, quote.ask)
            .or(quote.regular_market_price)
            .ok_or_else(|| Error::no_quote(format!("{} has no bid/ask", symbol)))?;

        Ok(Quote::new(price, quote.regular_market_previous_close))
    }

    /// Extract the contract at `strike` on the `kind` side of the chain.
    pub fn option_quote(
        underlying: &str,
        strike: Decimal,
        kind: OptionKind,
        response: OptionsResponse,
    ) -> Result<OptionQuote> {
        let result = Self::single_result(underlying, response)?;
        let chain = result.options.into_iter().next().ok_or_else(|| {
            Error::no_quote(format!("{} has no options for that expiry", underlying))
        })?;

        let rows = match kind {
            OptionKind::Call => chain.calls,
            OptionKind::Put => chain.puts,
        };

        let row = rows
            .into_iter()
            .find(|row| row.strike == strike)
            .ok_or_else(|| {
                Error::no_quote(format!("{} has no {} at strike {}", underlying, kind, strike))
            })?;

        let price = mid_price(row.bid, row.ask)
            .or(row.last_price)
            .ok_or_else(|| {
                Error::no_quote(format!("{} has no bid/ask", row.contract_symbol))
            })?;

        // The chain reports today's change, not the prior close.
        let previous_close = match (row.last_price, row.change) {
            (Some(last), Some(change)) => Some(last - change),
            _ => None,
        };

        Ok(OptionQuote {
            contract_symbol: row.contract_symbol,
            quote: Quote::new(price, previous_close),
        })
    }

    fn single_result(symbol: &str, response: OptionsResponse) -> Result<ChainResult> {
        if let Some(error) = response.option_chain.error {
            let not_found = error
                .code
                .as_deref()
                .is_some_and(|code| code.eq_ignore_ascii_case("not found"));
            let description = error
                .description
                .or(error.code)
                .unwrap_or_else(|| "unknown provider error".to_string());

            return Err(if not_found {
                Error::no_quote(format!("unknown symbol {}: {}", symbol, description))
            } else {
                Error::fetch(format!("{}: {}", symbol, description))
            });
        }

        response
            .option_chain
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| Error::no_quote(format!("unknown symbol {}", symbol)))
    }
}

/// Average of bid and ask, when both sides are quoted.
fn mid_price(bid: Option<Decimal>, ask: Option<Decimal>) -> Option<Decimal> {
    match (bid, ask) {
        (Some(bid), Some(ask)) if bid > Decimal::ZERO && ask > Decimal::ZERO => {
            Some((bid + ask) / Decimal::TWO)
        }
        _ => None,
    }
}
