//! Yahoo Finance quote client.

use super::{DataConverter, OptionQuote, QuoteSource};
use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::state::{OptionKind, Quote};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// Builder for creating a quote client.
pub struct ApiClientBuilder {
    config: ProviderConfig,
}

impl ApiClientBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: ProviderConfig::default(),
        }
    }

    /// Set the provider configuration.
    pub fn config(mut self, config: ProviderConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ApiClient> {
        ApiClient::new(self.config)
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Quote client backed by the Yahoo Finance options endpoint.
///
/// The same endpoint serves both lookups: its `quote` object carries the
/// underlying's bid/ask and its `options` array carries the chain.
pub struct ApiClient {
    config: ProviderConfig,
    http: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl ApiClient {
    /// Create a new client.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(config.rate_limit))),
            config,
            http,
        })
    }

    fn options_url(&self, symbol: &str) -> String {
        format!(
            "{}/v7/finance/options/{}",
            self.config.base_url.trim_end_matches('/'),
            symbol
        )
    }

    async fn get_chain(&self, symbol: &str, expiry: Option<NaiveDate>) -> Result<String> {
        self.rate_limit().await;

        let mut request = self.http.get(self.options_url(symbol));
        if let Some(expiry) = expiry {
            request = request.query(&[("date", expiry_timestamp(expiry))]);
        }

        debug!("Requesting chain for {} (expiry {:?})", symbol, expiry);
        let response = request.send().await?;
        check_status(symbol, response.status())?;
        Ok(response.text().await?)
    }

    async fn rate_limit(&self) {
        let mut limiter = self.rate_limiter.lock().await;
        limiter.wait().await;
    }
}

#[async_trait]
impl QuoteSource for ApiClient {
    async fn fetch_equity(&self, symbol: &str) -> Result<Quote> {
        let body = self.get_chain(symbol, None).await?;
        DataConverter::equity_quote(symbol, DataConverter::parse(&body)?)
    }

    async fn fetch_option(
        &self,
        underlying: &str,
        expiry: NaiveDate,
        strike: Decimal,
        kind: OptionKind,
    ) -> Result<OptionQuote> {
        let body = self.get_chain(underlying, Some(expiry)).await?;
        DataConverter::option_quote(underlying, strike, kind, DataConverter::parse(&body)?)
    }
}

/// Map an unsuccessful HTTP status to an error. Yahoo answers unknown
/// symbols with 404.
fn check_status(symbol: &str, status: StatusCode) -> Result<()> {
    if status == StatusCode::NOT_FOUND {
        return Err(Error::no_quote(format!("unknown symbol {}", symbol)));
    }
    if !status.is_success() {
        return Err(Error::fetch(format!("{} returned HTTP {}", symbol, status)));
    }
    Ok(())
}

/// Unix timestamp of midnight UTC on `expiry`, the form the chain endpoint expects.
fn expiry_timestamp(expiry: NaiveDate) -> i64 {
    expiry
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

/// Simple rate limiter.
struct RateLimiter {
    requests_per_second: u32,
    last_request: Instant,
    tokens: f64,
}

impl RateLimiter {
    fn new(requests_per_second: u32) -> Self {
        let requests_per_second = requests_per_second.max(1);
        Self {
            requests_per_second,
            last_request: Instant::now(),
            tokens: requests_per_second as f64,
        }
    }

    async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed().as_secs_f64();

        // Replenish tokens
        self.tokens = (self.tokens + elapsed * self.requests_per_second as f64)
            .min(self.requests_per_second as f64);

        if self.tokens < 1.0 {
            let wait_time = (1.0 - self.tokens) / self.requests_per_second as f64;
            tokio::time::sleep(Duration::from_secs_f64(wait_time)).await;
            self.tokens = 1.0;
        }

        self.tokens -= 1.0;
        self.last_request = Instant::now();
    }
}
