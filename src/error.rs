//! Error types for the Stonkwatch application.

use thiserror::Error;

/// The main error type for Stonkwatch.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport errors from the quote provider
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider call failed or returned something unusable
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// The provider answered but has nothing matching the request
    #[error("No quote: {0}")]
    NoQuote(String),

    /// An instrument is not in the tracked set
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed command arguments
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Channel communication errors
    #[error("Channel error: {0}")]
    Channel(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new fetch error.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Create a new no-quote error.
    pub fn no_quote(msg: impl Into<String>) -> Self {
        Self::NoQuote(msg.into())
    }

    /// Create a new not-found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }
}
