//! Shared contract for upstream pricing sources
//!
//! Each adapter normalizes its own response schema into [`PriceQuote`] /
//! [`BulkPriceTable`] immediately, so schema drift stays isolated to one
//! module per upstream. The resolver only ever sees these traits, which
//! is also what makes it testable against scripted doubles.

use crate::models::{BulkPriceTable, PriceQuote};
use crate::services::market_key::MarketKey;
use async_trait::async_trait;
use chrono::Duration;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum FetchError {
    /// Missing or unusable credential/configuration. Surfaced at client
    /// construction so operators notice at deploy time; a source
    /// reporting this is skipped, other sources are unaffected.
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level failure, including timeouts
    #[error("network error: {0}")]
    Network(String),

    /// Non-success HTTP status other than 429
    #[error("upstream returned HTTP {0}")]
    Status(u16),

    /// 429 from the upstream. Kept distinct from `Status`: it means
    /// "retry later", never "permanently absent".
    #[error("rate limit exceeded")]
    RateLimit,

    /// Unparseable response body
    #[error("parse error: {0}")]
    Parse(String),

    /// Well-formed response with no usable data (explicit failure flag,
    /// empty listings)
    #[error("no data: {0}")]
    NoData(String),
}

impl FetchError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Network(format!("timed out: {}", err))
        } else if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }

    pub(crate) fn from_status(status: reqwest::StatusCode) -> Self {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            FetchError::RateLimit
        } else {
            FetchError::Status(status.as_u16())
        }
    }
}

/// Per-item pricing source
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Short source label for logs
    fn name(&self) -> &'static str;

    /// How long a successful result from this source stays fresh
    fn cache_ttl(&self) -> Duration;

    async fn fetch_price(&self, key: &MarketKey) -> Result<PriceQuote, FetchError>;
}

/// Whole-catalog snapshot source
#[async_trait]
pub trait BulkSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn cache_ttl(&self) -> Duration;

    async fn fetch_all(&self) -> Result<BulkPriceTable, FetchError>;
}
