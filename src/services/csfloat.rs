//! CSFloat listings client
//!
//! One request per market hash name, asking for the single lowest-priced
//! active listing. Requires an API key (`CSFLOAT_API_KEY`); a missing
//! key is a configuration error raised at construction, not a
//! per-request failure. Prices arrive in integer cents; the reference
//! block carries a predicted price and the live listing count.

use crate::constants::{CSFLOAT_BASE_URL, CSFLOAT_LISTINGS_TTL_MINUTES, UPSTREAM_TIMEOUT_SECS};
use crate::models::PriceQuote;
use crate::services::market_key::MarketKey;
use crate::services::upstream::{FetchError, QuoteSource};
use crate::utils::get_csfloat_api_key;
use async_trait::async_trait;
use chrono::Duration;
use serde::Deserialize;
use std::time::Duration as StdDuration;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct ListingsResponse {
    #[serde(default)]
    data: Vec<Listing>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    id: Option<String>,
    /// Asking price in cents
    price: Option<i64>,
    reference: Option<ListingReference>,
}

#[derive(Debug, Default, Deserialize)]
struct ListingReference {
    /// Predicted fair price in cents
    predicted_price: Option<f64>,
    /// Active listings for this item across the site
    quantity: Option<u32>,
}

pub struct CsfloatClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CsfloatClient {
    /// Build from `CSFLOAT_API_KEY`. Call this at startup so a missing
    /// credential surfaces before any lookup happens.
    pub fn from_env() -> Result<Self, FetchError> {
        let api_key = get_csfloat_api_key()
            .ok_or_else(|| FetchError::Config("CSFLOAT_API_KEY is not set".to_string()))?;
        Self::new(api_key)
    }

    pub fn new(api_key: String) -> Result<Self, FetchError> {
        if api_key.trim().is_empty() {
            return Err(FetchError::Config("CSFloat API key is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(StdDuration::from_secs(UPSTREAM_TIMEOUT_SECS))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: CSFLOAT_BASE_URL.to_string(),
            api_key,
        })
    }

    /// Override the endpoint base, for tests against a local server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn quote_from_listings(body: ListingsResponse, site_url: &str) -> Result<PriceQuote, FetchError> {
        let listing = body
            .data
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::NoData("no active listings".to_string()))?;

        let reference = listing.reference.unwrap_or_default();

        Ok(PriceQuote {
            lowest: listing.price.map(|cents| cents as f64 / 100.0),
            median: reference.predicted_price.map(|cents| cents / 100.0),
            quantity: reference.quantity,
            source_url: listing.id.map(|id| format!("{}/item/{}", site_url, id)),
        })
    }
}

#[async_trait]
impl QuoteSource for CsfloatClient {
    fn name(&self) -> &'static str {
        "csfloat"
    }

    fn cache_ttl(&self) -> Duration {
        Duration::minutes(CSFLOAT_LISTINGS_TTL_MINUTES)
    }

    async fn fetch_price(&self, key: &MarketKey) -> Result<PriceQuote, FetchError> {
        let url = format!("{}/api/v1/listings", self.base_url);
        debug!(key = key.as_str(), "fetching csfloat listings");

        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .query(&[
                ("market_hash_name", key.as_str()),
                ("limit", "1"),
                ("sort_by", "lowest_price"),
            ])
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            warn!(key = key.as_str(), status = status.as_u16(), "csfloat listings non-success");
            return Err(FetchError::from_status(status));
        }

        let body: ListingsResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        Self::quote_from_listings(body, &self.base_url)
    }
}
