//! Steam Community Market price overview client
//!
//! One request per market hash name against the `priceoverview`
//! endpoint. No credential required. The body carries a `success` flag
//! plus string-formatted USD prices ("$1,234.56") and a comma-grouped
//! volume; an explicit `success: false` is treated like a transport
//! failure, never as a zero-price quote. Individual fields that fail to
//! parse are dropped on their own (partial quotes are valid).

use crate::constants::{
    STEAM_APP_ID, STEAM_CURRENCY_USD, STEAM_MARKET_BASE_URL, STEAM_QUOTE_TTL_MINUTES,
    UPSTREAM_TIMEOUT_SECS,
};
use crate::models::PriceQuote;
use crate::services::market_key::MarketKey;
use crate::services::upstream::{FetchError, QuoteSource};
use async_trait::async_trait;
use chrono::Duration;
use serde::Deserialize;
use std::time::Duration as StdDuration;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct PriceOverviewResponse {
    success: bool,
    lowest_price: Option<String>,
    median_price: Option<String>,
    volume: Option<String>,
}

pub struct SteamMarketClient {
    client: reqwest::Client,
    base_url: String,
}

impl SteamMarketClient {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(StdDuration::from_secs(UPSTREAM_TIMEOUT_SECS))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: STEAM_MARKET_BASE_URL.to_string(),
        })
    }

    /// Override the endpoint base, for tests against a local server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Canonical listing page for a market hash name, used as the quote's
    /// deep link
    fn listing_url(&self, key: &MarketKey) -> Option<String> {
        let app_id = STEAM_APP_ID.to_string();
        let mut url = reqwest::Url::parse(&self.base_url).ok()?;
        url.path_segments_mut()
            .ok()?
            .extend(["market", "listings", app_id.as_str(), key.as_str()]);
        Some(url.to_string())
    }

    fn quote_from_overview(
        body: PriceOverviewResponse,
        source_url: Option<String>,
    ) -> Result<PriceQuote, FetchError> {
        if !body.success {
            return Err(FetchError::NoData("price overview reported failure".to_string()));
        }

        Ok(PriceQuote {
            lowest: body.lowest_price.as_deref().and_then(parse_money),
            median: body.median_price.as_deref().and_then(parse_money),
            quantity: body.volume.as_deref().and_then(parse_volume),
            source_url,
        })
    }
}

#[async_trait]
impl QuoteSource for SteamMarketClient {
    fn name(&self) -> &'static str {
        "steam-market"
    }

    fn cache_ttl(&self) -> Duration {
        Duration::minutes(STEAM_QUOTE_TTL_MINUTES)
    }

    async fn fetch_price(&self, key: &MarketKey) -> Result<PriceQuote, FetchError> {
        let url = format!("{}/market/priceoverview/", self.base_url);
        debug!(key = key.as_str(), "fetching steam price overview");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("appid", STEAM_APP_ID.to_string()),
                ("currency", STEAM_CURRENCY_USD.to_string()),
                ("market_hash_name", key.as_str().to_string()),
            ])
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            warn!(key = key.as_str(), status = status.as_u16(), "steam overview non-success");
            return Err(FetchError::from_status(status));
        }

        let body: PriceOverviewResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        Self::quote_from_overview(body, self.listing_url(key))
    }
}

/// Parse a formatted USD amount ("$1,234.56") into major units
fn parse_money(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Parse a comma-grouped count ("1,234")
fn parse_volume(raw: &str) -> Option<u32> {
    let cleaned: String = raw.trim().chars().filter(|c| c.is_ascii_digit()).collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dollar_amounts() {
        assert_eq!(parse_money("$12.34"), Some(12.34));
        assert_eq!(parse_money("$1,234.56"), Some(1234.56));
        assert_eq!(parse_money(" $0.03 "), Some(0.03));
        assert_eq!(parse_money("free"), None);
    }

    #[test]
    fn parses_grouped_volume() {
        assert_eq!(parse_volume("1,234"), Some(1234));
        assert_eq!(parse_volume("17"), Some(17));
        assert_eq!(parse_volume("n/a"), None);
    }

    #[test]
    fn successful_overview_becomes_a_quote() {
        let body: PriceOverviewResponse = serde_json::from_str(
            r#"{"success":true,"lowest_price":"$12.34","median_price":"$13.10","volume":"1,234"}"#,
        )
        .unwrap();
        let quote = SteamMarketClient::quote_from_overview(body, None).unwrap();
        assert_eq!(quote.lowest, Some(12.34));
        assert_eq!(quote.median, Some(13.10));
        assert_eq!(quote.quantity, Some(1234));
    }

    #[test]
    fn failure_flag_is_not_a_zero_price_quote() {
        let body: PriceOverviewResponse = serde_json::from_str(r#"{"success":false}"#).unwrap();
        let result = SteamMarketClient::quote_from_overview(body, None);
        assert!(matches!(result, Err(FetchError::NoData(_))));
    }

    #[test]
    fn missing_fields_yield_a_partial_quote() {
        let body: PriceOverviewResponse =
            serde_json::from_str(r#"{"success":true,"lowest_price":"$5.00"}"#).unwrap();
        let quote = SteamMarketClient::quote_from_overview(body, None).unwrap();
        assert_eq!(quote.lowest, Some(5.00));
        assert_eq!(quote.median, None);
        assert_eq!(quote.quantity, None);
    }

    #[test]
    fn listing_url_encodes_the_key() {
        let client = SteamMarketClient::new().unwrap();
        let key = crate::services::market_key::market_key(&crate::models::CatalogItem {
            id: "x".to_string(),
            display_name: "AK-47 | Redline".to_string(),
            weapon_name: "AK-47".to_string(),
            item_class: crate::models::ItemClass::Weapon,
            stattrak: false,
            rarity_name: None,
            rarity_color: None,
            image_url: None,
            collection_name: None,
        });
        let url = client.listing_url(&key).unwrap();
        assert!(url.starts_with("https://steamcommunity.com/market/listings/730/"));
        assert!(url.contains("AK-47"));
        assert!(!url.contains(' '));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn fetch_live_quote() {
        let client = SteamMarketClient::new().unwrap();
        let key = crate::services::market_key::market_key(&crate::models::CatalogItem {
            id: "x".to_string(),
            display_name: "AK-47 | Redline".to_string(),
            weapon_name: "AK-47".to_string(),
            item_class: crate::models::ItemClass::Weapon,
            stattrak: false,
            rarity_name: None,
            rarity_color: None,
            image_url: None,
            collection_name: None,
        });
        let quote = client.fetch_price(&key).await.unwrap();
        assert!(quote.lowest.is_some() || quote.median.is_some());
    }
}
