//! Skinport bulk price client
//!
//! One unauthenticated request returns the pricing snapshot for the
//! entire catalog, keyed by the upstream's own item-name field. That
//! field is assumed to equal the canonical market key once both sides
//! apply the same normalization; the parse tests below pin the captured
//! upstream shape. The endpoint rate-limits aggressively, which is why
//! the table is cached for a full hour and refreshed wholesale.

use crate::constants::{BULK_TABLE_TTL_MINUTES, SKINPORT_BASE_URL, STEAM_APP_ID, UPSTREAM_TIMEOUT_SECS};
use crate::models::{BulkPriceEntry, BulkPriceTable};
use crate::services::upstream::{BulkSource, FetchError};
use async_trait::async_trait;
use chrono::Duration;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration as StdDuration;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct SkinportItem {
    market_hash_name: String,
    min_price: Option<f64>,
    median_price: Option<f64>,
    quantity: Option<u32>,
    item_page: Option<String>,
}

pub struct SkinportClient {
    client: reqwest::Client,
    base_url: String,
}

impl SkinportClient {
    pub fn new() -> Result<Self, FetchError> {
        // The snapshot is a few MB; give it more room than per-item calls.
        let client = reqwest::Client::builder()
            .timeout(StdDuration::from_secs(UPSTREAM_TIMEOUT_SECS * 6))
            .gzip(true)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: SKINPORT_BASE_URL.to_string(),
        })
    }

    /// Override the endpoint base, for tests against a local server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn table_from_items(items: Vec<SkinportItem>) -> BulkPriceTable {
        let mut entries = HashMap::with_capacity(items.len());
        for item in items {
            entries.insert(
                item.market_hash_name,
                BulkPriceEntry {
                    min_price: item.min_price,
                    median_price: item.median_price,
                    quantity: item.quantity,
                    item_page: item.item_page,
                },
            );
        }
        BulkPriceTable::new(entries)
    }
}

#[async_trait]
impl BulkSource for SkinportClient {
    fn name(&self) -> &'static str {
        "skinport"
    }

    fn cache_ttl(&self) -> Duration {
        Duration::minutes(BULK_TABLE_TTL_MINUTES)
    }

    async fn fetch_all(&self) -> Result<BulkPriceTable, FetchError> {
        let url = format!("{}/v1/items", self.base_url);
        debug!("fetching skinport bulk snapshot");

        let response = self
            .client
            .get(&url)
            .query(&[("app_id", STEAM_APP_ID.to_string()), ("currency", "USD".to_string())])
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "skinport snapshot non-success");
            return Err(FetchError::from_status(status));
        }

        let items: Vec<SkinportItem> = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        debug!(items = items.len(), "skinport snapshot parsed");
        Ok(Self::table_from_items(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"market_hash_name":"AK-47 | Redline (Field-Tested)",
         "currency":"USD","min_price":14.99,"median_price":16.20,
         "quantity":151,"item_page":"https://skinport.com/item/ak-47-redline-field-tested"},
        {"market_hash_name":"★ Karambit | Doppler (Minimal Wear)",
         "currency":"USD","min_price":912.40,"median_price":null,
         "quantity":7,"item_page":null},
        {"market_hash_name":"MP9 | Sand Dashed (Battle-Scarred)",
         "currency":"USD","min_price":null,"median_price":null,
         "quantity":0,"item_page":null}
    ]"#;

    #[test]
    fn snapshot_parses_into_a_keyed_table() {
        let items: Vec<SkinportItem> = serde_json::from_str(SAMPLE).unwrap();
        let table = SkinportClient::table_from_items(items);
        assert_eq!(table.len(), 3);

        let redline = table.get("AK-47 | Redline (Field-Tested)").unwrap();
        assert_eq!(redline.min_price, Some(14.99));
        assert_eq!(redline.median_price, Some(16.20));
        assert_eq!(redline.quantity, Some(151));
        assert!(redline.item_page.as_deref().unwrap().contains("skinport.com"));
    }

    #[test]
    fn star_prefixed_keys_round_trip() {
        let items: Vec<SkinportItem> = serde_json::from_str(SAMPLE).unwrap();
        let table = SkinportClient::table_from_items(items);
        let knife = table.get("★ Karambit | Doppler (Minimal Wear)").unwrap();
        assert_eq!(knife.min_price, Some(912.40));
        assert_eq!(knife.median_price, None);
    }

    #[test]
    fn unlisted_items_keep_null_prices() {
        let items: Vec<SkinportItem> = serde_json::from_str(SAMPLE).unwrap();
        let table = SkinportClient::table_from_items(items);
        let dead = table.get("MP9 | Sand Dashed (Battle-Scarred)").unwrap();
        assert_eq!(dead.min_price, None);
        assert_eq!(dead.quantity, Some(0));
        assert!(table.get("AWP | Asiimov (Field-Tested)").is_none());
    }

    #[tokio::test]
    #[ignore] // Requires network access; the endpoint rate-limits hard
    async fn fetch_live_snapshot() {
        let client = SkinportClient::new().unwrap();
        let table = client.fetch_all().await.unwrap();
        assert!(table.len() > 1000, "full catalog expected");
    }
}
