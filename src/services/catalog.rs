//! Catalog feed client
//!
//! Fetches the public skin catalog (one JSON array, one record per
//! skin+weapon combination) and maps records into [`CatalogItem`]s. The
//! market class is derived here, once, so nothing downstream ever
//! re-runs substring checks against weapon names. This collaborator only
//! provides input to the pricing core; it owns no pricing logic.

use crate::error::{AppError, Result};
use crate::models::{CatalogItem, ItemClass};
use crate::utils::get_catalog_feed_url;
use serde::Deserialize;
use std::time::Duration as StdDuration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct RawSkin {
    id: String,
    name: String,
    weapon: Option<RawNamed>,
    category: Option<RawNamed>,
    rarity: Option<RawRarity>,
    #[serde(default)]
    stattrak: bool,
    image: Option<String>,
    #[serde(default)]
    collections: Vec<RawNamed>,
}

#[derive(Debug, Deserialize)]
struct RawNamed {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRarity {
    name: Option<String>,
    color: Option<String>,
}

pub struct CatalogClient {
    client: reqwest::Client,
    feed_url: String,
}

impl CatalogClient {
    pub fn new() -> Result<Self> {
        // The feed is a single multi-MB document
        let client = reqwest::Client::builder()
            .timeout(StdDuration::from_secs(30))
            .gzip(true)
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(Self {
            client,
            feed_url: get_catalog_feed_url(),
        })
    }

    pub fn with_feed_url(mut self, feed_url: impl Into<String>) -> Self {
        self.feed_url = feed_url.into();
        self
    }

    /// Fetch and map the full catalog
    pub async fn fetch_all(&self) -> Result<Vec<CatalogItem>> {
        let response = self
            .client
            .get(&self.feed_url)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("catalog feed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Network(format!("catalog feed returned HTTP {}", status)));
        }

        let raw: Vec<RawSkin> = response
            .json()
            .await
            .map_err(|e| AppError::Parse(format!("catalog feed: {}", e)))?;

        debug!(records = raw.len(), "catalog feed fetched");
        Ok(raw.into_iter().map(item_from_raw).collect())
    }
}

fn item_from_raw(raw: RawSkin) -> CatalogItem {
    let weapon_name = raw
        .weapon
        .and_then(|w| w.name)
        .unwrap_or_default();
    let category_name = raw.category.and_then(|c| c.name);
    let item_class = ItemClass::classify(category_name.as_deref(), &weapon_name);
    let (rarity_name, rarity_color) = match raw.rarity {
        Some(rarity) => (rarity.name, rarity.color),
        None => (None, None),
    };

    CatalogItem {
        id: raw.id,
        display_name: raw.name,
        weapon_name,
        item_class,
        stattrak: raw.stattrak,
        rarity_name,
        rarity_color,
        image_url: raw.image,
        collection_name: raw.collections.into_iter().find_map(|c| c.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"[
        {"id":"skin-4-12",
         "name":"AK-47 | Redline (Field-Tested)",
         "weapon":{"id":"weapon_ak47","name":"AK-47"},
         "category":{"id":"rifles","name":"Rifles"},
         "rarity":{"id":"classified","name":"Classified","color":"#d32ce6"},
         "stattrak":true,
         "image":"https://example.test/redline.png",
         "collections":[{"id":"huntsman","name":"The Huntsman Collection"}]},
        {"id":"skin-507-44",
         "name":"★ Karambit | Doppler (Factory New)",
         "weapon":{"id":"weapon_knife_karambit","name":"★ Karambit"},
         "category":{"id":"knives","name":"Knives"},
         "rarity":{"id":"covert","name":"Covert","color":"#eb4b4b"},
         "stattrak":true,
         "image":"https://example.test/doppler.png"},
        {"id":"skin-0-0",
         "name":"Orphan | No Weapon"}
    ]"##;

    #[test]
    fn raw_records_map_onto_catalog_items() {
        let raw: Vec<RawSkin> = serde_json::from_str(SAMPLE).unwrap();
        let items: Vec<CatalogItem> = raw.into_iter().map(item_from_raw).collect();

        let redline = &items[0];
        assert_eq!(redline.id, "skin-4-12");
        assert_eq!(redline.weapon_name, "AK-47");
        assert_eq!(redline.item_class, ItemClass::Weapon);
        assert!(redline.stattrak);
        assert_eq!(redline.rarity_name.as_deref(), Some("Classified"));
        assert_eq!(redline.collection_name.as_deref(), Some("The Huntsman Collection"));
    }

    #[test]
    fn knife_class_comes_from_the_category_label() {
        let raw: Vec<RawSkin> = serde_json::from_str(SAMPLE).unwrap();
        let items: Vec<CatalogItem> = raw.into_iter().map(item_from_raw).collect();

        let karambit = &items[1];
        assert_eq!(karambit.item_class, ItemClass::Knife);
        assert!(karambit.is_special());
        assert_eq!(karambit.collection_name, None);
    }

    #[test]
    fn records_without_weapon_still_map() {
        let raw: Vec<RawSkin> = serde_json::from_str(SAMPLE).unwrap();
        let items: Vec<CatalogItem> = raw.into_iter().map(item_from_raw).collect();

        let orphan = &items[2];
        assert_eq!(orphan.weapon_name, "");
        assert_eq!(orphan.item_class, ItemClass::Weapon);
        assert!(!orphan.stattrak);
        assert_eq!(orphan.rarity_name, None);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn fetch_live_catalog() {
        let client = CatalogClient::new().unwrap();
        let items = client.fetch_all().await.unwrap();
        assert!(items.len() > 1000);
    }
}
