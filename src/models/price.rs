use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Normalized result of a pricing lookup
///
/// Upstreams report different subsets, so every field is independently
/// nullable. The all-null value means "price unavailable" and is the
/// resolver's terminal fallback; it is never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Lowest listed price, USD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowest: Option<f64>,

    /// Median / reference price, USD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,

    /// Available listings or recent sales volume
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,

    /// Deep link to the live upstream listing page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl PriceQuote {
    /// The "price unavailable" quote
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn is_unavailable(&self) -> bool {
        self.lowest.is_none()
            && self.median.is_none()
            && self.quantity.is_none()
            && self.source_url.is_none()
    }
}

/// Per-item row of the bulk price snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkPriceEntry {
    pub min_price: Option<f64>,
    pub median_price: Option<f64>,
    pub quantity: Option<u32>,
    pub item_page: Option<String>,
}

impl BulkPriceEntry {
    pub fn to_quote(&self) -> PriceQuote {
        PriceQuote {
            lowest: self.min_price,
            median: self.median_price,
            quantity: self.quantity,
            source_url: self.item_page.clone(),
        }
    }
}

/// Whole-catalog price snapshot from the bulk upstream, keyed by market
/// hash name
///
/// Fetched at most once per TTL window and replaced wholesale on
/// refresh; rows are never updated in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkPriceTable {
    entries: HashMap<String, BulkPriceEntry>,
}

impl BulkPriceTable {
    pub fn new(entries: HashMap<String, BulkPriceEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, market_hash_name: &str) -> Option<&BulkPriceEntry> {
        self.entries.get(market_hash_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_quote_has_no_fields() {
        let quote = PriceQuote::unavailable();
        assert!(quote.is_unavailable());
        assert_eq!(quote.lowest, None);
        assert_eq!(quote.median, None);
        assert_eq!(quote.quantity, None);
        assert_eq!(quote.source_url, None);
    }

    #[test]
    fn partial_quote_is_not_unavailable() {
        let quote = PriceQuote {
            lowest: Some(12.34),
            ..PriceQuote::default()
        };
        assert!(!quote.is_unavailable());
    }

    #[test]
    fn bulk_entry_maps_onto_quote_fields() {
        let entry = BulkPriceEntry {
            min_price: Some(4.20),
            median_price: None,
            quantity: Some(17),
            item_page: Some("https://skinport.com/item/example".to_string()),
        };
        let quote = entry.to_quote();
        assert_eq!(quote.lowest, Some(4.20));
        assert_eq!(quote.median, None);
        assert_eq!(quote.quantity, Some(17));
        assert_eq!(quote.source_url.as_deref(), Some("https://skinport.com/item/example"));
    }
}
