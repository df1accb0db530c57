//! Upstream endpoints and cache policy constants
//!
//! TTL tiers match the freshness each upstream can sustain:
//!
//! | Source            | TTL    | Notes                                 |
//! |-------------------|--------|---------------------------------------|
//! | Steam quote       | 30 min | per-item, unauthenticated, $ strings  |
//! | CSFloat listings  | 45 min | per-item, API key, aggressive 429s    |
//! | Skinport bulk     | 60 min | whole-catalog snapshot, one request   |
//!
//! The stale-serve window is double the entry's own TTL; see
//! `services::price_cache`.

/// Steam app id for CS2 (inherited from CS:GO)
pub const STEAM_APP_ID: u32 = 730;

/// Steam currency code for USD
pub const STEAM_CURRENCY_USD: u32 = 1;

/// Steam Community Market base URL (price overview + listing pages)
pub const STEAM_MARKET_BASE_URL: &str = "https://steamcommunity.com";

/// CSFloat API base URL
pub const CSFLOAT_BASE_URL: &str = "https://csfloat.com";

/// Skinport API base URL
pub const SKINPORT_BASE_URL: &str = "https://api.skinport.com";

/// Default catalog feed (one JSON array, one record per skin+weapon combo)
pub const CATALOG_FEED_URL: &str =
    "https://raw.githubusercontent.com/ByMykel/CSGO-API/main/public/api/en/skins_not_grouped.json";

/// Cache TTL for Steam per-item quotes
pub const STEAM_QUOTE_TTL_MINUTES: i64 = 30;

/// Cache TTL for CSFloat per-item listings
pub const CSFLOAT_LISTINGS_TTL_MINUTES: i64 = 45;

/// Cache TTL for the Skinport bulk price table
pub const BULK_TABLE_TTL_MINUTES: i64 = 60;

/// Cache key the bulk price table is stored under (single slot)
pub const BULK_TABLE_CACHE_KEY: &str = "skinport:all-items";

/// Backoff before the single rate-limit retry
pub const RATE_LIMIT_RETRY_BACKOFF_MS: u64 = 300;

/// Per-request timeout for all upstream calls
pub const UPSTREAM_TIMEOUT_SECS: u64 = 5;
