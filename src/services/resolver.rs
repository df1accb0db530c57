//! Price resolver
//!
//! The orchestrator over normalizer, caches and upstream adapters. Each
//! call is one linear pass: fresh cache hit, else fresh bulk table row,
//! else the per-item source chain (one backoff retry on rate limit),
//! else stale fallback, else the all-null quote. No error ever crosses
//! `resolve`; callers render "price unavailable" instead of an error
//! page, so total failure is a value, not an Err.

use crate::constants::{BULK_TABLE_CACHE_KEY, RATE_LIMIT_RETRY_BACKOFF_MS};
use crate::models::{BulkPriceTable, CatalogItem, PriceQuote};
use crate::services::market_key::{market_key, MarketKey};
use crate::services::price_cache::{Clock, SystemClock, TtlCache};
use crate::services::upstream::{BulkSource, FetchError, QuoteSource};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub struct PriceResolver {
    quote_sources: Vec<Arc<dyn QuoteSource>>,
    bulk_source: Option<Arc<dyn BulkSource>>,
    quote_cache: TtlCache<PriceQuote>,
    bulk_cache: TtlCache<Arc<BulkPriceTable>>,
    retry_backoff: StdDuration,
    bulk_refresh: Mutex<()>,
}

impl PriceResolver {
    pub fn new(
        quote_sources: Vec<Arc<dyn QuoteSource>>,
        bulk_source: Option<Arc<dyn BulkSource>>,
    ) -> Self {
        Self::with_clock(quote_sources, bulk_source, Arc::new(SystemClock))
    }

    /// Construct with an explicit clock; both cache stores share it
    pub fn with_clock(
        quote_sources: Vec<Arc<dyn QuoteSource>>,
        bulk_source: Option<Arc<dyn BulkSource>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            quote_sources,
            bulk_source,
            quote_cache: TtlCache::new(clock.clone()),
            bulk_cache: TtlCache::new(clock),
            retry_backoff: StdDuration::from_millis(RATE_LIMIT_RETRY_BACKOFF_MS),
            bulk_refresh: Mutex::new(()),
        }
    }

    pub fn with_retry_backoff(mut self, backoff: StdDuration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Resolve pricing for one catalog item. Infallible: total failure
    /// yields [`PriceQuote::unavailable`].
    pub async fn resolve(&self, item: &CatalogItem) -> PriceQuote {
        let key = market_key(item);

        if let Some(hit) = self.quote_cache.get(key.as_str()).await {
            debug!(key = key.as_str(), "quote cache hit");
            return hit;
        }

        if let Some(table) = self.bulk_cache.get(BULK_TABLE_CACHE_KEY).await {
            if let Some(entry) = table.get(key.as_str()) {
                debug!(key = key.as_str(), "served from bulk table");
                return entry.to_quote();
            }
        }

        match self.fetch_from_chain(&key).await {
            Some(quote) => quote,
            None => self.stale_fallback(&key).await,
        }
    }

    /// Resolve a batch concurrently, priming the bulk table once first.
    /// This is the grid-view path: one bulk request covers every item
    /// already known to the snapshot.
    pub async fn resolve_many(&self, items: &[CatalogItem]) -> Vec<PriceQuote> {
        if self.bulk_source.is_some() {
            self.refresh_bulk().await;
        }
        join_all(items.iter().map(|item| self.resolve(item))).await
    }

    /// Fetch the bulk table unless a fresh one is already cached. At
    /// most one fetch is in flight process-wide; concurrent callers wait
    /// on the winner and reuse its table. Returns whether a fresh table
    /// is available afterwards.
    pub async fn refresh_bulk(&self) -> bool {
        let Some(source) = &self.bulk_source else {
            return false;
        };

        let _guard = self.bulk_refresh.lock().await;
        if self.bulk_cache.get(BULK_TABLE_CACHE_KEY).await.is_some() {
            return true;
        }

        let mut result = source.fetch_all().await;
        if matches!(result, Err(FetchError::RateLimit)) {
            debug!(source = source.name(), "bulk fetch rate limited, retrying once");
            tokio::time::sleep(self.retry_backoff).await;
            result = source.fetch_all().await;
        }

        match result {
            Ok(table) => {
                debug!(source = source.name(), items = table.len(), "bulk table refreshed");
                self.bulk_cache
                    .set(BULK_TABLE_CACHE_KEY, Arc::new(table), source.cache_ttl())
                    .await;
                true
            }
            Err(err) => {
                warn!(source = source.name(), "bulk refresh failed: {}", err);
                false
            }
        }
    }

    /// Walk the per-item source chain. First success is written through
    /// to the quote cache with that source's TTL. An unconfigured source
    /// is skipped without affecting the rest of the chain.
    async fn fetch_from_chain(&self, key: &MarketKey) -> Option<PriceQuote> {
        for source in &self.quote_sources {
            match self.fetch_with_retry(source.as_ref(), key).await {
                Ok(quote) => {
                    self.quote_cache
                        .set(key.as_str(), quote.clone(), source.cache_ttl())
                        .await;
                    return Some(quote);
                }
                Err(FetchError::Config(msg)) => {
                    warn!(source = source.name(), "skipping unconfigured source: {}", msg);
                }
                Err(err) => {
                    warn!(source = source.name(), key = key.as_str(), "fetch failed: {}", err);
                }
            }
        }
        None
    }

    /// One attempt, plus exactly one retry after a short fixed backoff
    /// when the upstream rate-limits. Other failures are not retried.
    async fn fetch_with_retry(
        &self,
        source: &dyn QuoteSource,
        key: &MarketKey,
    ) -> Result<PriceQuote, FetchError> {
        match source.fetch_price(key).await {
            Err(FetchError::RateLimit) => {
                debug!(source = source.name(), key = key.as_str(), "rate limited, retrying once");
                tokio::time::sleep(self.retry_backoff).await;
                source.fetch_price(key).await
            }
            result => result,
        }
    }

    /// Last resort before "unavailable": an expired quote, then the
    /// item's row in an expired bulk table. Stale pricing beats none.
    async fn stale_fallback(&self, key: &MarketKey) -> PriceQuote {
        if let Some(stale) = self.quote_cache.get_stale(key.as_str()).await {
            warn!(key = key.as_str(), "serving stale quote");
            return stale;
        }

        if let Some(table) = self.bulk_cache.get_stale(BULK_TABLE_CACHE_KEY).await {
            if let Some(entry) = table.get(key.as_str()) {
                warn!(key = key.as_str(), "serving stale bulk entry");
                return entry.to_quote();
            }
        }

        PriceQuote::unavailable()
    }
}
