//! Time-bounded key-value cache for pricing data
//!
//! A deliberately small store: `get` returns only unexpired entries,
//! `set` is a last-write-wins insert, and expiry is evaluated lazily at
//! read time. There is no background sweeper; entries simply stop being
//! readable. `get_stale` is the one sanctioned exception: it serves an
//! expired entry as long as the entry is younger than twice its own TTL,
//! and exists solely for the resolver's stale-fallback path.
//!
//! Time never comes from the system directly. The store reads an
//! injected [`Clock`], which keeps expiry deterministic under test.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time, used everywhere outside tests
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    stored_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Inside the stale-serve window: younger than double the TTL the
    /// entry was stored with
    fn is_servable_stale(&self, now: DateTime<Utc>) -> bool {
        let ttl = self.expires_at - self.stored_at;
        now < self.expires_at + ttl
    }
}

/// Concurrent TTL cache keyed by market hash name
///
/// Safe for concurrent readers and writers on distinct keys; concurrent
/// writers to the same key race with last-write-wins. No read-modify-
/// write is ever performed on a single key.
pub struct TtlCache<T> {
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
    clock: Arc<dyn Clock>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Fresh read. An expired entry is a miss.
    pub async fn get(&self, key: &str) -> Option<T> {
        let now = self.clock.now();
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| entry.value.clone())
    }

    /// Stale-fallback read: returns fresh entries too, plus expired ones
    /// still inside the double-TTL window. Callers must treat the result
    /// as possibly outdated.
    pub async fn get_stale(&self, key: &str) -> Option<T> {
        let now = self.clock.now();
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.is_servable_stale(now))
            .map(|entry| entry.value.clone())
    }

    pub async fn set(&self, key: &str, value: T, ttl: Duration) {
        let now = self.clock.now();
        let entry = CacheEntry {
            value,
            stored_at: now,
            expires_at: now + ttl,
        };
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), entry);
    }

    /// Optional cleanup pass. Drops entries past the stale-serve window;
    /// entries still usable by `get_stale` are kept.
    pub async fn purge_expired(&self) {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.is_servable_stale(now));
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
