//! skindex: the price aggregation and caching core of a CS2 skin catalog
//!
//! Pricing for a skin+wear combination comes from three inconsistent
//! upstreams: a per-item Steam quote endpoint, a per-item CSFloat
//! listings endpoint, and a bulk Skinport snapshot covering the whole
//! catalog. This crate normalizes their heterogeneous item identifiers
//! into one canonical market key, caches results with time-bounded
//! freshness, and degrades to stale data or "unavailable" when
//! upstreams fail or rate-limit.
//!
//! Entry point for callers is [`services::PriceResolver`]:
//! `resolve(item)` never fails outward; it returns a quote whose fields
//! are all independently nullable.

pub mod cli;
pub mod commands;
pub mod constants;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
