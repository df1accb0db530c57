pub mod catalog;
pub mod csfloat;
pub mod market_key;
pub mod price_cache;
pub mod resolver;
pub mod skinport;
pub mod steam_market;
pub mod upstream;

pub use catalog::CatalogClient;
pub use csfloat::CsfloatClient;
pub use market_key::{market_key, MarketKey};
pub use price_cache::{Clock, SystemClock, TtlCache};
pub use resolver::PriceResolver;
pub use skinport::SkinportClient;
pub use steam_market::SteamMarketClient;
pub use upstream::{BulkSource, FetchError, QuoteSource};
