mod catalog;
mod price;

pub use catalog::{CatalogItem, ItemClass, WearTier};
pub use price::{BulkPriceEntry, BulkPriceTable, PriceQuote};
