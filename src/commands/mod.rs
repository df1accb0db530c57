pub mod doctor;
pub mod prices;
pub mod skin;

use crate::error::Result;
use crate::services::{CsfloatClient, PriceResolver, QuoteSource, SkinportClient, SteamMarketClient};
use std::sync::Arc;

/// Wire the production resolver: Steam first in the per-item chain,
/// CSFloat appended when its credential is configured, Skinport as the
/// bulk source.
pub(crate) fn build_resolver() -> Result<PriceResolver> {
    let steam = SteamMarketClient::new()?;
    let mut sources: Vec<Arc<dyn QuoteSource>> = vec![Arc::new(steam)];

    match CsfloatClient::from_env() {
        Ok(csfloat) => sources.push(Arc::new(csfloat)),
        Err(err) => eprintln!("⚠️  CSFloat source disabled: {}", err),
    }

    let skinport = SkinportClient::new()?;
    Ok(PriceResolver::new(sources, Some(Arc::new(skinport))))
}
