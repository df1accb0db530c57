use crate::error::{AppError, Result};
use crate::services::market_key::{base_display_name, market_key};
use crate::services::CatalogClient;

pub async fn run(query: String) {
    println!("🔎 Looking up \"{}\"...\n", query);

    match run_inner(&query).await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run_inner(query: &str) -> Result<()> {
    let catalog = CatalogClient::new()?;
    let items = catalog.fetch_all().await?;

    let needle = query.to_lowercase();
    let item = items
        .iter()
        .find(|item| {
            base_display_name(&item.display_name).to_lowercase().contains(&needle)
                || item.weapon_name.to_lowercase().contains(&needle)
        })
        .ok_or_else(|| AppError::NotFound(format!("no skin matching '{}'", query)))?;

    let key = market_key(item);
    println!("🔹 {} ({})", key, item.item_class);
    if let Some(rarity) = &item.rarity_name {
        println!("   Rarity:     {}", rarity);
    }
    if let Some(collection) = &item.collection_name {
        println!("   Collection: {}", collection);
    }
    if item.stattrak {
        println!("   StatTrak™ available");
    }

    // Single-item path on purpose: no bulk priming here, the chain of
    // per-item sources answers.
    let resolver = super::build_resolver()?;
    let quote = resolver.resolve(item).await;

    println!();
    if quote.is_unavailable() {
        println!("   Price data unavailable");
        return Ok(());
    }
    if let Some(lowest) = quote.lowest {
        println!("   Lowest:  ${:.2}", lowest);
    }
    if let Some(median) = quote.median {
        println!("   Median:  ${:.2}", median);
    }
    if let Some(quantity) = quote.quantity {
        println!("   Volume:  {}", quantity);
    }
    if let Some(url) = &quote.source_url {
        println!("   Listing: {}", url);
    }

    Ok(())
}
