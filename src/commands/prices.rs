use crate::error::Result;
use crate::services::{market_key, CatalogClient};

pub async fn run(weapon: Option<String>, limit: usize) {
    println!("💰 Resolving market prices...\n");

    match run_inner(weapon, limit).await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run_inner(weapon: Option<String>, limit: usize) -> Result<()> {
    let catalog = CatalogClient::new()?;
    let mut items = catalog.fetch_all().await?;
    println!("📦 Catalog: {} items", items.len());

    if let Some(weapon) = &weapon {
        items.retain(|item| item.weapon_name.eq_ignore_ascii_case(weapon));
        println!("🔫 Filtered to {}: {} items", weapon, items.len());
    }

    if items.is_empty() {
        println!("⚠️  No catalog items matched.");
        return Ok(());
    }
    items.truncate(limit);

    let resolver = super::build_resolver()?;
    let quotes = resolver.resolve_many(&items).await;

    println!();
    println!("{:<58} {:>10} {:>10} {:>7}", "Item", "Lowest", "Median", "Qty");
    println!("{}", "─".repeat(88));
    for (item, quote) in items.iter().zip(&quotes) {
        println!(
            "{:<58} {:>10} {:>10} {:>7}",
            market_key(item).as_str(),
            format_price(quote.lowest),
            format_price(quote.median),
            format_count(quote.quantity),
        );
    }

    let priced = quotes.iter().filter(|q| !q.is_unavailable()).count();
    println!("\n✅ Priced {}/{} items", priced, quotes.len());

    Ok(())
}

fn format_price(value: Option<f64>) -> String {
    match value {
        Some(price) => format!("${:.2}", price),
        None => "-".to_string(),
    }
}

fn format_count(value: Option<u32>) -> String {
    match value {
        Some(count) => count.to_string(),
        None => "-".to_string(),
    }
}
