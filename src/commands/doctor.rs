//! Configuration and upstream connectivity health check

use crate::models::{CatalogItem, ItemClass};
use crate::services::market_key::market_key;
use crate::services::upstream::{BulkSource, QuoteSource};
use crate::services::{CatalogClient, CsfloatClient, SkinportClient, SteamMarketClient};
use crate::utils::get_csfloat_api_key;

/// A liquid, always-listed item; if this one has no price, the upstream
/// is the problem
fn probe_item() -> CatalogItem {
    CatalogItem {
        id: "probe".to_string(),
        display_name: "AK-47 | Redline".to_string(),
        weapon_name: "AK-47".to_string(),
        item_class: ItemClass::Weapon,
        stattrak: false,
        rarity_name: None,
        rarity_color: None,
        image_url: None,
        collection_name: None,
    }
}

pub async fn run() {
    println!("🔍 Checking pricing configuration and upstreams...\n");

    let mut issues = 0;

    // Configuration
    println!("⚙️  Configuration");
    if get_csfloat_api_key().is_some() {
        println!("   ✅ CSFLOAT_API_KEY is set");
    } else {
        println!("   ⚠️  CSFLOAT_API_KEY not set (CSFloat source will be disabled)");
        issues += 1;
    }
    println!();

    let key = market_key(&probe_item());

    // Catalog feed
    println!("📦 Catalog feed");
    match CatalogClient::new() {
        Ok(catalog) => match catalog.fetch_all().await {
            Ok(items) => println!("   ✅ {} items", items.len()),
            Err(e) => {
                println!("   ❌ {}", e);
                issues += 1;
            }
        },
        Err(e) => {
            println!("   ❌ {}", e);
            issues += 1;
        }
    }
    println!();

    // Steam quote upstream
    println!("🎯 Steam market ({})", key);
    match SteamMarketClient::new() {
        Ok(steam) => match steam.fetch_price(&key).await {
            Ok(quote) => println!("   ✅ lowest {:?}, median {:?}", quote.lowest, quote.median),
            Err(e) => {
                println!("   ❌ {}", e);
                issues += 1;
            }
        },
        Err(e) => {
            println!("   ❌ {}", e);
            issues += 1;
        }
    }
    println!();

    // CSFloat listings upstream
    println!("🧊 CSFloat listings");
    match CsfloatClient::from_env() {
        Ok(csfloat) => match csfloat.fetch_price(&key).await {
            Ok(quote) => println!("   ✅ lowest {:?}, quantity {:?}", quote.lowest, quote.quantity),
            Err(e) => {
                println!("   ❌ {}", e);
                issues += 1;
            }
        },
        Err(e) => println!("   ⚠️  skipped: {}", e),
    }
    println!();

    // Skinport bulk upstream
    println!("📊 Skinport bulk snapshot");
    match SkinportClient::new() {
        Ok(skinport) => match skinport.fetch_all().await {
            Ok(table) => println!("   ✅ {} items in snapshot", table.len()),
            Err(e) => {
                println!("   ❌ {}", e);
                issues += 1;
            }
        },
        Err(e) => {
            println!("   ❌ {}", e);
            issues += 1;
        }
    }
    println!();

    if issues == 0 {
        println!("✅ All checks passed");
    } else {
        println!("⚠️  {} issue(s) found", issues);
        std::process::exit(1);
    }
}
