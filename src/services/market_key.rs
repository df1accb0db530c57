//! Market identifier normalization
//!
//! Every upstream keys pricing data by the Steam "market hash name", but
//! the catalog feed decorates display names inconsistently: knives carry
//! a `★` prefix, StatTrak/Souvenir variants prepend their markers, and
//! some records keep a wear suffix. `market_key` collapses all of that
//! into one canonical key per skin+weapon combination:
//!
//! ```text
//! ★ Karambit | Doppler (Minimal Wear)
//! AK-47 | Redline (Field-Tested)
//! ```
//!
//! The key is the cache key, so the function must be pure and
//! deterministic: the same catalog item always yields the same key, and
//! re-normalizing an already-normalized name is a no-op.

use crate::models::{CatalogItem, WearTier};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Leading `★` / `StatTrak™` / `Souvenir` markers, any order, any combination
static DECORATION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:★\s*|StatTrak™?\s*|Souvenir\s+)+").unwrap());

/// Trailing parenthesized canonical wear-tier suffix
static WEAR_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    let tiers = WearTier::all()
        .iter()
        .map(|tier| tier.label())
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\s*\((?:{})\)\s*$", tiers)).unwrap()
});

/// Canonical market identifier for a skin+wear combination
///
/// Valid across all upstream pricing sources and stable across process
/// restarts; used verbatim as the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarketKey(String);

impl MarketKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strip decoration markers and any wear suffix from a raw display name
pub fn base_display_name(name: &str) -> String {
    let stripped = DECORATION_PREFIX.replace(name.trim(), "");
    let stripped = WEAR_SUFFIX.replace(&stripped, "");
    stripped.trim().to_string()
}

/// Derive the canonical market key for a catalog item
///
/// Special items (knives, gloves) get the `★` prefix and default to
/// Minimal Wear; everything else defaults to Field-Tested. A missing
/// weapon name degrades to an empty segment rather than failing, so the
/// key stays stable for malformed feed records.
pub fn market_key(item: &CatalogItem) -> MarketKey {
    let base = base_display_name(&item.display_name);
    let skin_only = match base.split_once('|') {
        Some((_, skin)) => skin.trim(),
        None => base.as_str(),
    };

    // The feed decorates knife weapon names with the star as well; strip
    // it so the composed key never carries two.
    let weapon = item.weapon_name.trim();
    let weapon = weapon.strip_prefix('★').map(str::trim_start).unwrap_or(weapon);

    let star = if item.is_special() { "★ " } else { "" };
    let wear = WearTier::default_for(item.item_class);

    MarketKey(format!("{}{} | {} ({})", star, weapon, skin_only, wear.label()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemClass;

    fn item(display_name: &str, weapon_name: &str, class: ItemClass) -> CatalogItem {
        CatalogItem {
            id: "test".to_string(),
            display_name: display_name.to_string(),
            weapon_name: weapon_name.to_string(),
            item_class: class,
            stattrak: false,
            rarity_name: None,
            rarity_color: None,
            image_url: None,
            collection_name: None,
        }
    }

    #[test]
    fn knife_with_all_markers() {
        let key = market_key(&item(
            "★ StatTrak™ Karambit | Doppler (Factory New)",
            "Karambit",
            ItemClass::Knife,
        ));
        assert_eq!(key.as_str(), "★ Karambit | Doppler (Minimal Wear)");
    }

    #[test]
    fn regular_weapon() {
        let key = market_key(&item(
            "AK-47 | Redline (Field-Tested)",
            "AK-47",
            ItemClass::Weapon,
        ));
        assert_eq!(key.as_str(), "AK-47 | Redline (Field-Tested)");
    }

    #[test]
    fn base_name_strips_markers_and_wear() {
        assert_eq!(
            base_display_name("★ StatTrak™ Karambit | Doppler (Factory New)"),
            "Karambit | Doppler"
        );
        assert_eq!(
            base_display_name("Souvenir AWP | Dragon Lore (Battle-Scarred)"),
            "AWP | Dragon Lore"
        );
        assert_eq!(base_display_name("M4A4 | Howl"), "M4A4 | Howl");
    }

    #[test]
    fn markers_strip_in_any_order() {
        assert_eq!(
            base_display_name("StatTrak™ ★ M9 Bayonet | Fade (Minimal Wear)"),
            "M9 Bayonet | Fade"
        );
    }

    #[test]
    fn stripping_is_case_insensitive() {
        assert_eq!(
            base_display_name("souvenir stattrak™ AWP | Asiimov (field-tested)"),
            "AWP | Asiimov"
        );
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = market_key(&item(
            "★ StatTrak™ Karambit | Doppler (Factory New)",
            "★ Karambit",
            ItemClass::Knife,
        ));
        // Feed the produced key back through as a display name: no double
        // star, no double stripping.
        let mut key = first.clone();
        for _ in 0..3 {
            key = market_key(&item(key.as_str(), "★ Karambit", ItemClass::Knife));
        }
        assert_eq!(key, first);
        assert_eq!(key.as_str(), "★ Karambit | Doppler (Minimal Wear)");
    }

    #[test]
    fn wear_on_source_record_is_ignored_for_special_items() {
        let key = market_key(&item(
            "★ Flip Knife | Tiger Tooth (Battle-Scarred)",
            "Flip Knife",
            ItemClass::Knife,
        ));
        assert_eq!(key.as_str(), "★ Flip Knife | Tiger Tooth (Minimal Wear)");
    }

    #[test]
    fn gloves_are_special() {
        let key = market_key(&item(
            "★ Sport Gloves | Pandora's Box",
            "Sport Gloves",
            ItemClass::Glove,
        ));
        assert_eq!(key.as_str(), "★ Sport Gloves | Pandora's Box (Minimal Wear)");
    }

    #[test]
    fn name_without_separator_is_used_as_is() {
        let key = market_key(&item("Redline", "AK-47", ItemClass::Weapon));
        assert_eq!(key.as_str(), "AK-47 | Redline (Field-Tested)");
    }

    #[test]
    fn missing_weapon_name_degrades_but_stays_stable() {
        let a = market_key(&item("AK-47 | Redline", "", ItemClass::Weapon));
        let b = market_key(&item("AK-47 | Redline", "", ItemClass::Weapon));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), " | Redline (Field-Tested)");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let key = market_key(&item("  AWP | Asiimov  ", "AWP", ItemClass::Weapon));
        assert_eq!(key.as_str(), "AWP | Asiimov (Field-Tested)");
    }
}
