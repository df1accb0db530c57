use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad market class of a catalog item
///
/// Knives and gloves carry a `★` prefix on the market and list in
/// Minimal Wear by default; everything else lists in Field-Tested.
/// Derived once at catalog ingest so consumers never re-run substring
/// checks against weapon names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemClass {
    /// Regular weapon (rifles, pistols, SMGs, heavy)
    Weapon,
    /// Knife-class item
    Knife,
    /// Glove-class item
    Glove,
}

impl ItemClass {
    /// Classify from the catalog category label, falling back to weapon
    /// name matching for records without one.
    pub fn classify(category_name: Option<&str>, weapon_name: &str) -> Self {
        match category_name {
            Some(category) if category.eq_ignore_ascii_case("knives") => return ItemClass::Knife,
            Some(category) if category.eq_ignore_ascii_case("gloves") => return ItemClass::Glove,
            _ => {}
        }

        let name = weapon_name.to_lowercase();
        if name.contains("knife")
            || name.contains("karambit")
            || name.contains("bayonet")
            || name.contains("dagger")
        {
            ItemClass::Knife
        } else if name.contains("gloves") || name.contains("wraps") {
            ItemClass::Glove
        } else {
            ItemClass::Weapon
        }
    }
}

impl fmt::Display for ItemClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ItemClass::Weapon => "Weapon",
            ItemClass::Knife => "Knife",
            ItemClass::Glove => "Glove",
        };
        write!(f, "{}", label)
    }
}

/// One of the five canonical wear tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WearTier {
    FactoryNew,
    MinimalWear,
    FieldTested,
    WellWorn,
    BattleScarred,
}

impl WearTier {
    /// Canonical market label, as it appears inside the parenthesized
    /// suffix of a market hash name
    pub fn label(&self) -> &'static str {
        match self {
            WearTier::FactoryNew => "Factory New",
            WearTier::MinimalWear => "Minimal Wear",
            WearTier::FieldTested => "Field-Tested",
            WearTier::WellWorn => "Well-Worn",
            WearTier::BattleScarred => "Battle-Scarred",
        }
    }

    /// Parse a wear label case-insensitively
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::all()
            .iter()
            .copied()
            .find(|tier| tier.label().eq_ignore_ascii_case(label))
    }

    /// All five tiers, best condition first
    pub fn all() -> &'static [WearTier] {
        &[
            WearTier::FactoryNew,
            WearTier::MinimalWear,
            WearTier::FieldTested,
            WearTier::WellWorn,
            WearTier::BattleScarred,
        ]
    }

    /// Default listing tier for a market class: special items (knives,
    /// gloves) list in Minimal Wear, everything else in Field-Tested
    pub fn default_for(class: ItemClass) -> Self {
        match class {
            ItemClass::Knife | ItemClass::Glove => WearTier::MinimalWear,
            ItemClass::Weapon => WearTier::FieldTested,
        }
    }
}

impl fmt::Display for WearTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One skin/weapon combination as sourced from the catalog feed
///
/// Immutable once fetched. `display_name` is raw feed text and may carry
/// `★`/`StatTrak™`/`Souvenir` markers and a wear suffix; the market key
/// normalizer strips those.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Opaque upstream id
    pub id: String,

    /// Raw display name from the feed, possibly decorated
    pub display_name: String,

    /// Weapon name (e.g. "AK-47", "Karambit")
    pub weapon_name: String,

    /// Market class, derived at ingest
    pub item_class: ItemClass,

    /// Whether a StatTrak variant exists
    pub stattrak: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
}

impl CatalogItem {
    /// Knife- or glove-class item: star-prefixed on the market and
    /// defaulting to Minimal Wear
    pub fn is_special(&self) -> bool {
        matches!(self.item_class, ItemClass::Knife | ItemClass::Glove)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_prefers_category_label() {
        assert_eq!(ItemClass::classify(Some("Knives"), "M9 Bayonet"), ItemClass::Knife);
        assert_eq!(ItemClass::classify(Some("Gloves"), "Sport Gloves"), ItemClass::Glove);
        assert_eq!(ItemClass::classify(Some("Rifles"), "AK-47"), ItemClass::Weapon);
    }

    #[test]
    fn classify_falls_back_to_weapon_name() {
        assert_eq!(ItemClass::classify(None, "Karambit"), ItemClass::Knife);
        assert_eq!(ItemClass::classify(None, "Shadow Daggers"), ItemClass::Knife);
        assert_eq!(ItemClass::classify(None, "Hand Wraps"), ItemClass::Glove);
        assert_eq!(ItemClass::classify(None, "Desert Eagle"), ItemClass::Weapon);
    }

    #[test]
    fn wear_parse_is_case_insensitive() {
        assert_eq!(WearTier::parse("field-tested"), Some(WearTier::FieldTested));
        assert_eq!(WearTier::parse("  Minimal Wear "), Some(WearTier::MinimalWear));
        assert_eq!(WearTier::parse("Battle-Scarred"), Some(WearTier::BattleScarred));
        assert_eq!(WearTier::parse("Mint"), None);
    }

    #[test]
    fn default_wear_by_class() {
        assert_eq!(WearTier::default_for(ItemClass::Knife), WearTier::MinimalWear);
        assert_eq!(WearTier::default_for(ItemClass::Glove), WearTier::MinimalWear);
        assert_eq!(WearTier::default_for(ItemClass::Weapon), WearTier::FieldTested);
    }
}
