//! Item catalog: immutable templates for everything the shops sell.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use crate::constants::STEEL_SWORD_ID;

const DEFAULT_CATALOG_DATA: &str = include_str!("../data/catalog.json");

/// Stable identifier for an item template. Inventory copies keep it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Weapon,
    Armor,
    Potion,
}

impl ItemCategory {
    pub const ALL: [Self; 3] = [Self::Weapon, Self::Armor, Self::Potion];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weapon => "weapon",
            Self::Armor => "armor",
            Self::Potion => "potion",
        }
    }

    /// Weapons and armor can be owned once; potions stack.
    #[must_use]
    pub const fn is_unique(self) -> bool {
        matches!(self, Self::Weapon | Self::Armor)
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shop {
    Blacksmith,
    Market,
}

impl Shop {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blacksmith => "blacksmith",
            Self::Market => "market",
        }
    }
}

impl fmt::Display for Shop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single item template.
///
/// `effect` is damage for weapons, damage reduction for armor and the heal
/// amount for potions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: ItemCategory,
    pub cost: i32,
    pub effect: i32,
    #[serde(default)]
    pub description: String,
    pub shop: Shop,
}

impl Item {
    #[must_use]
    pub fn is(&self, id: &str) -> bool {
        self.id.as_str() == id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog data could not be parsed: {0}")]
    Parse(String),
    #[error("duplicate item id `{0}` in catalog")]
    DuplicateId(ItemId),
    #[error("item `{id}` has a negative {field} ({value})")]
    Negative {
        id: ItemId,
        field: &'static str,
        value: i32,
    },
    #[error("item `{id}` is a {category} but is stocked at the {shop}")]
    WrongShop {
        id: ItemId,
        category: ItemCategory,
        shop: Shop,
    },
    #[error("catalog has no `steel_sword`; the dragon could never be fought")]
    MissingTopTierWeapon,
    #[error("catalog has no potion for the market to sell")]
    MissingMarketPotion,
}

/// Complete catalog in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub items: Vec<Item>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::load_from_static()
    }
}

impl Catalog {
    /// Parse the catalog embedded in the crate.
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_CATALOG_DATA).unwrap_or(Self { items: Vec::new() })
    }

    /// Load a catalog from a JSON object and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, is not an object, or the
    /// catalog fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|err| CatalogError::Parse(err.to_string()))?;
        if !value.is_object() {
            return Err(CatalogError::Parse(format!("expected a JSON object, found {value}")));
        }
        let catalog: Self =
            serde_json::from_value(value).map_err(|err| CatalogError::Parse(err.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check ids are unique, numbers are non-negative, potions are sold at the
    /// market and gear at the blacksmith. The steel sword and a market potion
    /// must both exist.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(&item.id) {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
            if item.cost < 0 {
                return Err(CatalogError::Negative {
                    id: item.id.clone(),
                    field: "cost",
                    value: item.cost,
                });
            }
            if item.effect < 0 {
                return Err(CatalogError::Negative {
                    id: item.id.clone(),
                    field: "effect",
                    value: item.effect,
                });
            }
            let expected_shop = match item.category {
                ItemCategory::Weapon | ItemCategory::Armor => Shop::Blacksmith,
                ItemCategory::Potion => Shop::Market,
            };
            if item.shop != expected_shop {
                return Err(CatalogError::WrongShop {
                    id: item.id.clone(),
                    category: item.category,
                    shop: item.shop,
                });
            }
        }
        if self.find(STEEL_SWORD_ID).is_none() {
            return Err(CatalogError::MissingTopTierWeapon);
        }
        if self.market_potion().is_none() {
            return Err(CatalogError::MissingMarketPotion);
        }
        Ok(())
    }

    /// Find an item template by id.
    #[must_use]
    pub fn find(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.is(item_id))
    }

    /// Find an item template by its display name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    /// All templates of a category, in catalog order.
    pub fn by_category(&self, category: ItemCategory) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .filter(move |item| item.category == category)
    }

    /// Items stocked by a shop, in catalog order.
    #[must_use]
    pub fn stock(&self, shop: Shop) -> Vec<&Item> {
        self.items.iter().filter(|item| item.shop == shop).collect()
    }

    /// The potion sold at the market, if the catalog has one.
    #[must_use]
    pub fn market_potion(&self) -> Option<&Item> {
        self.items
            .iter()
            .find(|item| item.shop == Shop::Market && item.category == ItemCategory::Potion)
    }
}
