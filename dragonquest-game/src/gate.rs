//! Equipment gate for the dragon encounter.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::catalog::ItemCategory;
use crate::constants::STEEL_SWORD_ID;
use crate::inventory::Inventory;

/// One unmet requirement for facing the dragon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shortfall {
    NoWeapon,
    NoArmor,
    /// Best weapon is not the steel sword.
    WrongWeapon { wielded: String },
}

/// Every requirement the loadout misses, in weapon-then-armor order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DragonReadiness {
    pub shortfalls: SmallVec<[Shortfall; 2]>,
}

impl DragonReadiness {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.shortfalls.is_empty()
    }
}

/// Inspect the loadout: the best weapon must be the steel sword and some
/// armor must be present. Armor tier is irrelevant.
#[must_use]
pub fn dragon_readiness(inventory: &Inventory) -> DragonReadiness {
    let mut shortfalls = SmallVec::new();
    match inventory.best(ItemCategory::Weapon).first() {
        None => shortfalls.push(Shortfall::NoWeapon),
        Some(weapon) if !weapon.is(STEEL_SWORD_ID) => {
            let wielded = weapon.name.clone();
            shortfalls.push(Shortfall::WrongWeapon { wielded });
        }
        Some(_) => {}
    }
    if !inventory.has_category(ItemCategory::Armor) {
        shortfalls.push(Shortfall::NoArmor);
    }
    DragonReadiness { shortfalls }
}

#[must_use]
pub fn is_dragon_ready(inventory: &Inventory) -> bool {
    dragon_readiness(inventory).is_ready()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn inventory_of(ids: &[&str]) -> Inventory {
        let catalog = Catalog::default();
        let mut inventory = Inventory::new();
        for id in ids {
            inventory.push(catalog.find(id).cloned().unwrap());
        }
        inventory
    }

    #[test]
    fn steel_sword_and_any_armor_is_ready() {
        let starter = inventory_of(&["steel_sword", "wooden_shield"]);
        assert!(is_dragon_ready(&starter));
        let upgraded = inventory_of(&["iron_shield", "basic_sword", "steel_sword"]);
        assert!(is_dragon_ready(&upgraded));
    }

    #[test]
    fn empty_inventory_lists_both_shortfalls() {
        let readiness = dragon_readiness(&Inventory::new());
        assert!(!readiness.is_ready());
        assert_eq!(
            readiness.shortfalls.as_slice(),
            [Shortfall::NoWeapon, Shortfall::NoArmor]
        );
    }

    #[test]
    fn basic_sword_is_the_wrong_tier() {
        let readiness = dragon_readiness(&inventory_of(&["basic_sword", "iron_shield"]));
        let wielded = "Basic Sword".to_string();
        assert_eq!(
            readiness.shortfalls.as_slice(),
            [Shortfall::WrongWeapon { wielded }]
        );
    }

    #[test]
    fn steel_sword_without_armor_is_not_ready() {
        let readiness = dragon_readiness(&inventory_of(&["steel_sword", "health_potion"]));
        assert_eq!(readiness.shortfalls.as_slice(), [Shortfall::NoArmor]);
    }
}
