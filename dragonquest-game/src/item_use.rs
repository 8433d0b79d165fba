//! Using an inventory item outside combat.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Item, ItemCategory};
use crate::events::GameEvent;
use crate::location::Pick;
use crate::state::{HealthChange, PlayerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemUseError {
    #[error("inventory is empty")]
    EmptyInventory,
    #[error("no item at position {position} (carrying {carried})")]
    InvalidChoice { position: usize, carried: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ItemUseOutcome {
    /// Potion consumed and removed from the inventory.
    Drank { item: Item, change: HealthChange },
    /// Weapons and armor apply automatically in combat; nothing changes.
    Readied { item: Item },
    Cancelled,
    Refused(ItemUseError),
}

/// Use the item at `pick` (1-based in inventory order).
///
/// An empty inventory is refused before the pick is looked at.
pub fn use_item(
    player: &mut PlayerState,
    pick: Pick,
    events: &mut Vec<GameEvent>,
) -> ItemUseOutcome {
    if player.inventory.is_empty() {
        events.push(GameEvent::ItemUseRefused {
            reason: ItemUseError::EmptyInventory,
        });
        return ItemUseOutcome::Refused(ItemUseError::EmptyInventory);
    }
    let Some(position) = pick.position() else {
        events.push(GameEvent::ItemUseCancelled);
        return ItemUseOutcome::Cancelled;
    };

    let Some(item) = player.inventory.get(position).cloned() else {
        let reason = ItemUseError::InvalidChoice {
            position: position + 1,
            carried: player.inventory.len(),
        };
        events.push(GameEvent::ItemUseRefused { reason });
        return ItemUseOutcome::Refused(reason);
    };

    match item.category {
        ItemCategory::Potion => {
            player.inventory.remove(position);
            events.push(GameEvent::PotionDrunk {
                item: item.name.clone(),
            });
            let change = player.adjust_health(item.effect);
            events.push(GameEvent::HealthChanged { change });
            ItemUseOutcome::Drank { item, change }
        }
        ItemCategory::Weapon | ItemCategory::Armor => {
            events.push(GameEvent::GearReadied {
                item: item.name.clone(),
            });
            ItemUseOutcome::Readied { item }
        }
    }
}
