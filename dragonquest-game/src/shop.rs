//! Blacksmith and market purchasing.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Catalog, Item, Shop};
use crate::events::GameEvent;
use crate::location::Pick;
use crate::state::PlayerState;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PurchaseError {
    #[error("not enough gold for {item}: costs {cost}, have {gold}")]
    InsufficientGold { item: String, cost: i32, gold: i32 },
    #[error("already own {item}")]
    AlreadyOwned { item: String },
    #[error("{shop} has no item at position {position}")]
    NotStocked { shop: Shop, position: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub item: Item,
    pub cost: i32,
    pub gold_left: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ShopOutcome {
    Bought(PurchaseReceipt),
    Refused(PurchaseError),
    JustLooking,
}

/// Check whether `item` can be bought without touching state.
///
/// Gold is checked before ownership. Weapons and armor are unique by id;
/// potions stack.
///
/// # Errors
///
/// Returns `InsufficientGold` or `AlreadyOwned`.
pub fn quote_purchase(
    player: &PlayerState,
    item: &Item,
) -> Result<PurchaseReceipt, PurchaseError> {
    if player.gold < item.cost {
        return Err(PurchaseError::InsufficientGold {
            item: item.name.clone(),
            cost: item.cost,
            gold: player.gold,
        });
    }
    if item.category.is_unique() && player.inventory.contains_id(item.id.as_str()) {
        return Err(PurchaseError::AlreadyOwned {
            item: item.name.clone(),
        });
    }
    Ok(PurchaseReceipt {
        item: item.clone(),
        cost: item.cost,
        gold_left: player.gold - item.cost,
    })
}

/// Deduct the cost and add `item` to the inventory.
///
/// # Errors
///
/// Same as [`quote_purchase`]; state is untouched on error.
pub fn apply_purchase(
    player: &mut PlayerState,
    item: &Item,
) -> Result<PurchaseReceipt, PurchaseError> {
    let receipt = quote_purchase(player, item)?;
    if !player.spend_gold(receipt.cost) {
        return Err(PurchaseError::InsufficientGold {
            item: item.name.clone(),
            cost: item.cost,
            gold: player.gold,
        });
    }
    player.inventory.push(receipt.item.clone());
    log::debug!("bought {} for {}", item.id, item.cost);
    Ok(receipt)
}

/// Handle a shop counter visit: `pick` selects from [`Catalog::stock`] for
/// `shop`, and `Pick::Cancel` walks away without buying.
pub fn visit_shop(
    player: &mut PlayerState,
    catalog: &Catalog,
    shop: Shop,
    pick: Pick,
    events: &mut Vec<GameEvent>,
) -> ShopOutcome {
    let Some(position) = pick.position() else {
        events.push(GameEvent::JustLooking { shop });
        return ShopOutcome::JustLooking;
    };

    let stock = catalog.stock(shop);
    let result = match stock.get(position) {
        Some(item) => apply_purchase(player, item),
        None => Err(PurchaseError::NotStocked {
            shop,
            position: position + 1,
        }),
    };

    match result {
        Ok(receipt) => {
            events.push(GameEvent::Purchased {
                shop,
                item: receipt.item.name.clone(),
                cost: receipt.cost,
                gold_left: receipt.gold_left,
            });
            ShopOutcome::Bought(receipt)
        }
        Err(reason) => {
            log::debug!("purchase refused at {shop}: {reason}");
            events.push(GameEvent::PurchaseRefused {
                shop,
                reason: reason.clone(),
            });
            ShopOutcome::Refused(reason)
        }
    }
}
