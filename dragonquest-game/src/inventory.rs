//! Player inventory and best-item selection.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::catalog::{Item, ItemCategory};

/// Items tied at the top effect; two fit inline.
pub type TiedItems<'a> = SmallVec<[&'a Item; 2]>;

/// Result of looking for the strongest item of a category.
///
/// `Found` is never empty; its first element is the earliest-acquired item
/// among those tied at the maximum effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BestItems<'a> {
    Empty,
    Found(TiedItems<'a>),
}

impl<'a> BestItems<'a> {
    /// The conventional pick among tied items.
    #[must_use]
    pub fn first(&self) -> Option<&'a Item> {
        match self {
            Self::Empty => None,
            Self::Found(items) => items.first().copied(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Effect of the top item, or zero when nothing matched.
    #[must_use]
    pub fn effect_or_zero(&self) -> i32 {
        self.first().map_or(0, |item| item.effect)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Found(items) => items.len(),
        }
    }
}

/// Return every item of `category` tied at the maximum effect.
///
/// Single pass; ties keep inventory order.
#[must_use]
pub fn select_best_by_category(items: &[Item], category: ItemCategory) -> BestItems<'_> {
    let mut best: TiedItems<'_> = SmallVec::new();
    let mut best_effect = i32::MIN;
    for item in items.iter().filter(|item| item.category == category) {
        if item.effect > best_effect {
            best_effect = item.effect;
            best.clear();
            best.push(item);
        } else if item.effect == best_effect {
            best.push(item);
        }
    }
    if best.is_empty() {
        BestItems::Empty
    } else {
        BestItems::Found(best)
    }
}

/// Ordered item copies; insertion order is display and use order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrow by 0-based position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Exact id match; display names are never compared.
    #[must_use]
    pub fn contains_id(&self, item_id: &str) -> bool {
        self.items.iter().any(|item| item.is(item_id))
    }

    #[must_use]
    pub fn has_category(&self, category: ItemCategory) -> bool {
        self.items.iter().any(|item| item.category == category)
    }

    #[must_use]
    pub fn count_category(&self, category: ItemCategory) -> usize {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .count()
    }

    #[must_use]
    pub fn best(&self, category: ItemCategory) -> BestItems<'_> {
        select_best_by_category(&self.items, category)
    }

    pub(crate) fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
