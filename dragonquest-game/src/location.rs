//! Location graph and the numbered action menu each location offers.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;

use crate::catalog::Shop;
use crate::combat::MonsterKind;

/// Where the player stands. The village is the hub; every other location
/// leads only back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    #[default]
    Village,
    Blacksmith,
    Market,
    Forest,
}

impl Location {
    pub const ALL: [Self; 4] = [Self::Village, Self::Blacksmith, Self::Market, Self::Forest];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Village => "village",
            Self::Blacksmith => "blacksmith",
            Self::Market => "market",
            Self::Forest => "forest",
        }
    }

    /// Ordered menu; choice `n` maps to element `n - 1`.
    #[must_use]
    pub const fn menu(self) -> &'static [MenuAction] {
        match self {
            Self::Village => VILLAGE_MENU,
            Self::Blacksmith => BLACKSMITH_MENU,
            Self::Market => MARKET_MENU,
            Self::Forest => FOREST_MENU,
        }
    }

    #[must_use]
    pub const fn menu_size(self) -> usize {
        self.menu().len()
    }

    /// Resolve a 1-based menu choice.
    #[must_use]
    pub fn action_for(self, choice: usize) -> Option<MenuAction> {
        choice
            .checked_sub(1)
            .and_then(|index| self.menu().get(index))
            .copied()
    }

    /// Locations reachable in one step.
    #[must_use]
    pub fn exits(self) -> Vec<Self> {
        self.menu()
            .iter()
            .filter_map(|action| match action {
                MenuAction::Travel(to) => Some(*to),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something a location menu lets the player do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum MenuAction {
    Travel(Location),
    Buy(Shop),
    CheckStatus,
    UseItem,
    Help,
    Fight(MonsterKind),
    Quit,
}

const VILLAGE_MENU: &[MenuAction] = &[
    MenuAction::Travel(Location::Blacksmith),
    MenuAction::Travel(Location::Market),
    MenuAction::Travel(Location::Forest),
    MenuAction::CheckStatus,
    MenuAction::UseItem,
    MenuAction::Help,
    MenuAction::Quit,
];

const BLACKSMITH_MENU: &[MenuAction] = &[
    MenuAction::Buy(Shop::Blacksmith),
    MenuAction::Travel(Location::Village),
    MenuAction::CheckStatus,
    MenuAction::UseItem,
    MenuAction::Help,
    MenuAction::Quit,
];

const MARKET_MENU: &[MenuAction] = &[
    MenuAction::Buy(Shop::Market),
    MenuAction::Travel(Location::Village),
    MenuAction::CheckStatus,
    MenuAction::UseItem,
    MenuAction::Help,
    MenuAction::Quit,
];

const FOREST_MENU: &[MenuAction] = &[
    MenuAction::Travel(Location::Village),
    MenuAction::CheckStatus,
    MenuAction::UseItem,
    MenuAction::Help,
    MenuAction::Fight(MonsterKind::Minion),
    MenuAction::Fight(MonsterKind::Dragon),
    MenuAction::Quit,
];

/// Apply a menu choice to the location graph. Choices that are not travel
/// options for `current` leave it unchanged.
#[must_use]
pub fn apply_transition(current: Location, choice: usize) -> Location {
    match current.action_for(choice) {
        Some(MenuAction::Travel(to)) => to,
        _ => current,
    }
}

/// A secondary pick from a list (inventory slot or shop shelf).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pick {
    /// 1-based position in the list shown to the player.
    Index(NonZeroUsize),
    Cancel,
}

impl Pick {
    /// Build from a 1-based number; zero means cancel.
    #[must_use]
    pub fn from_number(number: usize) -> Self {
        NonZeroUsize::new(number).map_or(Self::Cancel, Self::Index)
    }

    /// 0-based position, if this is not a cancellation.
    #[must_use]
    pub fn position(self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(index.get() - 1),
            Self::Cancel => None,
        }
    }
}
