//! Narrated events produced by core operations for the presentation layer.
use serde::{Deserialize, Serialize};

use crate::catalog::Shop;
use crate::combat::MonsterKind;
use crate::gate::Shortfall;
use crate::item_use::ItemUseError;
use crate::location::Location;
use crate::session::Ending;
use crate::shop::PurchaseError;
use crate::state::HealthChange;

/// One thing that happened during a turn, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    Traveled {
        from: Location,
        to: Location,
    },
    StatusShown,
    HelpShown,
    Quit,

    Purchased {
        shop: Shop,
        item: String,
        cost: i32,
        gold_left: i32,
    },
    PurchaseRefused {
        shop: Shop,
        reason: PurchaseError,
    },
    /// Left the shop without buying.
    JustLooking {
        shop: Shop,
    },

    PotionDrunk {
        item: String,
    },
    GearReadied {
        item: String,
    },
    ItemUseCancelled,
    ItemUseRefused {
        reason: ItemUseError,
    },

    /// Any health mutation, with the clamp signal if a bound was hit.
    HealthChanged {
        change: HealthChange,
    },

    EncounterBegan {
        monster: String,
        kind: MonsterKind,
    },
    /// Emitted before a dragon fight, once the gate has been checked.
    DragonSized {
        prepared: bool,
    },
    Retreated {
        monster: String,
        kind: MonsterKind,
        reasons: Vec<Shortfall>,
        damage: i32,
        armor: Option<String>,
    },
    AdvancedToBattle {
        weapon: String,
        armor: Option<String>,
    },
    PlayerStruck {
        monster: String,
        damage: i32,
        monster_health: i32,
    },
    MonsterStruck {
        monster: String,
        raw: i32,
        damage: i32,
        armor: Option<String>,
        /// Armor covered the whole blow; only the minimum got through.
        absorbed: bool,
    },
    MonsterDefeated {
        monster: String,
        treasure: i32,
        gold: i32,
    },
    DragonSlain {
        final_gold: i32,
    },
    PlayerFell {
        monster: String,
    },

    SessionEnded {
        ending: Ending,
    },
}

impl GameEvent {
    /// Stable key for logs and tests.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Traveled { .. } => "traveled",
            Self::StatusShown => "status_shown",
            Self::HelpShown => "help_shown",
            Self::Quit => "quit",
            Self::Purchased { .. } => "purchased",
            Self::PurchaseRefused { .. } => "purchase_refused",
            Self::JustLooking { .. } => "just_looking",
            Self::PotionDrunk { .. } => "potion_drunk",
            Self::GearReadied { .. } => "gear_readied",
            Self::ItemUseCancelled => "item_use_cancelled",
            Self::ItemUseRefused { .. } => "item_use_refused",
            Self::HealthChanged { .. } => "health_changed",
            Self::EncounterBegan { .. } => "encounter_began",
            Self::DragonSized { .. } => "dragon_sized",
            Self::Retreated { .. } => "retreated",
            Self::AdvancedToBattle { .. } => "advanced_to_battle",
            Self::PlayerStruck { .. } => "player_struck",
            Self::MonsterStruck { .. } => "monster_struck",
            Self::MonsterDefeated { .. } => "monster_defeated",
            Self::DragonSlain { .. } => "dragon_slain",
            Self::PlayerFell { .. } => "player_fell",
            Self::SessionEnded { .. } => "session_ended",
        }
    }
}
