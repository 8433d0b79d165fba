//! Balance and tuning constants for Dragon's Quest game logic.

// Player bounds ------------------------------------------------------------
pub const MAX_HEALTH: i32 = 100;
pub const MIN_HEALTH: i32 = 0;
pub const STARTING_HEALTH: i32 = 100;
pub const STARTING_GOLD: i32 = 20;

// Item identifiers ---------------------------------------------------------
/// The top-tier weapon required to face the dragon.
pub const STEEL_SWORD_ID: &str = "steel_sword";

// Monster tuning -----------------------------------------------------------
pub(crate) const MINION_NAME: &str = "Minion";
pub(crate) const MINION_ATTACK: i32 = 10;
pub(crate) const MINION_HEALTH: i32 = 20;
pub(crate) const MINION_TREASURE: i32 = 10;
pub(crate) const MINION_DEFENSE: i32 = 5;

pub(crate) const DRAGON_NAME: &str = "Dragon";
pub(crate) const DRAGON_ATTACK: i32 = 20;
pub(crate) const DRAGON_HEALTH: i32 = 50;
pub(crate) const DRAGON_TREASURE: i32 = 50;
pub(crate) const DRAGON_DEFENSE: i32 = 10;

// Combat -------------------------------------------------------------------
/// Every landed hit deals at least this much, however strong the defense.
pub(crate) const MIN_HIT_DAMAGE: i32 = 1;
