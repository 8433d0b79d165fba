//! Player state and the health-clamping rule.
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::constants::{MAX_HEALTH, MIN_HEALTH};
use crate::inventory::Inventory;
use crate::location::Location;

/// Which bound a health mutation ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthClamp {
    /// Healing overflowed the maximum.
    FullHealth,
    /// Damage would have taken health below zero.
    GravelyWounded,
}

/// Record of a single health mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthChange {
    /// Requested change before clamping.
    pub delta: i32,
    pub before: i32,
    pub after: i32,
    pub clamp: Option<HealthClamp>,
}

impl HealthChange {
    /// Change that actually landed after clamping.
    #[must_use]
    pub const fn applied(&self) -> i32 {
        self.after - self.before
    }
}

/// The adventurer. Owned by the session and lent to each operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub(crate) name: String,
    pub(crate) health: i32,
    pub(crate) gold: i32,
    pub(crate) location: Location,
    #[serde(default)]
    pub(crate) inventory: Inventory,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new("Adventurer", &GameConfig::default())
    }
}

impl PlayerState {
    #[must_use]
    pub fn new(name: &str, config: &GameConfig) -> Self {
        let name = name.trim();
        Self {
            name: if name.is_empty() {
                String::from("Adventurer")
            } else {
                name.to_string()
            },
            health: config.starting_health.clamp(MIN_HEALTH, MAX_HEALTH),
            gold: config.starting_gold.max(0),
            location: Location::Village,
            inventory: Inventory::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn health(&self) -> i32 {
        self.health
    }

    #[must_use]
    pub const fn gold(&self) -> i32 {
        self.gold
    }

    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > MIN_HEALTH
    }

    /// Add `delta` to health and clamp into `[0, 100]`, reporting which bound
    /// (if any) was hit.
    pub(crate) fn adjust_health(&mut self, delta: i32) -> HealthChange {
        let before = self.health;
        let raw = before.saturating_add(delta);
        let clamp = if raw > MAX_HEALTH {
            Some(HealthClamp::FullHealth)
        } else if raw < MIN_HEALTH {
            Some(HealthClamp::GravelyWounded)
        } else {
            None
        };
        self.health = raw.clamp(MIN_HEALTH, MAX_HEALTH);
        log::debug!("health {before} -> {} (delta {delta})", self.health);
        HealthChange {
            delta,
            before,
            after: self.health,
            clamp,
        }
    }

    pub(crate) fn add_gold(&mut self, amount: i32) {
        self.gold = self.gold.saturating_add(amount.max(0));
    }

    /// Deduct `amount` if affordable; gold never goes negative.
    pub(crate) fn spend_gold(&mut self, amount: i32) -> bool {
        if amount < 0 || self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_uses_config_and_defaults_name() {
        let player = PlayerState::new("  ", &GameConfig::default());
        assert_eq!(player.name(), "Adventurer");
        assert_eq!(player.health(), 100);
        assert_eq!(player.gold(), 20);
        assert_eq!(player.location(), Location::Village);
        assert!(player.inventory().is_empty());
    }

    #[test]
    fn healing_at_full_health_signals_full() {
        let mut player = PlayerState::default();
        let change = player.adjust_health(30);
        assert_eq!(player.health(), 100);
        assert_eq!(change.clamp, Some(HealthClamp::FullHealth));
        assert_eq!(change.applied(), 0);
    }

    #[test]
    fn damage_at_zero_signals_gravely_wounded() {
        let mut player = PlayerState::default();
        player.health = 0;
        let change = player.adjust_health(-10);
        assert_eq!(player.health(), 0);
        assert_eq!(change.clamp, Some(HealthClamp::GravelyWounded));
        assert!(!player.is_alive());
    }

    #[test]
    fn landing_exactly_on_a_bound_is_not_a_clamp() {
        let mut player = PlayerState::default();
        player.health = 5;
        let change = player.adjust_health(-5);
        assert_eq!(change.after, 0);
        assert_eq!(change.clamp, None);

        player.health = 70;
        let change = player.adjust_health(30);
        assert_eq!(change.after, 100);
        assert_eq!(change.clamp, None);
    }

    #[test]
    fn health_stays_in_bounds_for_any_delta() {
        let mut player = PlayerState::default();
        for delta in [-250, 40, 7, -3, 500, i32::MIN, i32::MAX, -99, 12] {
            player.adjust_health(delta);
            assert!((0..=100).contains(&player.health()), "delta {delta}");
        }
    }

    #[test]
    fn spending_gold_never_goes_negative() {
        let mut player = PlayerState::default();
        assert!(!player.spend_gold(21));
        assert_eq!(player.gold(), 20);
        assert!(player.spend_gold(20));
        assert_eq!(player.gold(), 0);
        player.add_gold(50);
        player.add_gold(-10);
        assert_eq!(player.gold(), 50);
    }
}
