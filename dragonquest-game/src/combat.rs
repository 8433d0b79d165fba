//! Combat resolution for forest encounters and the dragon.
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::catalog::{Item, ItemCategory};
use crate::constants::{
    DRAGON_ATTACK, DRAGON_DEFENSE, DRAGON_HEALTH, DRAGON_NAME, DRAGON_TREASURE, MIN_HIT_DAMAGE,
    MINION_ATTACK, MINION_DEFENSE, MINION_HEALTH, MINION_NAME, MINION_TREASURE,
};
use crate::events::GameEvent;
use crate::gate::{Shortfall, dragon_readiness};
use crate::state::PlayerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonsterKind {
    Minion,
    Dragon,
}

impl MonsterKind {
    #[must_use]
    pub const fn is_boss(self) -> bool {
        matches!(self, Self::Dragon)
    }
}

/// A monster for a single fight. Spawned at combat start, dropped at the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub name: &'static str,
    pub attack: i32,
    pub health: i32,
    pub treasure: i32,
    pub defense: i32,
}

impl Monster {
    #[must_use]
    pub const fn spawn(kind: MonsterKind) -> Self {
        match kind {
            MonsterKind::Minion => Self {
                name: MINION_NAME,
                attack: MINION_ATTACK,
                health: MINION_HEALTH,
                treasure: MINION_TREASURE,
                defense: MINION_DEFENSE,
            },
            MonsterKind::Dragon => Self {
                name: DRAGON_NAME,
                attack: DRAGON_ATTACK,
                health: DRAGON_HEALTH,
                treasure: DRAGON_TREASURE,
                defense: DRAGON_DEFENSE,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CombatOutcome {
    Victory { treasure: i32 },
    /// Took one hit and left without reward.
    Retreat,
    /// Health reached zero mid-fight.
    Defeat,
}

/// Net damage of a blow: `raw - reduction`, never less than one point.
#[must_use]
pub const fn hit_damage(raw: i32, reduction: i32) -> i32 {
    if reduction >= raw {
        MIN_HIT_DAMAGE
    } else {
        let net = raw - reduction;
        if net < MIN_HIT_DAMAGE {
            MIN_HIT_DAMAGE
        } else {
            net
        }
    }
}

/// Run an encounter against `kind` to completion.
///
/// Gear is checked before any blow is exchanged: the dragon demands the
/// steel sword plus armor, a minion demands any weapon. Missing gear costs
/// one reduced hit and a retreat. Otherwise player and monster trade blows
/// until one falls; victory pays the monster's treasure.
pub fn resolve_combat(
    player: &mut PlayerState,
    kind: MonsterKind,
    events: &mut Vec<GameEvent>,
) -> CombatOutcome {
    let monster = Monster::spawn(kind);
    events.push(GameEvent::EncounterBegan {
        monster: monster.name.to_string(),
        kind,
    });

    let weapon = player.inventory.best(ItemCategory::Weapon).first().cloned();
    let armor = player.inventory.best(ItemCategory::Armor).first().cloned();
    let reduction = armor.as_ref().map_or(0, |item| item.effect);

    let shortfalls: SmallVec<[Shortfall; 2]> = if kind.is_boss() {
        let readiness = dragon_readiness(&player.inventory);
        events.push(GameEvent::DragonSized {
            prepared: readiness.is_ready(),
        });
        readiness.shortfalls
    } else if weapon.is_none() {
        smallvec![Shortfall::NoWeapon]
    } else {
        SmallVec::new()
    };

    let weapon = match weapon {
        Some(weapon) if shortfalls.is_empty() => weapon,
        _ => {
            let reasons = if shortfalls.is_empty() {
                vec![Shortfall::NoWeapon]
            } else {
                shortfalls.into_vec()
            };
            return retreat(
                player,
                kind,
                &monster,
                reasons,
                reduction,
                armor.as_ref(),
                events,
            );
        }
    };

    events.push(GameEvent::AdvancedToBattle {
        weapon: weapon.name.clone(),
        armor: armor.as_ref().map(|item| item.name.clone()),
    });

    let mut monster_health = monster.health;
    let mut exchanges = 0_u32;
    while monster_health > 0 && player.is_alive() {
        exchanges += 1;
        let dealt = hit_damage(weapon.effect, monster.defense);
        monster_health -= dealt;
        events.push(GameEvent::PlayerStruck {
            monster: monster.name.to_string(),
            damage: dealt,
            monster_health: monster_health.max(0),
        });
        if monster_health <= 0 {
            break;
        }

        let taken = hit_damage(monster.attack, reduction);
        events.push(GameEvent::MonsterStruck {
            monster: monster.name.to_string(),
            raw: monster.attack,
            damage: taken,
            armor: armor.as_ref().map(|item| item.name.clone()),
            absorbed: armor.is_some() && reduction >= monster.attack,
        });
        let change = player.adjust_health(-taken);
        events.push(GameEvent::HealthChanged { change });
    }
    log::debug!("{} fight over after {exchanges} exchanges", monster.name);

    if !player.is_alive() {
        events.push(GameEvent::PlayerFell {
            monster: monster.name.to_string(),
        });
        return CombatOutcome::Defeat;
    }

    player.add_gold(monster.treasure);
    events.push(GameEvent::MonsterDefeated {
        monster: monster.name.to_string(),
        treasure: monster.treasure,
        gold: player.gold,
    });
    if kind.is_boss() {
        events.push(GameEvent::DragonSlain {
            final_gold: player.gold,
        });
    }
    CombatOutcome::Victory {
        treasure: monster.treasure,
    }
}

fn retreat(
    player: &mut PlayerState,
    kind: MonsterKind,
    monster: &Monster,
    reasons: Vec<Shortfall>,
    reduction: i32,
    armor: Option<&Item>,
    events: &mut Vec<GameEvent>,
) -> CombatOutcome {
    let damage = hit_damage(monster.attack, reduction);
    log::debug!("retreating from {}: {reasons:?}", monster.name);
    events.push(GameEvent::Retreated {
        monster: monster.name.to_string(),
        kind,
        reasons,
        damage,
        armor: armor.map(|item| item.name.clone()),
    });
    let change = player.adjust_health(-damage);
    events.push(GameEvent::HealthChanged { change });
    CombatOutcome::Retreat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::state::HealthClamp;

    fn player_with(ids: &[&str]) -> PlayerState {
        let catalog = Catalog::default();
        let mut player = PlayerState::default();
        for id in ids {
            player.inventory.push(catalog.find(id).cloned().unwrap());
        }
        player
    }

    fn count(events: &[GameEvent], key: &str) -> usize {
        events.iter().filter(|event| event.key() == key).count()
    }

    fn retreat_reasons(events: &[GameEvent]) -> Vec<Shortfall> {
        let retreat = events.iter().find(|event| event.key() == "retreated");
        let Some(GameEvent::Retreated { reasons, .. }) = retreat else {
            panic!("expected a retreat in {events:?}");
        };
        reasons.clone()
    }

    fn absorbed(event: &GameEvent) -> bool {
        matches!(
            event,
            GameEvent::MonsterStruck {
                absorbed: true,
                damage: 1,
                ..
            }
        )
    }

    #[test]
    fn damage_floor_is_one_point() {
        assert_eq!(hit_damage(10, 5), 5);
        assert_eq!(hit_damage(20, 10), 10);
        assert_eq!(hit_damage(10, 10), 1);
        assert_eq!(hit_damage(5, 10), 1);
        assert_eq!(hit_damage(0, 0), 1);
        assert_eq!(hit_damage(20, 0), 20);
    }

    #[test]
    fn unarmed_minion_hunt_retreats_after_one_hit() {
        let mut player = player_with(&[]);
        let mut events = Vec::new();
        let outcome = resolve_combat(&mut player, MonsterKind::Minion, &mut events);
        assert_eq!(outcome, CombatOutcome::Retreat);
        assert_eq!(player.health(), 90);
        assert_eq!(player.gold(), 20);
        assert_eq!(count(&events, "health_changed"), 1);
        assert_eq!(count(&events, "player_struck"), 0);
        assert_eq!(retreat_reasons(&events), vec![Shortfall::NoWeapon]);
    }

    #[test]
    fn unarmed_minion_hunt_with_armor_reduces_the_hit() {
        let mut player = player_with(&["wooden_shield"]);
        let mut events = Vec::new();
        resolve_combat(&mut player, MonsterKind::Minion, &mut events);
        assert_eq!(player.health(), 95);

        let mut player = player_with(&["iron_shield"]);
        let outcome = resolve_combat(&mut player, MonsterKind::Minion, &mut Vec::new());
        assert_eq!(outcome, CombatOutcome::Retreat);
        assert_eq!(player.health(), 99);
    }

    #[test]
    fn unprepared_dragon_fight_lists_each_shortfall() {
        let mut player = player_with(&[]);
        let mut events = Vec::new();
        let outcome = resolve_combat(&mut player, MonsterKind::Dragon, &mut events);
        assert_eq!(outcome, CombatOutcome::Retreat);
        assert_eq!(player.health(), 80);
        assert_eq!(player.gold(), 20);
        assert_eq!(count(&events, "health_changed"), 1);
        assert_eq!(count(&events, "player_struck"), 0);
        assert_eq!(
            retreat_reasons(&events),
            vec![Shortfall::NoWeapon, Shortfall::NoArmor]
        );
        assert!(events.contains(&GameEvent::DragonSized { prepared: false }));
    }

    #[test]
    fn basic_sword_cannot_face_the_dragon_even_with_armor() {
        let mut player = player_with(&["basic_sword", "iron_shield"]);
        let mut events = Vec::new();
        let outcome = resolve_combat(&mut player, MonsterKind::Dragon, &mut events);
        assert_eq!(outcome, CombatOutcome::Retreat);
        assert_eq!(player.health(), 90);
        let wielded = "Basic Sword".to_string();
        assert_eq!(
            retreat_reasons(&events),
            vec![Shortfall::WrongWeapon { wielded }]
        );
    }

    #[test]
    fn prepared_dragon_fight_takes_five_exchanges() {
        let mut player = player_with(&["steel_sword", "wooden_shield"]);
        let mut events = Vec::new();
        let outcome = resolve_combat(&mut player, MonsterKind::Dragon, &mut events);
        assert_eq!(outcome, CombatOutcome::Victory { treasure: 50 });
        let player_hits: Vec<i32> = events
            .iter()
            .filter_map(|event| match event {
                GameEvent::PlayerStruck { damage, .. } => Some(*damage),
                _ => None,
            })
            .collect();
        assert_eq!(player_hits, vec![10; 5]);
        assert_eq!(count(&events, "monster_struck"), 4);
        assert_eq!(player.health(), 40);
        assert_eq!(player.gold(), 70);
        assert!(events.contains(&GameEvent::DragonSlain { final_gold: 70 }));
    }

    #[test]
    fn minion_fight_matches_the_shop_scenario() {
        let mut player = player_with(&["basic_sword", "wooden_shield"]);
        player.gold = 2;
        let mut events = Vec::new();
        let outcome = resolve_combat(&mut player, MonsterKind::Minion, &mut events);
        assert_eq!(outcome, CombatOutcome::Victory { treasure: 10 });
        assert_eq!(count(&events, "player_struck"), 4);
        assert_eq!(count(&events, "monster_struck"), 3);
        assert_eq!(player.health(), 85);
        assert_eq!(player.gold(), 12);
        assert_eq!(count(&events, "dragon_slain"), 0);
    }

    #[test]
    fn fully_absorbed_blows_still_land_one_point() {
        let mut player = player_with(&["basic_sword", "iron_shield"]);
        let mut events = Vec::new();
        resolve_combat(&mut player, MonsterKind::Minion, &mut events);
        assert_eq!(player.health(), 97);
        let absorbed_hits = events.iter().filter(|event| absorbed(event)).count();
        assert_eq!(absorbed_hits, 3);
    }

    #[test]
    fn best_weapon_is_used_when_several_are_owned() {
        let mut player = player_with(&["basic_sword", "steel_sword"]);
        let mut events = Vec::new();
        resolve_combat(&mut player, MonsterKind::Minion, &mut events);
        let advanced = GameEvent::AdvancedToBattle {
            weapon: "Steel Sword".to_string(),
            armor: None,
        };
        assert!(events.contains(&advanced));
        // 20 vs defense 5 fells the minion in two blows.
        assert_eq!(count(&events, "player_struck"), 2);
        assert_eq!(player.health(), 90);
    }

    #[test]
    fn weak_player_falls_mid_fight() {
        let mut player = player_with(&["basic_sword"]);
        player.health = 15;
        let mut events = Vec::new();
        let outcome = resolve_combat(&mut player, MonsterKind::Minion, &mut events);
        assert_eq!(outcome, CombatOutcome::Defeat);
        assert_eq!(player.health(), 0);
        assert_eq!(player.gold(), 20);
        assert_eq!(count(&events, "player_fell"), 1);
        assert_eq!(count(&events, "monster_defeated"), 0);
        let last_change = events.iter().rev().find_map(|event| match event {
            GameEvent::HealthChanged { change } => Some(*change),
            _ => None,
        });
        assert_eq!(
            last_change.and_then(|change| change.clamp),
            Some(HealthClamp::GravelyWounded)
        );
    }
}
