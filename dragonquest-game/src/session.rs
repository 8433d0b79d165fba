//! A single playthrough: command dispatch, terminal checks and snapshots.
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Item, Shop};
use crate::combat::{CombatOutcome, MonsterKind, resolve_combat};
use crate::config::GameConfig;
use crate::events::GameEvent;
use crate::item_use::{ItemUseOutcome, use_item};
use crate::location::{Location, MenuAction, Pick};
use crate::shop::{ShopOutcome, visit_shop};
use crate::state::PlayerState;

/// How a session finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Ending {
    /// The dragon fell; `gold` is the final purse.
    Victory { gold: i32 },
    Defeat,
    Quit,
}

impl Ending {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Victory { .. } => "victory",
            Self::Defeat => "defeat",
            Self::Quit => "quit",
        }
    }
}

/// A menu action plus the secondary pick some actions need.
///
/// `pick` matters only for item use and blacksmith purchases; the market
/// always sells its single potion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub action: MenuAction,
    pub pick: Pick,
}

impl Command {
    #[must_use]
    pub const fn new(action: MenuAction) -> Self {
        Self {
            action,
            pick: Pick::Cancel,
        }
    }

    #[must_use]
    pub const fn with_pick(mut self, pick: Pick) -> Self {
        self.pick = pick;
        self
    }
}

impl From<MenuAction> for Command {
    fn from(action: MenuAction) -> Self {
        Self::new(action)
    }
}

/// What a single turn did, for callers that branch on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Session already over, or the action is not on the current menu.
    Ignored,
    Moved { from: Location, to: Location },
    Status,
    Help,
    Shop(ShopOutcome),
    ItemUse(ItemUseOutcome),
    Combat {
        kind: MonsterKind,
        outcome: CombatOutcome,
    },
    Quit,
}

/// Read-only view handed to the presentation layer after each turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub name: String,
    pub health: i32,
    pub gold: i32,
    pub location: Location,
    pub inventory: Vec<Item>,
    pub menu: Vec<MenuAction>,
    pub events: Vec<GameEvent>,
    pub ending: Option<Ending>,
    pub turns: u32,
}

/// One playthrough: owns the player and catalog and checks the terminal
/// conditions after every command.
#[derive(Debug, Clone)]
pub struct Session {
    player: PlayerState,
    catalog: Catalog,
    events: Vec<GameEvent>,
    ending: Option<Ending>,
    turns: u32,
}

impl Session {
    #[must_use]
    pub fn new(name: &str, catalog: Catalog, config: &GameConfig) -> Self {
        Self::from_state(PlayerState::new(name, config), catalog)
    }

    /// Resume from an existing player. A player already at zero health
    /// starts out defeated.
    #[must_use]
    pub fn from_state(player: PlayerState, catalog: Catalog) -> Self {
        let ending = (!player.is_alive()).then_some(Ending::Defeat);
        Self {
            player,
            catalog,
            events: Vec::new(),
            ending,
            turns: 0,
        }
    }

    #[must_use]
    pub const fn player(&self) -> &PlayerState {
        &self.player
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn location(&self) -> Location {
        self.player.location
    }

    #[must_use]
    pub const fn menu(&self) -> &'static [MenuAction] {
        self.player.location.menu()
    }

    #[must_use]
    pub fn action_for(&self, choice: usize) -> Option<MenuAction> {
        self.player.location.action_for(choice)
    }

    /// Items on the counter for `shop`, in the order picks refer to them.
    #[must_use]
    pub fn stock(&self, shop: Shop) -> Vec<&Item> {
        self.catalog.stock(shop)
    }

    /// Events narrated by the most recent command.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    #[must_use]
    pub const fn ending(&self) -> Option<Ending> {
        self.ending
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.ending.is_some()
    }

    #[must_use]
    pub const fn turns(&self) -> u32 {
        self.turns
    }

    /// Apply a closure to the mutable player.
    pub fn with_player_mut<R>(&mut self, f: impl FnOnce(&mut PlayerState) -> R) -> R {
        f(&mut self.player)
    }

    /// Resolve a 1-based menu choice and run it.
    pub fn choose(&mut self, choice: usize, pick: Pick) -> TurnOutcome {
        match self.action_for(choice) {
            Some(action) => self.perform(Command::new(action).with_pick(pick)),
            None => {
                self.events.clear();
                log::debug!("choice {choice} not on the {} menu", self.location());
                TurnOutcome::Ignored
            }
        }
    }

    /// Run one command. The previous turn's events are discarded first.
    pub fn perform(&mut self, command: Command) -> TurnOutcome {
        self.events.clear();
        if self.ending.is_some() {
            return TurnOutcome::Ignored;
        }
        let Command { action, pick } = command;
        if !self.menu().contains(&action) {
            log::debug!("{action:?} not available at {}", self.location());
            return TurnOutcome::Ignored;
        }
        self.turns += 1;
        log::debug!("turn {} at {}: {action:?}", self.turns, self.location());

        let outcome = match action {
            MenuAction::Travel(to) => {
                let from = self.player.location;
                self.player.location = to;
                self.events.push(GameEvent::Traveled { from, to });
                TurnOutcome::Moved { from, to }
            }
            MenuAction::CheckStatus => {
                self.events.push(GameEvent::StatusShown);
                TurnOutcome::Status
            }
            MenuAction::Help => {
                self.events.push(GameEvent::HelpShown);
                TurnOutcome::Help
            }
            MenuAction::UseItem => {
                TurnOutcome::ItemUse(use_item(&mut self.player, pick, &mut self.events))
            }
            MenuAction::Buy(shop) => {
                let pick = match shop {
                    Shop::Blacksmith => pick,
                    Shop::Market => Pick::from_number(1),
                };
                TurnOutcome::Shop(visit_shop(
                    &mut self.player,
                    &self.catalog,
                    shop,
                    pick,
                    &mut self.events,
                ))
            }
            MenuAction::Fight(kind) => TurnOutcome::Combat {
                kind,
                outcome: resolve_combat(&mut self.player, kind, &mut self.events),
            },
            MenuAction::Quit => {
                self.events.push(GameEvent::Quit);
                TurnOutcome::Quit
            }
        };

        self.settle(&outcome);
        outcome
    }

    fn settle(&mut self, outcome: &TurnOutcome) {
        let ending = match outcome {
            TurnOutcome::Quit => Some(Ending::Quit),
            _ if !self.player.is_alive() => Some(Ending::Defeat),
            TurnOutcome::Combat {
                kind: MonsterKind::Dragon,
                outcome: CombatOutcome::Victory { .. },
            } => Some(Ending::Victory {
                gold: self.player.gold,
            }),
            _ => None,
        };
        if let Some(ending) = ending {
            log::info!(
                "session ended: {} after {} turns ({} gold)",
                ending.as_str(),
                self.turns,
                self.player.gold
            );
            self.events.push(GameEvent::SessionEnded { ending });
            self.ending = Some(ending);
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            name: self.player.name.clone(),
            health: self.player.health,
            gold: self.player.gold,
            location: self.player.location,
            inventory: self.player.inventory.items().to_vec(),
            menu: self.menu().to_vec(),
            events: self.events.clone(),
            ending: self.ending,
            turns: self.turns,
        }
    }
}
