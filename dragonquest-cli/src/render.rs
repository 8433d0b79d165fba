//! Presentation boundary: turns snapshots and events into console text.
use std::io::{self, Write};

use colored::Colorize;
use dragonquest_game::{
    Catalog, Ending, GameEvent, HealthClamp, Item, ItemUseError, Location, MenuAction,
    MonsterKind, PurchaseError, Shop, Shortfall, Snapshot,
};

/// Fallback prices when a custom catalog lacks the usual items.
const DEFAULT_POTION_COST: i32 = 5;
const DEFAULT_SWORD_COST: i32 = 10;

pub fn banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "=================================".bright_cyan())?;
    writeln!(
        out,
        "{}",
        "       The Dragon's Quest        ".bright_cyan().bold()
    )?;
    writeln!(out, "{}", "=================================".bright_cyan())?;
    writeln!(out, "\nYour quest: Defeat the dragon in the mountains!")
}

pub fn welcome(out: &mut impl Write, snapshot: &Snapshot) -> io::Result<()> {
    writeln!(out, "\nWelcome, {}!", snapshot.name)?;
    writeln!(out, "You start with {} gold.", snapshot.gold)
}

#[must_use]
pub const fn describe(location: Location) -> &'static str {
    match location {
        Location::Village => {
            "You're in a bustling village. The blacksmith and market are nearby."
        }
        Location::Blacksmith => {
            "The heat from the forge fills the air. Weapons and armor line the walls."
        }
        Location::Market => {
            "Merchants sell their wares from colorful stalls. A potion seller catches your eye."
        }
        Location::Forest => {
            "The forest is dark and foreboding. You hear strange noises all around you."
        }
    }
}

/// Writes everything the player sees, priced from the active catalog.
pub struct Narrator {
    potion_cost: i32,
    sword_cost: i32,
}

impl Narrator {
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            potion_cost: catalog
                .market_potion()
                .map_or(DEFAULT_POTION_COST, |item| item.cost),
            sword_cost: catalog
                .find("basic_sword")
                .map_or(DEFAULT_SWORD_COST, |item| item.cost),
        }
    }

    #[must_use]
    pub fn menu_label(&self, action: MenuAction) -> String {
        match action {
            MenuAction::Travel(Location::Blacksmith) => "Go to blacksmith".to_string(),
            MenuAction::Travel(Location::Market) => "Go to market".to_string(),
            MenuAction::Travel(Location::Forest) => "Enter forest".to_string(),
            MenuAction::Travel(Location::Village) => "Return to village".to_string(),
            MenuAction::Buy(Shop::Blacksmith) => "Buy weapons or armor".to_string(),
            MenuAction::Buy(Shop::Market) => format!("Buy potion ({} gold)", self.potion_cost),
            MenuAction::CheckStatus => "Check status".to_string(),
            MenuAction::UseItem => "Use item".to_string(),
            MenuAction::Help => "Help".to_string(),
            MenuAction::Fight(MonsterKind::Minion) => "Hunt the Dragon's minions!".to_string(),
            MenuAction::Fight(MonsterKind::Dragon) => "Face the Dragon!".to_string(),
            MenuAction::Quit => "Quit game".to_string(),
        }
    }

    pub fn location(&self, out: &mut impl Write, location: Location) -> io::Result<()> {
        let header = format!("\n=== {} ===", location.as_str().to_uppercase());
        writeln!(out, "{}", header.bright_yellow().bold())?;
        writeln!(out, "{}", describe(location))?;
        writeln!(out, "\nWhat would you like to do?")?;
        for (index, action) in location.menu().iter().enumerate() {
            writeln!(out, "{}: {}", index + 1, self.menu_label(*action))?;
        }
        Ok(())
    }

    pub fn status(&self, out: &mut impl Write, snapshot: &Snapshot) -> io::Result<()> {
        writeln!(out, "\n=== {}'s Status ===", snapshot.name)?;
        writeln!(out, "❤️  Health: {}", snapshot.health)?;
        writeln!(out, "💰 Gold: {}", snapshot.gold)?;
        writeln!(out, "📍 Location: {}", snapshot.location)?;
        writeln!(out, "🎒 Inventory: ")?;
        if snapshot.inventory.is_empty() {
            writeln!(out, "   Nothing in inventory")?;
        }
        for (index, item) in snapshot.inventory.iter().enumerate() {
            writeln!(
                out,
                "   {}. {} - {}",
                index + 1,
                item.name,
                item.description
            )?;
        }
        Ok(())
    }

    pub fn inventory_choices(&self, out: &mut impl Write, items: &[Item]) -> io::Result<()> {
        writeln!(out, "\n=== Inventory ===")?;
        for (index, item) in items.iter().enumerate() {
            writeln!(out, "{}. {}", index + 1, item.name)?;
        }
        Ok(())
    }

    pub fn counter(&self, out: &mut impl Write, stock: &[&Item]) -> io::Result<()> {
        writeln!(
            out,
            "We have a variety of weapons and armor to choose from:"
        )?;
        for (index, item) in stock.iter().enumerate() {
            writeln!(out, "{} {} - {} gold", index + 1, item.name, item.cost)?;
        }
        writeln!(
            out,
            "{} Don't buy anything at this time - 0 gold",
            stock.len() + 1
        )
    }

    pub fn help(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(
            out,
            "{}",
            "\n=== AVAILABLE COMMANDS ===".bright_cyan().bold()
        )?;

        writeln!(out, "\nMovement Commands:")?;
        writeln!(
            out,
            "- In the village, choose 1-3 to travel to different locations"
        )?;
        writeln!(
            out,
            "- In other locations, choose the return option to go back to the village"
        )?;

        writeln!(out, "\nBattle Information:")?;
        writeln!(out, "- You need a weapon to win battles")?;
        writeln!(out, "- Weapons have different damage values")?;
        writeln!(out, "- You can buy weapons and armor from the Blacksmith")?;
        writeln!(out, "- Monsters appear in the forest")?;
        writeln!(
            out,
            "- Without a weapon, you'll lose health when retreating"
        )?;
        writeln!(
            out,
            "- The Dragon can only be fought with a Steel Sword and armor"
        )?;

        writeln!(out, "\nItem Usage:")?;
        writeln!(
            out,
            "- Health potions restore health based on their effect value"
        )?;
        writeln!(
            out,
            "- You can buy potions at the market for {} gold",
            self.potion_cost
        )?;
        writeln!(
            out,
            "- You can buy a sword at the blacksmith for {} gold",
            self.sword_cost
        )?;

        writeln!(out, "\nOther Commands:")?;
        writeln!(
            out,
            "- Choose the status option to see your health and gold"
        )?;
        writeln!(out, "- Choose the help option to see this message again")?;
        writeln!(out, "- Choose the quit option to end the game")?;

        writeln!(out, "\nTips:")?;
        writeln!(out, "- Keep healing potions for dangerous areas")?;
        writeln!(out, "- Defeat monsters to earn gold")?;
        writeln!(out, "- Health can't go above 100")
    }

    /// Narrate one event. `snapshot` is the state after the turn.
    pub fn event(
        &self,
        out: &mut impl Write,
        event: &GameEvent,
        snapshot: &Snapshot,
    ) -> io::Result<()> {
        match event {
            GameEvent::Traveled { from, to } => writeln!(out, "\n{}", travel_line(*from, *to)),
            GameEvent::StatusShown => self.status(out, snapshot),
            GameEvent::HelpShown => self.help(out),
            GameEvent::Quit => writeln!(out, "\n{}", "Thanks for playing!".bright_cyan()),

            GameEvent::Purchased {
                shop: Shop::Blacksmith,
                item,
                cost,
                gold_left,
            } => {
                writeln!(out, "You have bought a {item} for {cost} gold.")?;
                writeln!(out, "You have {gold_left} gold remaining!")
            }
            GameEvent::Purchased {
                shop: Shop::Market,
                item,
                cost,
                gold_left,
            } => {
                writeln!(out, "\nMerchant: 'This potion will heal your wounds!'")?;
                writeln!(out, "You bought a {item} for {cost} gold!")?;
                writeln!(out, "Gold remaining: {gold_left}")
            }
            GameEvent::PurchaseRefused { shop, reason } => {
                writeln!(out, "{}", refusal_line(*shop, reason).red())
            }
            GameEvent::JustLooking { .. } => writeln!(out, "Looking is free!"),

            GameEvent::PotionDrunk { item } => writeln!(out, "\nYou drink the {item}."),
            GameEvent::GearReadied { item } => writeln!(out, "\nYou ready your {item} for battle."),
            GameEvent::ItemUseCancelled => writeln!(out, "You put your pack away."),
            GameEvent::ItemUseRefused { reason } => match reason {
                ItemUseError::EmptyInventory => {
                    writeln!(out, "\nYou have no items!")
                }
                ItemUseError::InvalidChoice { .. } => {
                    writeln!(out, "{}", "\nInvalid item number!".red())
                }
            },

            GameEvent::HealthChanged { change } => {
                match change.clamp {
                    Some(HealthClamp::FullHealth) => {
                        writeln!(out, "{}", "You're at full health!".green())?;
                    }
                    Some(HealthClamp::GravelyWounded) => {
                        writeln!(out, "{}", "You're gravely wounded!".red().bold())?;
                    }
                    None => {}
                }
                writeln!(out, "Health is now: {}", change.after)
            }

            GameEvent::EncounterBegan { monster, kind } => match kind {
                MonsterKind::Minion => {
                    writeln!(out, "\nA {monster} of the Dragon blocks your path!")
                }
                MonsterKind::Dragon => {
                    writeln!(out, "\nThe {monster} descends from the mountains!")
                }
            },
            GameEvent::DragonSized { prepared } => {
                if *prepared {
                    writeln!(out, "You are prepared to fight the dragon!")?;
                } else {
                    writeln!(
                        out,
                        "{}",
                        "You are not prepared to face the dragon!".yellow()
                    )?;
                }
                writeln!(out, "The Dragon's breath, claws, and teeth are terrible!")?;
                writeln!(out, "Its thick hide will shrug off ordinary weapons.")
            }
            GameEvent::Retreated {
                monster,
                kind,
                reasons,
                armor,
                ..
            } => {
                if *kind == MonsterKind::Minion {
                    writeln!(out, "The {monster}'s claws rake at you. Ouch!")?;
                }
                for reason in reasons {
                    writeln!(out, "{}", shortfall_line(monster, reason).yellow())?;
                }
                writeln!(out, "You must retreat!")?;
                if let Some(armor) = armor {
                    writeln!(out, "Luckily your {armor} reduced the damage!")?;
                }
                Ok(())
            }
            GameEvent::AdvancedToBattle { weapon, armor } => match armor {
                Some(armor) => writeln!(
                    out,
                    "You brandish your {weapon} and heft your {armor} and advance to battle!"
                ),
                None => writeln!(out, "You brandish your {weapon} and advance to battle!"),
            },
            GameEvent::PlayerStruck {
                monster, damage, ..
            } => writeln!(out, "You attack! The {monster} loses {damage} health!"),
            GameEvent::MonsterStruck {
                monster,
                raw,
                armor,
                absorbed,
                ..
            } => {
                writeln!(
                    out,
                    "The {monster} strikes back, doing {raw} damage to your health!"
                )?;
                match (armor, absorbed) {
                    (Some(armor), true) => {
                        writeln!(out, "Your {armor} blocks the blow, but it still stings!")
                    }
                    (Some(armor), false) => {
                        writeln!(out, "However, your {armor} blocks some of the damage!")
                    }
                    (None, _) => Ok(()),
                }
            }
            GameEvent::MonsterDefeated {
                monster, treasure, ..
            } => {
                writeln!(
                    out,
                    "{}",
                    format!("Congratulations! You have defeated the {monster}!").green()
                )?;
                writeln!(out, "You gained {treasure} gold from its hoard!")
            }
            GameEvent::DragonSlain { final_gold } => writeln!(
                out,
                "{}",
                format!("You have won the game with {final_gold} gold!")
                    .bright_green()
                    .bold()
            ),
            GameEvent::PlayerFell { monster } => {
                writeln!(out, "{}", format!("The {monster} has bested you...").red())
            }

            GameEvent::SessionEnded { ending } => match ending {
                Ending::Victory { .. } => self.status(out, snapshot),
                Ending::Defeat => writeln!(
                    out,
                    "\n{}",
                    "Game Over! Your health reached 0!".red().bold()
                ),
                Ending::Quit => Ok(()),
            },
        }
    }
}

fn travel_line(from: Location, to: Location) -> &'static str {
    match (from, to) {
        (_, Location::Blacksmith) => "You enter the blacksmith's shop.",
        (_, Location::Market) => "You enter the market.",
        (_, Location::Forest) => "You venture into the forest...",
        (Location::Forest, Location::Village) => "You hurry back to the safety of the village.",
        (_, Location::Village) => "You return to the village center.",
    }
}

fn refusal_line(shop: Shop, reason: &PurchaseError) -> String {
    match (shop, reason) {
        (Shop::Market, PurchaseError::InsufficientGold { .. }) => {
            "\nMerchant: 'No gold, no potion!'".to_string()
        }
        (Shop::Blacksmith, PurchaseError::InsufficientGold { item, .. }) => {
            format!("Blacksmith: 'You don't have enough gold for that {item}!'")
        }
        (_, PurchaseError::AlreadyOwned { item }) => format!("You already have a {item}!"),
        (_, PurchaseError::NotStocked { .. }) => "Please enter a valid number.".to_string(),
    }
}

fn shortfall_line(monster: &str, reason: &Shortfall) -> String {
    match reason {
        Shortfall::NoWeapon => format!("Without a weapon, you cannot defeat the {monster}!"),
        Shortfall::NoArmor => format!("Without armor, you cannot withstand the {monster}!"),
        Shortfall::WrongWeapon { wielded } => {
            format!("Your {wielded} cannot pierce the {monster}'s hide. You need a Steel Sword!")
        }
    }
}
