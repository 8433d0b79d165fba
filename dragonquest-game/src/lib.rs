//! Dragon's Quest Game Engine
//!
//! Platform-agnostic core for the Dragon's Quest console adventure: player
//! state, the location graph, shops, item use and combat. The crate performs
//! no terminal I/O; every operation narrates through [`GameEvent`] values.

pub mod catalog;
pub mod combat;
pub mod config;
pub mod constants;
pub mod events;
pub mod gate;
pub mod inventory;
pub mod item_use;
pub mod location;
pub mod session;
pub mod shop;
pub mod state;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, Item, ItemCategory, ItemId, Shop};
pub use combat::{CombatOutcome, Monster, MonsterKind, hit_damage, resolve_combat};
pub use config::{ConfigError, GameConfig};
pub use events::GameEvent;
pub use gate::{DragonReadiness, Shortfall, dragon_readiness, is_dragon_ready};
pub use inventory::{BestItems, Inventory, select_best_by_category};
pub use item_use::{ItemUseError, ItemUseOutcome, use_item};
pub use location::{Location, MenuAction, Pick, apply_transition};
pub use session::{Command, Ending, Session, Snapshot, TurnOutcome};
pub use shop::{PurchaseError, PurchaseReceipt, ShopOutcome, apply_purchase, quote_purchase};
pub use state::{HealthChange, HealthClamp, PlayerState};

use std::convert::Infallible;
use thiserror::Error;

/// Trait for abstracting data loading.
/// Platform-specific implementations should provide this.
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the item catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read or parsed.
    fn load_catalog(&self) -> Result<Catalog, Self::Error>;

    /// Load the session configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read or parsed.
    fn load_config(&self) -> Result<GameConfig, Self::Error>;
}

/// Loader backed by the data compiled into this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedLoader;

impl DataLoader for EmbeddedLoader {
    type Error = Infallible;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        Ok(Catalog::load_from_static())
    }

    fn load_config(&self) -> Result<GameConfig, Self::Error> {
        Ok(GameConfig::default())
    }
}

#[derive(Debug, Error)]
pub enum EngineError<E>
where
    E: std::error::Error + 'static,
{
    #[error("game data could not be loaded")]
    Load(#[source] E),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Main game engine: loads and validates data, then hands out sessions.
pub struct GameEngine<L>
where
    L: DataLoader,
{
    data_loader: L,
}

impl<L> GameEngine<L>
where
    L: DataLoader,
{
    pub const fn new(data_loader: L) -> Self {
        Self { data_loader }
    }

    /// Start a new session for a player called `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if data cannot be loaded or fails validation.
    pub fn create_session(&self, name: &str) -> Result<Session, EngineError<L::Error>> {
        let catalog = self.data_loader.load_catalog().map_err(EngineError::Load)?;
        catalog.validate()?;
        let config = self.data_loader.load_config().map_err(EngineError::Load)?;
        config.validate()?;
        let (health, gold) = (config.starting_health, config.starting_gold);
        log::debug!("new session for {name:?}: {health} hp, {gold} gold");
        Ok(Session::new(name, catalog, &config))
    }
}

impl Default for GameEngine<EmbeddedLoader> {
    fn default() -> Self {
        Self::new(EmbeddedLoader)
    }
}
