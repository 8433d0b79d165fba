//! Session configuration: starting health and purse.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{MAX_HEALTH, STARTING_GOLD, STARTING_HEALTH};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub starting_health: i32,
    pub starting_gold: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_health: STARTING_HEALTH,
            starting_gold: STARTING_GOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("config could not be parsed: {0}")]
    Parse(String),
    #[error("{field} must be between {min} and {max} (got {value})")]
    RangeViolation {
        field: &'static str,
        min: i32,
        max: i32,
        value: i32,
    },
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: i32,
        value: i32,
    },
}

impl GameConfig {
    /// Parse and validate a JSON config object. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the input is not a JSON object, parsing fails,
    /// or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        if !value.is_object() {
            return Err(ConfigError::Parse(format!("expected a JSON object, found {value}")));
        }
        let config: Self =
            serde_json::from_value(value).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError` when any field violates its documented bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_HEALTH).contains(&self.starting_health) {
            return Err(ConfigError::RangeViolation {
                field: "starting_health",
                min: 1,
                max: MAX_HEALTH,
                value: self.starting_health,
            });
        }
        if self.starting_gold < 0 {
            return Err(ConfigError::MinViolation {
                field: "starting_gold",
                min: 0,
                value: self.starting_gold,
            });
        }
        Ok(())
    }
}
