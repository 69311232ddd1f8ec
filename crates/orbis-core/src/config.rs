//! Game configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings fixed when a [`Game`](crate::game::Game) is created.
///
/// Missing JSON fields fall back to their defaults.
///
/// # Example
///
/// ```
/// use orbis_core::config::GameConfig;
///
/// let config = GameConfig::from_json_str(r#"{ "min_players": 3 }"#).unwrap();
/// assert_eq!(config.min_players, 3);
/// assert_eq!(config.dice_sides, 6);
/// assert_eq!(config.seed, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of joined players needed before the first turn starts.
    pub min_players: usize,
    /// Faces on the die rolled at every turn transition.
    pub dice_sides: u32,
    /// Dice seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            dice_sides: 6,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Returns this config with a fixed dice seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns this config with a different player threshold.
    #[must_use]
    pub const fn with_min_players(mut self, min_players: usize) -> Self {
        self.min_players = min_players;
        self
    }

    /// Checks the constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `min_players` or `dice_sides` is
    /// zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players == 0 {
            return Err(ConfigError::invalid("min_players must be at least 1"));
        }
        if self.dice_sides == 0 {
            return Err(ConfigError::invalid("dice_sides must be at least 1"));
        }
        Ok(())
    }

    /// Parses and validates a config from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed JSON and
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
