//! Dice used to decide how far the current player may move.
//!
//! The game rolls exactly once per turn transition. [`SeededDice`] draws from
//! a `ChaCha8Rng`, so two games built with the same seed see the same rolls.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::GameConfig;
use crate::error::ConfigError;

/// Source of dice rolls.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Dice: Send {
    /// Rolls once.
    fn roll(&mut self) -> u32;
}

/// Uniform die with a fixed number of sides, backed by a seeded RNG.
///
/// # Example
///
/// ```
/// use orbis_core::dice::{Dice, SeededDice};
///
/// let mut a = SeededDice::new(6, 42).unwrap();
/// let mut b = SeededDice::new(6, 42).unwrap();
///
/// let rolls_a: Vec<u32> = (0..5).map(|_| a.roll()).collect();
/// let rolls_b: Vec<u32> = (0..5).map(|_| b.roll()).collect();
/// assert_eq!(rolls_a, rolls_b);
/// assert!(rolls_a.iter().all(|r| (1..=6).contains(r)));
/// ```
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: ChaCha8Rng,
    sides: u32,
    seed: Option<u64>,
}

impl SeededDice {
    /// Creates a die with `sides` faces seeded from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `sides` is zero.
    pub fn new(sides: u32, seed: u64) -> Result<Self, ConfigError> {
        Self::check_sides(sides)?;
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            sides,
            seed: Some(seed),
        })
    }

    /// Creates a die seeded from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `sides` is zero.
    pub fn from_entropy(sides: u32) -> Result<Self, ConfigError> {
        Self::check_sides(sides)?;
        Ok(Self {
            rng: ChaCha8Rng::from_entropy(),
            sides,
            seed: None,
        })
    }

    /// Creates a die from `config.dice_sides`, seeded from `config.seed` or
    /// from entropy when no seed is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `dice_sides` is zero.
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        match config.seed {
            Some(seed) => Self::new(config.dice_sides, seed),
            None => Self::from_entropy(config.dice_sides),
        }
    }

    /// Number of faces.
    #[must_use]
    pub const fn sides(&self) -> u32 {
        self.sides
    }

    /// Seed this die was created with, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn check_sides(sides: u32) -> Result<(), ConfigError> {
        if sides == 0 {
            return Err(ConfigError::invalid("dice must have at least one side"));
        }
        Ok(())
    }
}

impl Dice for SeededDice {
    fn roll(&mut self) -> u32 {
        self.rng.gen_range(1..=self.sides)
    }
}
