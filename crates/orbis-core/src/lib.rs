//! # Orbis Core
//!
//! Rules engine for a turn-based board game played on concentric rings.
//!
//! Players join a shared [`Game`], walk around the rings of a [`Board`],
//! fight each other with their equipped weapons and collect items from the
//! fields they stand on.
//!
//! ## Architecture
//!
//! - **Board**: position arithmetic and static field content ([`board`])
//! - **Items**: weapons, usable and modifying items ([`item`])
//! - **Player**: position, stats, combat and inventory ([`player`])
//! - **Game**: roster, lifecycle and the current-player gate ([`game`])
//!
//! Collaborators are injected as traits: [`PlayerFactory`] builds players by
//! class name and [`Dice`] decides how far the current player moves.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use orbis_core::{ClassCatalog, Game, GameConfig, RingBoard};
//!
//! let catalog = ClassCatalog::from_json_str(r#"{
//!     "warrior": {
//!         "stats": { "hp": 100, "def": 2, "attack": 4, "mana": 0 },
//!         "weapon": { "name": "sword", "range": 1, "damage": 6 }
//!     }
//! }"#)?;
//! let board = RingBoard::uniform(3, 12)?;
//!
//! let mut game = Game::from_config(
//!     &GameConfig::default().with_seed(7),
//!     Arc::new(board),
//!     Box::new(catalog),
//! )?;
//! game.add_player("alice", "warrior")?;
//! game.add_player("bob", "warrior")?;
//!
//! let roll = game.last_dice_roll();
//! assert!(roll.is_some());
//! game.move_player_right("alice")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod board;
pub mod config;
pub mod dice;
pub mod error;
pub mod factory;
pub mod game;
pub mod item;
pub mod player;

pub use board::{Board, BoardLayout, Direction, Field, FieldAction, Position, RingBoard, RingLayout};
pub use config::GameConfig;
pub use dice::{Dice, SeededDice};
pub use error::{AttackRejection, ConfigError, GameError};
pub use factory::{ClassCatalog, PlayerFactory, PlayerTemplate};
pub use game::{Game, GameStatus};
pub use item::{Attack, Item, ItemKind, ModifyingItem, StatDelta, UsableItem, WeaponItem};
pub use player::{AttackHandler, Player, Stats};

#[cfg(any(test, feature = "testing"))]
pub use dice::MockDice;
#[cfg(any(test, feature = "testing"))]
pub use factory::MockPlayerFactory;

#[cfg(test)]
mod tests;
