//! The `Game` aggregate: roster, lifecycle and the turn gate.
//!
//! A game starts in [`GameStatus::WaitingForUsers`]. The join that brings the
//! roster to `min_players` starts play: the first joiner becomes the current
//! player and the dice are rolled. From then on every gated operation checks
//! the caller against the current player before touching anything, and only
//! [`Game::action`] passes the turn on.
//!
//! Turn order is join order. The roster is an ordered `Vec` with a separate
//! cursor index, so leaving players never invalidate the turn position.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use orbis_core::board::RingBoard;
//! use orbis_core::dice::SeededDice;
//! use orbis_core::factory::{ClassCatalog, PlayerTemplate};
//! use orbis_core::game::{Game, GameStatus};
//! use orbis_core::item::WeaponItem;
//! use orbis_core::player::Stats;
//!
//! let catalog = ClassCatalog::new().with_class(
//!     "warrior",
//!     PlayerTemplate::new(Stats::new(100, 1, 5, 0), WeaponItem::new("sword", 1, 5)),
//! );
//! let mut game = Game::new(
//!     Arc::new(RingBoard::uniform(2, 12).unwrap()),
//!     Box::new(catalog),
//!     Box::new(SeededDice::new(6, 1).unwrap()),
//!     2,
//! )
//! .unwrap();
//!
//! game.add_player("alice", "warrior").unwrap();
//! assert_eq!(game.status(), GameStatus::WaitingForUsers);
//!
//! game.add_player("bob", "warrior").unwrap();
//! assert_eq!(game.status(), GameStatus::CurrentPlayerMove);
//! assert_eq!(game.current_player(), Some("alice"));
//!
//! assert!(game.move_player_right("bob").is_err());
//! game.move_player_right("alice").unwrap();
//! game.action("alice", "rest").unwrap();
//! assert_eq!(game.current_player(), Some("bob"));
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{Board, Direction, Position};
use crate::config::GameConfig;
use crate::dice::{Dice, SeededDice};
use crate::error::{AttackRejection, ConfigError, GameError};
use crate::factory::PlayerFactory;
use crate::item::Attack;
use crate::player::Player;

// =============================================================================
// GameStatus
// =============================================================================

/// Lifecycle state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    /// Fewer than `min_players` have joined. Nobody may act.
    #[default]
    WaitingForUsers,
    /// Play is running and the current player may act.
    CurrentPlayerMove,
}

impl GameStatus {
    /// Stable kebab-case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WaitingForUsers => "waiting-for-users",
            Self::CurrentPlayerMove => "current-player-move",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Game
// =============================================================================

/// One match: the shared board, the roster in join order and whose turn it is.
///
/// Every operation validates completely before mutating. An `Err` leaves the
/// game and all players unchanged.
pub struct Game {
    board: Arc<dyn Board>,
    factory: Box<dyn PlayerFactory>,
    dice: Box<dyn Dice>,
    roster: Vec<(String, Player)>,
    min_players: usize,
    status: GameStatus,
    /// Roster index of the current player while play is running.
    cursor: usize,
    current_player: Option<String>,
    last_dice_roll: Option<u32>,
}

impl Game {
    /// Creates a game waiting for `min_players` players.
    ///
    /// # Arguments
    ///
    /// * `board` - Shared board all players move on
    /// * `factory` - Builds players for [`add_player`](Self::add_player)
    /// * `dice` - Rolled once per turn transition
    /// * `min_players` - Roster size that starts play
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `min_players` is zero.
    pub fn new(
        board: Arc<dyn Board>,
        factory: Box<dyn PlayerFactory>,
        dice: Box<dyn Dice>,
        min_players: usize,
    ) -> Result<Self, ConfigError> {
        if min_players == 0 {
            return Err(ConfigError::invalid("min_players must be at least 1"));
        }
        Ok(Self {
            board,
            factory,
            dice,
            roster: Vec::new(),
            min_players,
            status: GameStatus::WaitingForUsers,
            cursor: 0,
            current_player: None,
            last_dice_roll: None,
        })
    }

    /// Creates a game from a config, rolling with [`SeededDice`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the config fails validation.
    pub fn from_config(
        config: &GameConfig,
        board: Arc<dyn Board>,
        factory: Box<dyn PlayerFactory>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let dice = SeededDice::from_config(config)?;
        Self::new(board, factory, Box::new(dice), config.min_players)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// Name of the player allowed to act, `None` while waiting for players.
    #[must_use]
    pub fn current_player(&self) -> Option<&str> {
        self.current_player.as_deref()
    }

    /// Result of the latest roll, `None` while waiting for players.
    #[must_use]
    pub const fn last_dice_roll(&self) -> Option<u32> {
        self.last_dice_roll
    }

    /// Roster size that starts play.
    #[must_use]
    pub const fn min_players(&self) -> usize {
        self.min_players
    }

    /// Number of joined players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.roster.len()
    }

    /// Joined player names in join (turn) order.
    pub fn player_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.roster.iter().map(|(name, _)| name.as_str())
    }

    /// Looks up a joined player.
    #[must_use]
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.index_of(name).map(|index| &self.roster[index].1)
    }

    /// The shared board.
    #[must_use]
    pub fn board(&self) -> &dyn Board {
        self.board.as_ref()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Joins a new player of class `class_name` under `name`.
    ///
    /// The player is placed on the board's starting position. If this join
    /// brings the roster to `min_players`, play starts with the first joiner.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::DuplicateName`] if `name` has already joined, or
    /// the factory's error if the class cannot be built.
    pub fn add_player(&mut self, name: &str, class_name: &str) -> Result<(), GameError> {
        if self.index_of(name).is_some() {
            return Err(GameError::DuplicateName(name.to_owned()));
        }

        let mut player = self.factory.create_player(class_name)?;
        player.place_on(self.board.as_ref());
        self.roster.push((name.to_owned(), player));

        info!(
            player = name,
            class = class_name,
            players = self.roster.len(),
            min_players = self.min_players,
            "player joined"
        );

        if self.status == GameStatus::WaitingForUsers && self.roster.len() == self.min_players {
            self.begin_turn(0);
        }
        Ok(())
    }

    /// Removes `name` from the roster.
    ///
    /// Falling below `min_players` stops play and clears the current player
    /// and dice roll. If play continues and the leaver held the turn, the
    /// turn goes to the player who now occupies the cursor position,
    /// wrapping to the first joiner, with a fresh roll.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownPlayer`] if `name` has not joined.
    pub fn remove_player(&mut self, name: &str) -> Result<(), GameError> {
        let index = self
            .index_of(name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_owned()))?;
        self.roster.remove(index);

        info!(player = name, players = self.roster.len(), "player left");

        if self.status != GameStatus::CurrentPlayerMove {
            return Ok(());
        }

        if self.roster.len() < self.min_players {
            self.status = GameStatus::WaitingForUsers;
            self.cursor = 0;
            self.current_player = None;
            self.last_dice_roll = None;
            info!(status = %self.status, "not enough players, play paused");
        } else if index < self.cursor {
            self.cursor -= 1;
        } else if index == self.cursor {
            self.begin_turn(self.cursor % self.roster.len());
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Gated actions
    // -------------------------------------------------------------------------

    /// Walks the current player right by the last dice roll.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotCurrentPlayer`] if `name` does not hold the turn.
    pub fn move_player_right(&mut self, name: &str) -> Result<Position, GameError> {
        self.move_player(name, Direction::Right)
    }

    /// Walks the current player left by the last dice roll.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotCurrentPlayer`] if `name` does not hold the turn.
    pub fn move_player_left(&mut self, name: &str) -> Result<Position, GameError> {
        self.move_player(name, Direction::Left)
    }

    /// Walks the current player in `direction` by the last dice roll and
    /// returns the new position. Does not pass the turn.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotCurrentPlayer`] if `name` does not hold the turn.
    pub fn move_player(&mut self, name: &str, direction: Direction) -> Result<Position, GameError> {
        let index = self.ensure_current(name)?;
        let steps = self.last_dice_roll.unwrap_or_default();
        let board = self.board.as_ref();
        let player = &mut self.roster[index].1;

        match direction {
            Direction::Right => player.move_right(board, steps),
            Direction::Left => player.move_left(board, steps),
        }
        debug!(player = name, %direction, steps, position = %player.position(), "player moved");
        Ok(player.position())
    }

    /// The current player attacks `target` with their equipped weapon.
    ///
    /// # Errors
    ///
    /// - [`GameError::NotCurrentPlayer`] if `attacker` does not hold the turn
    /// - [`GameError::UnknownPlayer`] if `target` has not joined
    /// - [`GameError::CannotAttack`] if the target is the attacker, on another
    ///   ring, or out of range
    pub fn attack(&mut self, attacker: &str, target: &str) -> Result<Attack, GameError> {
        let attacker_index = self.ensure_current(attacker)?;
        let target_index = self
            .index_of(target)
            .ok_or_else(|| GameError::UnknownPlayer(target.to_owned()))?;
        if attacker_index == target_index {
            return Err(GameError::CannotAttack(AttackRejection::SelfTarget));
        }

        let (attacking, defending) = pair_mut(&mut self.roster, attacker_index, target_index);
        let attack = attacking.attack(defending)?;
        debug!(
            attacker,
            target,
            attack = attack.name(),
            target_hp = defending.hp(),
            "attack resolved"
        );
        Ok(attack)
    }

    /// The current player picks up `item_name` from the field they stand on.
    ///
    /// The field keeps its item; the player receives a copy.
    ///
    /// # Errors
    ///
    /// - [`GameError::NotCurrentPlayer`] if `name` does not hold the turn
    /// - [`GameError::UnknownField`] if the board has no field at the player
    /// - [`GameError::UnknownItem`] if the field holds no such item
    pub fn pick_item(&mut self, name: &str, item_name: &str) -> Result<(), GameError> {
        let index = self.ensure_current(name)?;
        let player = &mut self.roster[index].1;
        let position = player.position();
        let item = self
            .board
            .field_of_position(position)
            .ok_or(GameError::UnknownField(position))?
            .item(item_name)
            .cloned()
            .ok_or_else(|| GameError::UnknownItem(item_name.to_owned()))?;

        player.pick_item(item);
        Ok(())
    }

    /// The current player uses one of their usable items.
    ///
    /// # Errors
    ///
    /// - [`GameError::NotCurrentPlayer`] if `name` does not hold the turn
    /// - [`GameError::UnknownItem`] if the player holds no such item
    pub fn use_item(&mut self, name: &str, item_name: &str) -> Result<(), GameError> {
        let index = self.ensure_current(name)?;
        self.roster[index].1.use_item(item_name)
    }

    /// The current player swaps `weapon_name` with their equipped weapon.
    ///
    /// # Errors
    ///
    /// - [`GameError::NotCurrentPlayer`] if `name` does not hold the turn
    /// - [`GameError::UnknownWeapon`] if the weapon is not in the inventory
    pub fn equip_weapon(&mut self, name: &str, weapon_name: &str) -> Result<(), GameError> {
        let index = self.ensure_current(name)?;
        self.roster[index].1.equip_weapon(weapon_name)
    }

    /// The current player performs their field's action, ending the turn.
    ///
    /// `action_name` must name the action of the field the player stands on.
    /// After the effect is applied the turn passes to the next joiner,
    /// wrapping to the first, and the dice are rolled.
    ///
    /// # Errors
    ///
    /// - [`GameError::NotCurrentPlayer`] if `name` does not hold the turn
    /// - [`GameError::UnknownField`] if the board has no field at the player
    /// - [`GameError::UnknownAction`] if the field offers a different action
    /// - [`GameError::InvalidRing`] if a portal on the last ring is used
    pub fn action(&mut self, name: &str, action_name: &str) -> Result<(), GameError> {
        let index = self.ensure_current(name)?;
        let board = self.board.as_ref();
        let player = &mut self.roster[index].1;
        let position = player.position();

        let action = *board
            .field_of_position(position)
            .ok_or(GameError::UnknownField(position))?
            .action();
        if action.name() != action_name {
            return Err(GameError::UnknownAction {
                requested: action_name.to_owned(),
                available: action.name(),
            });
        }

        action.apply(player, board)?;
        debug!(player = name, %action, position = %player.position(), "field action applied");

        self.advance_turn();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Turn plumbing
    // -------------------------------------------------------------------------

    fn index_of(&self, name: &str) -> Option<usize> {
        self.roster.iter().position(|(joined, _)| joined == name)
    }

    /// Returns the roster index of `name` if it holds the turn.
    fn ensure_current(&self, name: &str) -> Result<usize, GameError> {
        if self.current_player.as_deref() == Some(name) {
            Ok(self.cursor)
        } else {
            Err(GameError::NotCurrentPlayer(name.to_owned()))
        }
    }

    fn advance_turn(&mut self) {
        let next = (self.cursor + 1) % self.roster.len();
        self.begin_turn(next);
    }

    fn begin_turn(&mut self, index: usize) {
        let roll = self.dice.roll();
        self.cursor = index;
        self.current_player = Some(self.roster[index].0.clone());
        self.last_dice_roll = Some(roll);
        self.status = GameStatus::CurrentPlayerMove;

        info!(
            current_player = %self.roster[index].0,
            roll,
            "turn started"
        );
    }
}

/// Borrows two distinct roster entries mutably.
fn pair_mut(
    roster: &mut [(String, Player)],
    first: usize,
    second: usize,
) -> (&mut Player, &mut Player) {
    debug_assert_ne!(first, second);
    if first < second {
        let (head, tail) = roster.split_at_mut(second);
        (&mut head[first].1, &mut tail[0].1)
    } else {
        let (head, tail) = roster.split_at_mut(first);
        (&mut tail[0].1, &mut head[second].1)
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("status", &self.status)
            .field("min_players", &self.min_players)
            .field("players", &self.player_names().collect::<Vec<_>>())
            .field("current_player", &self.current_player)
            .field("last_dice_roll", &self.last_dice_roll)
            .field("number_of_circles", &self.board.number_of_circles())
            .finish_non_exhaustive()
    }
}
