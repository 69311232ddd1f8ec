//! The handler that applies commands to a shared [`Game`].
//!
//! The game is held behind a mutex and locked for exactly one command, which
//! serializes all calls into it. Outcomes are reported after the lock is
//! released: successes are broadcast to every connection, failures go back
//! to the sender only as a `<command>-error` message with an
//! `error-message` field.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use orbis_core::{Game, GameError};
use tracing::{info, warn};

use crate::bus::CommandHandler;
use crate::command::Command;
use crate::error::CommandError;
use crate::message::{Message, MessageBuilder, MessageBus};

/// Applies commands to one game and reports the outcome.
pub struct GameCommandHandler {
    game: Arc<Mutex<Game>>,
    messages: Arc<dyn MessageBus>,
}

impl GameCommandHandler {
    /// Creates a handler for `game` reporting through `messages`.
    #[must_use]
    pub fn new(game: Arc<Mutex<Game>>, messages: Arc<dyn MessageBus>) -> Self {
        Self { game, messages }
    }

    fn apply(game: &mut Game, command: &Command) -> Result<Message, GameError> {
        let message = match command {
            Command::CreatePlayer {
                player_name,
                player_class,
                ..
            } => {
                game.add_player(player_name, player_class)?;
                with_turn(
                    Message::builder("player-added")
                        .field("player-name", player_name)
                        .field("player-class", player_class),
                    game,
                )
            }
            Command::RemovePlayer { player_name, .. } => {
                game.remove_player(player_name)?;
                with_turn(
                    Message::builder("player-removed").field("player-name", player_name),
                    game,
                )
            }
            Command::MovePlayer {
                player_name,
                direction,
                ..
            } => {
                let position = game.move_player(player_name, *direction)?;
                Message::builder("player-moved")
                    .field("player-name", player_name)
                    .field("direction", direction)
                    .field("circle", position.circle)
                    .field("field", position.field)
                    .build()
            }
            Command::Attack {
                attacker, target, ..
            } => {
                let attack = game.attack(attacker, target)?;
                let target_hp = game.player(target).map_or(0, orbis_core::Player::hp);
                Message::builder("player-attacked")
                    .field("attacker", attacker)
                    .field("target", target)
                    .field("attack-name", attack.name())
                    .field("attack-value", attack.value())
                    .field("target-hp", target_hp)
                    .build()
            }
            Command::PickItem {
                player_name,
                item_name,
                ..
            } => {
                game.pick_item(player_name, item_name)?;
                Message::builder("item-picked")
                    .field("player-name", player_name)
                    .field("item-name", item_name)
                    .build()
            }
            Command::UseItem {
                player_name,
                item_name,
                ..
            } => {
                game.use_item(player_name, item_name)?;
                Message::builder("item-used")
                    .field("player-name", player_name)
                    .field("item-name", item_name)
                    .build()
            }
            Command::EquipWeapon {
                player_name,
                weapon_name,
                ..
            } => {
                game.equip_weapon(player_name, weapon_name)?;
                Message::builder("weapon-equipped")
                    .field("player-name", player_name)
                    .field("weapon-name", weapon_name)
                    .build()
            }
            Command::Action {
                player_name,
                action_name,
                ..
            } => {
                game.action(player_name, action_name)?;
                with_turn(
                    Message::builder("action-performed")
                        .field("player-name", player_name)
                        .field("action-name", action_name),
                    game,
                )
            }
        };
        Ok(message)
    }
}

/// Adds the game status, and the current player and roll while in play.
fn with_turn(builder: MessageBuilder, game: &Game) -> Message {
    let mut builder = builder.field("game-status", game.status());
    if let Some(current) = game.current_player() {
        builder = builder.field("current-player", current);
    }
    if let Some(roll) = game.last_dice_roll() {
        builder = builder.field("dice-roll", roll);
    }
    builder.build()
}

impl CommandHandler for GameCommandHandler {
    fn handle(&self, command: &Command) -> Result<(), CommandError> {
        let outcome = {
            let mut game = self.game.lock().unwrap_or_else(PoisonError::into_inner);
            Self::apply(&mut game, command)
        };

        match outcome {
            Ok(message) => {
                info!(command = command.name(), source = %command.source_id(), "command applied");
                self.messages.notify_all(&message);
                Ok(())
            }
            Err(err) => {
                warn!(
                    command = command.name(),
                    source = %command.source_id(),
                    error = %err,
                    "command rejected"
                );
                let message = Message::builder(command.error_message_name())
                    .field("error-message", &err)
                    .build();
                self.messages.notify(command.source_id(), &message);
                Err(err.into())
            }
        }
    }
}

impl fmt::Debug for GameCommandHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameCommandHandler")
            .field("game", &self.game)
            .finish_non_exhaustive()
    }
}
