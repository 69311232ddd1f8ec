//! Error types for the rules engine.
//!
//! Every rejected operation is reported synchronously through one of these
//! types. Operations validate fully before mutating, so an `Err` always means
//! the game and its players are exactly as they were before the call.

use std::fmt;

use thiserror::Error;

use crate::board::Position;

/// Why an attack could not be carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackRejection {
    /// Attacker and target stand on different rings.
    DifferentRing {
        /// Ring of the attacker.
        attacker: usize,
        /// Ring of the target.
        target: usize,
    },
    /// Target is further away than the equipped weapon reaches.
    OutOfRange {
        /// Field distance between attacker and target.
        distance: usize,
        /// Range of the attacker's equipped weapon.
        range: u32,
    },
    /// A player cannot attack themselves.
    SelfTarget,
}

impl fmt::Display for AttackRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DifferentRing { attacker, target } => {
                write!(f, "attacker is on ring {attacker}, target on ring {target}")
            }
            Self::OutOfRange { distance, range } => {
                write!(f, "target is {distance} fields away, weapon range is {range}")
            }
            Self::SelfTarget => write!(f, "a player cannot attack themselves"),
        }
    }
}

/// Error returned by [`Game`](crate::game::Game) and
/// [`Player`](crate::player::Player) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A player with this name already joined.
    #[error("player `{0}` has already joined the game")]
    DuplicateName(String),

    /// No player with this name is on the roster.
    #[error("player `{0}` is not part of the game")]
    UnknownPlayer(String),

    /// A turn-gated action was attempted out of turn.
    #[error("player `{0}` is not the current player")]
    NotCurrentPlayer(String),

    /// The item is neither on the player's field nor in their inventory.
    #[error("item `{0}` not found")]
    UnknownItem(String),

    /// The weapon is not in the player's weapon inventory.
    #[error("weapon `{0}` is not in the inventory")]
    UnknownWeapon(String),

    /// Advancing would leave the board.
    #[error("cannot advance past ring {circle}: the board has {circles} rings")]
    InvalidRing {
        /// Ring the player is on.
        circle: usize,
        /// Number of rings on the board.
        circles: usize,
    },

    /// The target cannot be attacked from here.
    #[error("cannot attack: {0}")]
    CannotAttack(AttackRejection),

    /// The player factory has no template for this class.
    #[error("unknown player class `{0}`")]
    UnknownPlayerClass(String),

    /// The requested action is not the one offered by the player's field.
    #[error("action `{requested}` is not available here, the field offers `{available}`")]
    UnknownAction {
        /// Action name sent by the player.
        requested: String,
        /// Action name of the field the player stands on.
        available: &'static str,
    },

    /// The board has no content at this position.
    #[error("the board has no field at {0}")]
    UnknownField(Position),
}

/// Error raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration parsed but violates a constraint.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// The configuration could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates an [`ConfigError::Invalid`] from a message.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_error_messages_name_the_subject() {
        let err = GameError::NotCurrentPlayer("bob".into());
        assert_eq!(err.to_string(), "player `bob` is not the current player");

        let err = GameError::UnknownItem("potion".into());
        assert_eq!(err.to_string(), "item `potion` not found");
    }

    #[test]
    fn invalid_ring_reports_board_size() {
        let err = GameError::InvalidRing {
            circle: 2,
            circles: 3,
        };
        assert_eq!(
            err.to_string(),
            "cannot advance past ring 2: the board has 3 rings"
        );
    }

    #[test]
    fn cannot_attack_includes_reason() {
        let err = GameError::CannotAttack(AttackRejection::OutOfRange {
            distance: 4,
            range: 1,
        });
        assert_eq!(
            err.to_string(),
            "cannot attack: target is 4 fields away, weapon range is 1"
        );
    }

    #[test]
    fn unknown_field_formats_position() {
        let err = GameError::UnknownField(Position::new(1, 7));
        assert_eq!(err.to_string(), "the board has no field at (1, 7)");
    }

    #[test]
    fn config_error_wraps_parse_failures() {
        let parse = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = ConfigError::from(parse);
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse configuration"));
    }
}
