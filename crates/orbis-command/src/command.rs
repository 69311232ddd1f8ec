//! Inbound commands.
//!
//! Every command carries the [`SourceId`] of the connection that sent it, so
//! failures can be reported back to that connection only. Commands are
//! routed by [`Command::name`].
//!
//! Commands deserialize from JSON tagged by name:
//!
//! ```json
//! { "command": "move-player", "source_id": 7, "player_name": "alice", "direction": "right" }
//! ```

use std::fmt;

use orbis_core::Direction;
use serde::{Deserialize, Serialize};

// =============================================================================
// SourceId
// =============================================================================

/// Identifies the connection a command came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(u64);

impl SourceId {
    /// Wraps a raw connection id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw connection id.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SourceId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

// =============================================================================
// Command
// =============================================================================

/// A request to change the game, one variant per game operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum Command {
    /// Join the game.
    CreatePlayer {
        /// Sender.
        source_id: SourceId,
        /// Roster name to join under.
        player_name: String,
        /// Class the player factory builds.
        player_class: String,
    },
    /// Leave the game.
    RemovePlayer {
        /// Sender.
        source_id: SourceId,
        /// Roster name to remove.
        player_name: String,
    },
    /// Walk by the last dice roll.
    MovePlayer {
        /// Sender.
        source_id: SourceId,
        /// Acting player.
        player_name: String,
        /// Walking direction.
        direction: Direction,
    },
    /// Attack another player.
    Attack {
        /// Sender.
        source_id: SourceId,
        /// Acting player.
        attacker: String,
        /// Attacked player.
        target: String,
    },
    /// Pick up an item from the current field.
    PickItem {
        /// Sender.
        source_id: SourceId,
        /// Acting player.
        player_name: String,
        /// Item on the field.
        item_name: String,
    },
    /// Use a held usable item.
    UseItem {
        /// Sender.
        source_id: SourceId,
        /// Acting player.
        player_name: String,
        /// Item in the inventory.
        item_name: String,
    },
    /// Swap a carried weapon with the equipped one.
    EquipWeapon {
        /// Sender.
        source_id: SourceId,
        /// Acting player.
        player_name: String,
        /// Weapon in the inventory.
        weapon_name: String,
    },
    /// Perform the field action and end the turn.
    Action {
        /// Sender.
        source_id: SourceId,
        /// Acting player.
        player_name: String,
        /// Name of the field's action.
        action_name: String,
    },
}

impl Command {
    /// Names of all commands, in declaration order.
    pub const NAMES: [&'static str; 8] = [
        "create-player",
        "remove-player",
        "move-player",
        "attack",
        "pick-item",
        "use-item",
        "equip-weapon",
        "action",
    ];

    /// Routing name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreatePlayer { .. } => "create-player",
            Self::RemovePlayer { .. } => "remove-player",
            Self::MovePlayer { .. } => "move-player",
            Self::Attack { .. } => "attack",
            Self::PickItem { .. } => "pick-item",
            Self::UseItem { .. } => "use-item",
            Self::EquipWeapon { .. } => "equip-weapon",
            Self::Action { .. } => "action",
        }
    }

    /// Connection the command came from.
    #[must_use]
    pub const fn source_id(&self) -> SourceId {
        match self {
            Self::CreatePlayer { source_id, .. }
            | Self::RemovePlayer { source_id, .. }
            | Self::MovePlayer { source_id, .. }
            | Self::Attack { source_id, .. }
            | Self::PickItem { source_id, .. }
            | Self::UseItem { source_id, .. }
            | Self::EquipWeapon { source_id, .. }
            | Self::Action { source_id, .. } => *source_id,
        }
    }

    /// Name of the message sent back to the sender when the command fails.
    #[must_use]
    pub const fn error_message_name(&self) -> &'static str {
        match self {
            Self::CreatePlayer { .. } => "player-addition-error",
            Self::RemovePlayer { .. } => "player-removal-error",
            Self::MovePlayer { .. } => "move-player-error",
            Self::Attack { .. } => "attack-error",
            Self::PickItem { .. } => "pick-item-error",
            Self::UseItem { .. } => "use-item-error",
            Self::EquipWeapon { .. } => "equip-weapon-error",
            Self::Action { .. } => "action-error",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {}", self.name(), self.source_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn every_command() -> Vec<Command> {
        let source_id = SourceId::new(1);
        let player_name = String::from("alice");
        vec![
            Command::CreatePlayer {
                source_id,
                player_name: player_name.clone(),
                player_class: "warrior".into(),
            },
            Command::RemovePlayer {
                source_id,
                player_name: player_name.clone(),
            },
            Command::MovePlayer {
                source_id,
                player_name: player_name.clone(),
                direction: Direction::Left,
            },
            Command::Attack {
                source_id,
                attacker: player_name.clone(),
                target: "bob".into(),
            },
            Command::PickItem {
                source_id,
                player_name: player_name.clone(),
                item_name: "potion".into(),
            },
            Command::UseItem {
                source_id,
                player_name: player_name.clone(),
                item_name: "potion".into(),
            },
            Command::EquipWeapon {
                source_id,
                player_name: player_name.clone(),
                weapon_name: "axe".into(),
            },
            Command::Action {
                source_id,
                player_name,
                action_name: "rest".into(),
            },
        ]
    }

    #[test]
    fn names_match_declaration_order() {
        let names: Vec<_> = every_command().iter().map(Command::name).collect();
        assert_eq!(names, Command::NAMES);
    }

    #[test]
    fn error_names_end_with_error() {
        for command in every_command() {
            assert!(command.error_message_name().ends_with("-error"));
        }
        assert_eq!(every_command()[0].error_message_name(), "player-addition-error");
    }

    #[test]
    fn parses_tagged_json() {
        let command: Command = serde_json::from_str(
            r#"{ "command": "move-player", "source_id": 7, "player_name": "alice", "direction": "right" }"#,
        )
        .unwrap();

        assert_eq!(command.name(), "move-player");
        assert_eq!(command.source_id(), SourceId::new(7));
        assert_eq!(
            command,
            Command::MovePlayer {
                source_id: SourceId::new(7),
                player_name: "alice".into(),
                direction: Direction::Right,
            }
        );
    }

    #[test]
    fn display_names_command_and_sender() {
        let command = &every_command()[3];
        assert_eq!(command.to_string(), "attack from 1");
    }
}
