//! Board module: ring geometry and per-field content.
//!
//! The board is a set of concentric rings. Each ring is a closed loop of
//! fields; players walk along their ring and only change ring through an
//! explicit advance (see [`Player::move_to_next_circle`]).
//!
//! - [`Board`]: the contract the game and players consume
//! - [`RingBoard`]: the concrete board, built from a [`BoardLayout`]
//! - [`Field`]: the static content of one cell (items + action)
//! - [`FieldAction`]: the effect a field applies to the player standing on it
//!
//! # Example
//!
//! ```
//! use orbis_core::board::{Board, Direction, Position, RingBoard};
//!
//! let board = RingBoard::uniform(2, 8).unwrap();
//!
//! // Walking right from field 6 by 3 wraps around the ring.
//! let field = board.calculate_position(Position::new(0, 6), Direction::Right, 3);
//! assert_eq!(field, 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GameError};
use crate::item::{Item, StatDelta};
use crate::player::Player;

// =============================================================================
// Position & Direction
// =============================================================================

/// Direction of travel along a ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards lower field indices.
    Left,
    /// Towards higher field indices.
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// A cell address: ring index and field index on that ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Ring index, `0` is the outermost ring.
    pub circle: usize,
    /// Field index on the ring.
    pub field: usize,
}

impl Position {
    /// Creates a position from a ring and field index.
    #[must_use]
    pub const fn new(circle: usize, field: usize) -> Self {
        Self { circle, field }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.circle, self.field)
    }
}

// =============================================================================
// Board contract
// =============================================================================

/// Position arithmetic and field lookup for a ring board.
///
/// Implementations are read-only: nothing in the engine mutates a board once
/// it is shared with a game. A board is therefore `Send + Sync` and is usually
/// held behind an `Arc`.
pub trait Board: Send + Sync {
    /// Number of concentric rings. Valid ring indices are `0..number_of_circles()`.
    fn number_of_circles(&self) -> usize;

    /// Ring new players start on.
    fn starting_circle(&self) -> usize;

    /// Field new players start on.
    fn starting_field(&self) -> usize;

    /// Starting ring and field combined.
    fn starting_position(&self) -> Position {
        Position::new(self.starting_circle(), self.starting_field())
    }

    /// Field index reached by walking `steps` fields in `direction` from `from`.
    ///
    /// The result is always on the ring of `from`; ring transitions are never
    /// performed implicitly.
    fn calculate_position(&self, from: Position, direction: Direction, steps: u32) -> usize;

    /// Static content of the field at `position`, if the board has one.
    fn field_of_position(&self, position: Position) -> Option<&Field>;
}

// =============================================================================
// Field content
// =============================================================================

/// The effect a field applies when its occupant performs the field action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldAction {
    /// Nothing happens; the turn simply passes.
    #[default]
    Rest,
    /// Permanently alters the player's stats.
    Shrine {
        /// Stat change granted by the shrine.
        effect: StatDelta,
    },
    /// Costs the player hit points. Defence does not apply.
    Trap {
        /// Hit points lost.
        damage: i32,
    },
    /// Moves the player onto the next ring, landing on `field`.
    Portal {
        /// Field index on the next ring.
        field: usize,
    },
}

impl FieldAction {
    /// Name players use to trigger this action.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Shrine { .. } => "shrine",
            Self::Trap { .. } => "trap",
            Self::Portal { .. } => "portal",
        }
    }

    /// Applies the action to `player`.
    ///
    /// # Errors
    ///
    /// A portal with no next ring fails with [`GameError::InvalidRing`] and
    /// leaves the player untouched. [`RingBoard`] never holds such a portal.
    pub fn apply(&self, player: &mut Player, board: &dyn Board) -> Result<(), GameError> {
        match *self {
            Self::Rest => Ok(()),
            Self::Shrine { effect } => {
                player.apply_delta(effect);
                Ok(())
            }
            Self::Trap { damage } => {
                player.take_damage(damage);
                Ok(())
            }
            Self::Portal { field } => player.move_to_next_circle(board, field),
        }
    }
}

impl fmt::Display for FieldAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static content of one board cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    items: Vec<Item>,
    #[serde(default)]
    action: FieldAction,
}

impl Field {
    /// Creates a field with the given items and action.
    #[must_use]
    pub fn new(items: Vec<Item>, action: FieldAction) -> Self {
        Self { items, action }
    }

    /// Returns this field with `item` added.
    #[must_use]
    pub fn with_item(mut self, item: impl Into<Item>) -> Self {
        self.items.push(item.into());
        self
    }

    /// Returns this field with its action replaced.
    #[must_use]
    pub fn with_action(mut self, action: FieldAction) -> Self {
        self.action = action;
        self
    }

    /// Looks up an item lying on this field by name.
    #[must_use]
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name() == name)
    }

    /// All items lying on this field.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The field's action.
    #[must_use]
    pub const fn action(&self) -> &FieldAction {
        &self.action
    }

    /// Applies the field's action to `player`. See [`FieldAction::apply`].
    ///
    /// # Errors
    ///
    /// Propagates the action's error.
    pub fn apply_action(&self, player: &mut Player, board: &dyn Board) -> Result<(), GameError> {
        self.action.apply(player, board)
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Fields of one ring, in field-index order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RingLayout {
    /// The ring's fields. A ring must have at least one field.
    pub fields: Vec<Field>,
}

impl RingLayout {
    /// A ring of `len` empty resting fields.
    #[must_use]
    pub fn empty(len: usize) -> Self {
        Self {
            fields: vec![Field::default(); len],
        }
    }
}

/// Serializable description of a [`RingBoard`].
///
/// # Example
///
/// ```
/// use orbis_core::board::BoardLayout;
///
/// let layout = BoardLayout::from_json_str(r#"{
///     "rings": [
///         { "fields": [ {}, { "action": { "kind": "trap", "damage": 5 } } ] },
///         { "fields": [ {} ] }
///     ],
///     "starting_field": 1
/// }"#).unwrap();
///
/// assert_eq!(layout.rings.len(), 2);
/// assert_eq!(layout.starting_field, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    /// Rings from outermost (index 0) inwards.
    pub rings: Vec<RingLayout>,
    /// Ring new players start on.
    #[serde(default)]
    pub starting_circle: usize,
    /// Field new players start on.
    #[serde(default)]
    pub starting_field: usize,
}

impl BoardLayout {
    /// `circles` rings of `fields` empty fields each, starting at `(0, 0)`.
    #[must_use]
    pub fn uniform(circles: usize, fields: usize) -> Self {
        Self {
            rings: (0..circles).map(|_| RingLayout::empty(fields)).collect(),
            starting_circle: 0,
            starting_field: 0,
        }
    }

    /// Parses a layout from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed input. Structural checks
    /// happen in [`RingBoard::from_layout`].
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

// =============================================================================
// RingBoard
// =============================================================================

/// Board made of rings that may each have a different number of fields.
///
/// Walking wraps around the ring: stepping right from the last field lands
/// on field 0, stepping left from field 0 lands on the last field.
#[derive(Debug, Clone, PartialEq)]
pub struct RingBoard {
    rings: Vec<Vec<Field>>,
    start: Position,
}

impl RingBoard {
    /// Builds a board from a layout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the layout has no rings, a ring has
    /// no fields, the starting position is off the board, or a portal does not
    /// lead onto a field of the next ring.
    pub fn from_layout(layout: BoardLayout) -> Result<Self, ConfigError> {
        if layout.rings.is_empty() {
            return Err(ConfigError::invalid("a board needs at least one ring"));
        }
        if let Some(index) = layout.rings.iter().position(|ring| ring.fields.is_empty()) {
            return Err(ConfigError::invalid(format!("ring {index} has no fields")));
        }

        let start = Position::new(layout.starting_circle, layout.starting_field);
        let start_ring_len = layout
            .rings
            .get(start.circle)
            .map(|ring| ring.fields.len())
            .ok_or_else(|| {
                ConfigError::invalid(format!("starting ring {} is off the board", start.circle))
            })?;
        if start.field >= start_ring_len {
            return Err(ConfigError::invalid(format!(
                "starting field {} is off ring {} ({start_ring_len} fields)",
                start.field, start.circle
            )));
        }

        let ring_lens: Vec<usize> = layout.rings.iter().map(|ring| ring.fields.len()).collect();
        for (circle, ring) in layout.rings.iter().enumerate() {
            for (field, content) in ring.fields.iter().enumerate() {
                let position = Position::new(circle, field);
                check_portal(&ring_lens, position, content.action())
                    .map_err(|err| ConfigError::invalid(format!("portal at {position}: {err}")))?;
            }
        }

        Ok(Self {
            rings: layout.rings.into_iter().map(|ring| ring.fields).collect(),
            start,
        })
    }

    /// `circles` rings of `fields` empty fields each, starting at `(0, 0)`.
    ///
    /// # Errors
    ///
    /// Fails like [`RingBoard::from_layout`] when either count is zero.
    pub fn uniform(circles: usize, fields: usize) -> Result<Self, ConfigError> {
        Self::from_layout(BoardLayout::uniform(circles, fields))
    }

    /// Number of fields on `circle`, or `None` if the ring does not exist.
    #[must_use]
    pub fn ring_len(&self, circle: usize) -> Option<usize> {
        self.rings.get(circle).map(Vec::len)
    }

    /// Drops `item` onto the field at `position`.
    ///
    /// Intended for board setup before the board is shared with a game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownField`] if `position` is off the board.
    pub fn place_item(&mut self, position: Position, item: impl Into<Item>) -> Result<(), GameError> {
        self.field_mut(position)?.items.push(item.into());
        Ok(())
    }

    /// Replaces the action of the field at `position`.
    ///
    /// # Errors
    ///
    /// - [`GameError::UnknownField`] if `position` is off the board, or a
    ///   portal lands off the next ring
    /// - [`GameError::InvalidRing`] for a portal on the last ring
    pub fn set_action(&mut self, position: Position, action: FieldAction) -> Result<(), GameError> {
        if self.field_of_position(position).is_none() {
            return Err(GameError::UnknownField(position));
        }
        let ring_lens: Vec<usize> = self.rings.iter().map(Vec::len).collect();
        check_portal(&ring_lens, position, &action)?;
        self.field_mut(position)?.action = action;
        Ok(())
    }

    fn field_mut(&mut self, position: Position) -> Result<&mut Field, GameError> {
        self.rings
            .get_mut(position.circle)
            .and_then(|ring| ring.get_mut(position.field))
            .ok_or(GameError::UnknownField(position))
    }
}

/// A portal must lead onto an existing field of the ring after its own.
fn check_portal(ring_lens: &[usize], position: Position, action: &FieldAction) -> Result<(), GameError> {
    let FieldAction::Portal { field } = *action else {
        return Ok(());
    };
    let next = position.circle + 1;
    let Some(&len) = ring_lens.get(next) else {
        return Err(GameError::InvalidRing {
            circle: position.circle,
            circles: ring_lens.len(),
        });
    };
    if field >= len {
        return Err(GameError::UnknownField(Position::new(next, field)));
    }
    Ok(())
}

impl Board for RingBoard {
    fn number_of_circles(&self) -> usize {
        self.rings.len()
    }

    fn starting_circle(&self) -> usize {
        self.start.circle
    }

    fn starting_field(&self) -> usize {
        self.start.field
    }

    fn calculate_position(&self, from: Position, direction: Direction, steps: u32) -> usize {
        // Positions handed out by this board are always on a ring.
        let Some(len) = self.ring_len(from.circle) else {
            return from.field;
        };
        let field = from.field % len;
        let steps = steps as usize % len;
        match direction {
            Direction::Right => (field + steps) % len,
            Direction::Left => (field + len - steps) % len,
        }
    }

    fn field_of_position(&self, position: Position) -> Option<&Field> {
        self.rings.get(position.circle)?.get(position.field)
    }
}
