//! Item family and the attacks weapons produce.
//!
//! Items are a closed set of variants, each with its own narrow contract:
//!
//! - [`WeaponItem`]: equip-swappable gear that produces [`Attack`]s
//! - [`UsableItem`]: a stacking, counted consumable applied on use
//! - [`ModifyingItem`]: a one-shot stat change applied on pickup
//!
//! [`Item`] wraps the three so boards and inventories can hold any of them,
//! and the player dispatches on the variant when picking one up.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::player::Player;

// =============================================================================
// StatDelta
// =============================================================================

/// A change to a player's stats. Missing fields default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatDelta {
    /// Hit point change.
    pub hp: i32,
    /// Defence change.
    pub def: i32,
    /// Attack point change.
    pub attack: i32,
    /// Mana change.
    pub mana: i32,
}

impl StatDelta {
    /// Creates a delta from its four components.
    #[must_use]
    pub const fn new(hp: i32, def: i32, attack: i32, mana: i32) -> Self {
        Self {
            hp,
            def,
            attack,
            mana,
        }
    }

    /// A delta that only restores (or drains) hit points.
    #[must_use]
    pub const fn hp(hp: i32) -> Self {
        Self::new(hp, 0, 0, 0)
    }
}

// =============================================================================
// Attack
// =============================================================================

/// A single swing, produced by a weapon and consumed by the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attack {
    name: String,
    value: i32,
    experience_reward: u32,
}

impl Attack {
    /// Creates an attack.
    ///
    /// # Arguments
    ///
    /// * `name` - Attack type, used to look up the target's attack handlers
    /// * `value` - Raw damage before the target's defence
    /// * `experience_reward` - Experience the attacker earns for landing it
    #[must_use]
    pub fn new(name: impl Into<String>, value: i32, experience_reward: u32) -> Self {
        Self {
            name: name.into(),
            value,
            experience_reward,
        }
    }

    /// Attack type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw damage value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.value
    }

    /// Experience earned by the attacker.
    #[must_use]
    pub const fn experience_reward(&self) -> u32 {
        self.experience_reward
    }
}

// =============================================================================
// Item variants
// =============================================================================

/// A weapon. Its range is inclusive: a target exactly `range` fields away can
/// be hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponItem {
    name: String,
    range: u32,
    damage: i32,
    #[serde(default)]
    attack_name: Option<String>,
    #[serde(default)]
    experience_reward: u32,
}

impl WeaponItem {
    /// Creates a weapon whose attacks are named after the weapon and earn no
    /// experience.
    #[must_use]
    pub fn new(name: impl Into<String>, range: u32, damage: i32) -> Self {
        Self {
            name: name.into(),
            range,
            damage,
            attack_name: None,
            experience_reward: 0,
        }
    }

    /// Names the attacks this weapon produces.
    #[must_use]
    pub fn with_attack_name(mut self, attack_name: impl Into<String>) -> Self {
        self.attack_name = Some(attack_name.into());
        self
    }

    /// Sets the experience each landed attack earns.
    #[must_use]
    pub const fn with_experience_reward(mut self, experience_reward: u32) -> Self {
        self.experience_reward = experience_reward;
        self
    }

    /// Weapon name, unique within an inventory.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inclusive attack range in fields.
    #[must_use]
    pub const fn range(&self) -> u32 {
        self.range
    }

    /// Base damage before the wielder's attack points.
    #[must_use]
    pub const fn damage(&self) -> i32 {
        self.damage
    }

    /// Name given to the attacks this weapon produces.
    #[must_use]
    pub fn attack_name(&self) -> &str {
        self.attack_name.as_deref().unwrap_or(&self.name)
    }

    /// Experience each landed attack earns.
    #[must_use]
    pub const fn experience_reward(&self) -> u32 {
        self.experience_reward
    }

    /// Produces an attack for `wielder`: base damage plus the wielder's
    /// attack points.
    #[must_use]
    pub fn create_attack(&self, wielder: &Player) -> Attack {
        Attack::new(
            self.attack_name(),
            self.damage.saturating_add(wielder.attack_points()),
            self.experience_reward,
        )
    }
}

/// A counted consumable. Picking up a second one with the same name stacks
/// onto the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsableItem {
    name: String,
    count: u32,
    #[serde(default)]
    effect: StatDelta,
}

impl UsableItem {
    /// Creates a usable item with `count` uses.
    #[must_use]
    pub fn new(name: impl Into<String>, count: u32, effect: StatDelta) -> Self {
        Self {
            name: name.into(),
            count,
            effect,
        }
    }

    /// Item name, unique within an inventory.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Remaining uses.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Effect applied on each use.
    #[must_use]
    pub const fn effect(&self) -> StatDelta {
        self.effect
    }

    /// Applies the effect to `player`. Does not change the count.
    pub fn apply(&self, player: &mut Player) {
        player.apply_delta(self.effect);
    }

    /// Adds one use.
    pub fn increase_count(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    /// Removes one use, stopping at zero.
    pub fn decrease_count(&mut self) {
        self.count = self.count.saturating_sub(1);
    }
}

/// A stat change applied once, the moment it is picked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyingItem {
    name: String,
    #[serde(default)]
    effect: StatDelta,
}

impl ModifyingItem {
    /// Creates a modifying item.
    #[must_use]
    pub fn new(name: impl Into<String>, effect: StatDelta) -> Self {
        Self {
            name: name.into(),
            effect,
        }
    }

    /// Item name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The permanent stat change.
    #[must_use]
    pub const fn effect(&self) -> StatDelta {
        self.effect
    }

    /// Permanently applies the effect to `player`.
    pub fn alter_player(&self, player: &mut Player) {
        player.apply_delta(self.effect);
    }
}

// =============================================================================
// Item
// =============================================================================

/// Item kind, for logging and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// [`WeaponItem`]
    Weapon,
    /// [`UsableItem`]
    Usable,
    /// [`ModifyingItem`]
    Modifying,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weapon => write!(f, "weapon"),
            Self::Usable => write!(f, "usable"),
            Self::Modifying => write!(f, "modifying"),
        }
    }
}

/// Any item that can lie on a field or sit in an inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Item {
    /// Equip-swappable weapon.
    Weapon(WeaponItem),
    /// Counted consumable.
    Usable(UsableItem),
    /// One-shot stat change.
    Modifying(ModifyingItem),
}

impl Item {
    /// Item name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Weapon(item) => item.name(),
            Self::Usable(item) => item.name(),
            Self::Modifying(item) => item.name(),
        }
    }

    /// Item kind.
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::Weapon(_) => ItemKind::Weapon,
            Self::Usable(_) => ItemKind::Usable,
            Self::Modifying(_) => ItemKind::Modifying,
        }
    }

    /// Returns the weapon, if this is one.
    #[must_use]
    pub const fn as_weapon(&self) -> Option<&WeaponItem> {
        match self {
            Self::Weapon(item) => Some(item),
            _ => None,
        }
    }

    /// Returns the usable item, if this is one.
    #[must_use]
    pub const fn as_usable(&self) -> Option<&UsableItem> {
        match self {
            Self::Usable(item) => Some(item),
            _ => None,
        }
    }

    /// Returns the modifying item, if this is one.
    #[must_use]
    pub const fn as_modifying(&self) -> Option<&ModifyingItem> {
        match self {
            Self::Modifying(item) => Some(item),
            _ => None,
        }
    }
}

impl From<WeaponItem> for Item {
    fn from(item: WeaponItem) -> Self {
        Self::Weapon(item)
    }
}

impl From<UsableItem> for Item {
    fn from(item: UsableItem) -> Self {
        Self::Usable(item)
    }
}

impl From<ModifyingItem> for Item {
    fn from(item: ModifyingItem) -> Self {
        Self::Modifying(item)
    }
}
