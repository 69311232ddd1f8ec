//! Player entity: position, stats, combat and inventory.
//!
//! A player always has exactly one equipped weapon, plus three inventories:
//!
//! - weapons, keyed by name, swappable with the equipped weapon
//! - usable items, keyed by name, stacking by count
//! - modifying items, keyed by name, already applied and kept as a record
//!
//! Combat is resolved between two players directly: the attacker checks the
//! target is on the same ring and within weapon range, produces an
//! [`Attack`], and the target resolves the damage through its own
//! [`handle_attack`](Player::handle_attack), which honours per-attack
//! override handlers.
//!
//! # Example
//!
//! ```
//! use orbis_core::item::WeaponItem;
//! use orbis_core::player::{Player, Stats};
//!
//! let mut knight = Player::new(Stats::new(100, 2, 5, 0), WeaponItem::new("sword", 1, 5));
//! let mut rogue = Player::new(Stats::new(80, 1, 3, 0), WeaponItem::new("dagger", 1, 2));
//!
//! knight.attack(&mut rogue).unwrap();
//!
//! // sword damage 5 + attack points 5 - rogue defence 1
//! assert_eq!(rogue.hp(), 71);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, Direction, Position};
use crate::error::{AttackRejection, GameError};
use crate::item::{Attack, Item, ModifyingItem, StatDelta, UsableItem, WeaponItem};

/// Resolver overriding the default damage formula for one attack name.
///
/// Receives the incoming attack and returns the damage to subtract from hp.
pub type AttackHandler = Box<dyn Fn(&Attack) -> i32 + Send + Sync>;

/// Starting stats of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Hit points.
    pub hp: i32,
    /// Defence, subtracted from incoming attack values.
    pub def: i32,
    /// Attack points, added to weapon damage.
    pub attack: i32,
    /// Mana.
    pub mana: i32,
}

impl Stats {
    /// Creates a stat block.
    #[must_use]
    pub const fn new(hp: i32, def: i32, attack: i32, mana: i32) -> Self {
        Self {
            hp,
            def,
            attack,
            mana,
        }
    }
}

/// A participant on the board.
pub struct Player {
    position: Position,
    hp: i32,
    def: i32,
    attack_points: i32,
    mana: i32,
    experience: u32,
    equipped_weapon: WeaponItem,
    weapons: BTreeMap<String, WeaponItem>,
    usables: BTreeMap<String, UsableItem>,
    modifiers: BTreeMap<String, ModifyingItem>,
    attack_handlers: BTreeMap<String, AttackHandler>,
}

impl Player {
    /// Creates a player at `(0, 0)` with empty inventories.
    ///
    /// Call [`place_on`](Self::place_on) to move the player to a board's
    /// starting position.
    #[must_use]
    pub fn new(stats: Stats, default_weapon: WeaponItem) -> Self {
        Self {
            position: Position::default(),
            hp: stats.hp,
            def: stats.def,
            attack_points: stats.attack,
            mana: stats.mana,
            experience: 0,
            equipped_weapon: default_weapon,
            weapons: BTreeMap::new(),
            usables: BTreeMap::new(),
            modifiers: BTreeMap::new(),
            attack_handlers: BTreeMap::new(),
        }
    }

    /// Puts the player on `board`'s starting ring and field.
    ///
    /// Used when a player joins a game and whenever the player is moved to a
    /// different board.
    pub fn place_on(&mut self, board: &dyn Board) {
        self.position = board.starting_position();
    }

    // -------------------------------------------------------------------------
    // Position
    // -------------------------------------------------------------------------

    /// Current ring and field.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Current ring index.
    #[must_use]
    pub const fn circle(&self) -> usize {
        self.position.circle
    }

    /// Current field index.
    #[must_use]
    pub const fn field(&self) -> usize {
        self.position.field
    }

    /// Walks `steps` fields to the right along the current ring.
    pub fn move_right(&mut self, board: &dyn Board, steps: u32) {
        self.walk(board, Direction::Right, steps);
    }

    /// Walks `steps` fields to the left along the current ring.
    pub fn move_left(&mut self, board: &dyn Board, steps: u32) {
        self.walk(board, Direction::Left, steps);
    }

    fn walk(&mut self, board: &dyn Board, direction: Direction, steps: u32) {
        let field = board.calculate_position(self.position, direction, steps);
        debug!(
            from = %self.position,
            to = field,
            %direction,
            steps,
            "player walked"
        );
        self.position.field = field;
    }

    /// Moves onto the next ring, landing on `field`.
    ///
    /// `field` is not checked against the new ring's length.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidRing`] if the player is on the last ring.
    pub fn move_to_next_circle(&mut self, board: &dyn Board, field: usize) -> Result<(), GameError> {
        let circles = board.number_of_circles();
        if self.position.circle + 1 >= circles {
            return Err(GameError::InvalidRing {
                circle: self.position.circle,
                circles,
            });
        }
        self.position = Position::new(self.position.circle + 1, field);
        debug!(position = %self.position, "player advanced to next ring");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Stats
    // -------------------------------------------------------------------------

    /// Hit points. May be negative; no floor is enforced.
    #[must_use]
    pub const fn hp(&self) -> i32 {
        self.hp
    }

    /// Defence.
    #[must_use]
    pub const fn def(&self) -> i32 {
        self.def
    }

    /// Attack points.
    #[must_use]
    pub const fn attack_points(&self) -> i32 {
        self.attack_points
    }

    /// Mana.
    #[must_use]
    pub const fn mana(&self) -> i32 {
        self.mana
    }

    /// Experience. Never decreases.
    #[must_use]
    pub const fn experience(&self) -> u32 {
        self.experience
    }

    /// Adds `delta` to the player's stats.
    pub fn apply_delta(&mut self, delta: StatDelta) {
        self.hp = self.hp.saturating_add(delta.hp);
        self.def = self.def.saturating_add(delta.def);
        self.attack_points = self.attack_points.saturating_add(delta.attack);
        self.mana = self.mana.saturating_add(delta.mana);
    }

    /// Subtracts `amount` from hit points.
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    // -------------------------------------------------------------------------
    // Combat
    // -------------------------------------------------------------------------

    /// Registers `handler` for attacks named `name`, replacing any previous
    /// handler for that name.
    pub fn register_attack_handler<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&Attack) -> i32 + Send + Sync + 'static,
    {
        self.attack_handlers.insert(name.into(), Box::new(handler));
    }

    /// Resolves an incoming attack and returns the damage taken.
    ///
    /// A handler registered for the attack's name decides the damage;
    /// otherwise damage is `attack.value() - def`. The result is subtracted
    /// from hp unconditionally, so a negative value heals.
    pub fn handle_attack(&mut self, attack: &Attack) -> i32 {
        let damage = match self.attack_handlers.get(attack.name()) {
            Some(handler) => handler(attack),
            None => attack.value().saturating_sub(self.def),
        };
        self.take_damage(damage);
        damage
    }

    /// Checks that `target` is on the same ring and within weapon range.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotAttack`] with the reason.
    pub fn check_attack_possibility(&self, target: &Player) -> Result<(), GameError> {
        if self.circle() != target.circle() {
            return Err(GameError::CannotAttack(AttackRejection::DifferentRing {
                attacker: self.circle(),
                target: target.circle(),
            }));
        }
        let distance = self.field().abs_diff(target.field());
        let range = self.equipped_weapon.range();
        if distance > range as usize {
            return Err(GameError::CannotAttack(AttackRejection::OutOfRange {
                distance,
                range,
            }));
        }
        Ok(())
    }

    /// Attacks `target` with the equipped weapon.
    ///
    /// On success the target resolves the attack and the attacker gains the
    /// attack's experience reward. The produced attack is returned.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotAttack`] if the target is on another ring
    /// or out of range. Neither player is changed in that case.
    pub fn attack(&mut self, target: &mut Player) -> Result<Attack, GameError> {
        self.check_attack_possibility(target)?;

        let attack = self.equipped_weapon.create_attack(self);
        let damage = target.handle_attack(&attack);
        self.experience = self.experience.saturating_add(attack.experience_reward());

        debug!(
            attack = attack.name(),
            value = attack.value(),
            damage,
            target_hp = target.hp(),
            "attack landed"
        );
        Ok(attack)
    }

    // -------------------------------------------------------------------------
    // Inventory
    // -------------------------------------------------------------------------

    /// The equipped weapon.
    #[must_use]
    pub const fn equipped_weapon(&self) -> &WeaponItem {
        &self.equipped_weapon
    }

    /// Weapons in the inventory, ordered by name. Excludes the equipped one.
    pub fn weapons(&self) -> impl Iterator<Item = &WeaponItem> + '_ {
        self.weapons.values()
    }

    /// Returns `true` if a weapon named `name` is in the inventory.
    #[must_use]
    pub fn has_weapon(&self, name: &str) -> bool {
        self.weapons.contains_key(name)
    }

    /// Usable items, ordered by name.
    pub fn usable_items(&self) -> impl Iterator<Item = &UsableItem> + '_ {
        self.usables.values()
    }

    /// Looks up a usable item by name.
    #[must_use]
    pub fn usable_item(&self, name: &str) -> Option<&UsableItem> {
        self.usables.get(name)
    }

    /// Modifying items picked up so far, ordered by name.
    pub fn modifying_items(&self) -> impl Iterator<Item = &ModifyingItem> + '_ {
        self.modifiers.values()
    }

    /// Takes `item` into the matching inventory.
    ///
    /// - Weapons are stored by name, replacing a weapon with the same name.
    ///   A weapon named like the equipped one is dropped, so a name is never
    ///   both equipped and stored.
    /// - Usable items stack: if one with the same name is held, its count is
    ///   increased by one instead of storing a second entry. An empty usable
    ///   item (count zero) is dropped.
    /// - Modifying items are applied immediately, then recorded by name.
    pub fn pick_item(&mut self, item: Item) {
        debug!(item = item.name(), kind = %item.kind(), "item picked");
        match item {
            Item::Weapon(weapon) => {
                if weapon.name() == self.equipped_weapon.name() {
                    return;
                }
                self.weapons.insert(weapon.name().to_owned(), weapon);
            }
            Item::Usable(usable) => {
                if usable.count() == 0 {
                    return;
                }
                if let Some(held) = self.usables.get_mut(usable.name()) {
                    held.increase_count();
                } else {
                    self.usables.insert(usable.name().to_owned(), usable);
                }
            }
            Item::Modifying(modifier) => {
                modifier.alter_player(self);
                self.modifiers.insert(modifier.name().to_owned(), modifier);
            }
        }
    }

    /// Uses one of the usable items named `name`.
    ///
    /// Applies the effect, then decrements the count; the entry is removed
    /// once the count reaches zero.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownItem`] if no such item is held.
    pub fn use_item(&mut self, name: &str) -> Result<(), GameError> {
        let mut item = self
            .usables
            .remove(name)
            .ok_or_else(|| GameError::UnknownItem(name.to_owned()))?;

        item.apply(self);
        item.decrease_count();
        debug!(item = name, remaining = item.count(), "item used");

        if item.count() > 0 {
            self.usables.insert(item.name().to_owned(), item);
        }
        Ok(())
    }

    /// Swaps the weapon named `name` from the inventory with the equipped one.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownWeapon`] if the weapon is not in the
    /// inventory.
    pub fn equip_weapon(&mut self, name: &str) -> Result<(), GameError> {
        let weapon = self
            .weapons
            .remove(name)
            .ok_or_else(|| GameError::UnknownWeapon(name.to_owned()))?;

        let previous = std::mem::replace(&mut self.equipped_weapon, weapon);
        debug!(
            equipped = self.equipped_weapon.name(),
            stored = previous.name(),
            "weapon swapped"
        );
        self.weapons.insert(previous.name().to_owned(), previous);
        Ok(())
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("position", &self.position)
            .field("hp", &self.hp)
            .field("def", &self.def)
            .field("attack_points", &self.attack_points)
            .field("mana", &self.mana)
            .field("experience", &self.experience)
            .field("equipped_weapon", &self.equipped_weapon.name())
            .field("weapons", &self.weapons.keys().collect::<Vec<_>>())
            .field("usables", &self.usables.keys().collect::<Vec<_>>())
            .field("modifiers", &self.modifiers.keys().collect::<Vec<_>>())
            .field(
                "attack_handlers",
                &self.attack_handlers.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}
