//! Player construction from class templates.
//!
//! [`Game`](crate::game::Game) never builds players itself; it asks a
//! [`PlayerFactory`] for a fresh player of the requested class and then
//! places it on its board. [`ClassCatalog`] is the data-driven factory,
//! loadable from JSON:
//!
//! ```
//! use orbis_core::factory::{ClassCatalog, PlayerFactory};
//!
//! let catalog = ClassCatalog::from_json_str(r#"{
//!     "warrior": {
//!         "stats": { "hp": 120, "def": 3, "attack": 6, "mana": 0 },
//!         "weapon": { "name": "sword", "range": 1, "damage": 5 }
//!     }
//! }"#).unwrap();
//!
//! let warrior = catalog.create_player("warrior").unwrap();
//! assert_eq!(warrior.hp(), 120);
//! assert_eq!(warrior.equipped_weapon().name(), "sword");
//! assert!(catalog.create_player("bard").is_err());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GameError};
use crate::item::{Item, WeaponItem};
use crate::player::{Player, Stats};

/// Produces new players by class name.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait PlayerFactory: Send + Sync {
    /// Builds a new player of class `class_name`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownPlayerClass`] if the class is not known.
    fn create_player(&self, class_name: &str) -> Result<Player, GameError>;
}

/// Starting stats, default weapon and starting inventory of a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerTemplate {
    /// Starting stats.
    pub stats: Stats,
    /// Weapon equipped on creation.
    pub weapon: WeaponItem,
    /// Items picked up on creation, in order.
    #[serde(default)]
    pub items: Vec<Item>,
}

impl PlayerTemplate {
    /// Creates a template with an empty starting inventory.
    #[must_use]
    pub const fn new(stats: Stats, weapon: WeaponItem) -> Self {
        Self {
            stats,
            weapon,
            items: Vec::new(),
        }
    }

    /// Adds a starting item.
    #[must_use]
    pub fn with_item(mut self, item: impl Into<Item>) -> Self {
        self.items.push(item.into());
        self
    }

    /// Builds a player from this template.
    #[must_use]
    pub fn instantiate(&self) -> Player {
        let mut player = Player::new(self.stats, self.weapon.clone());
        for item in &self.items {
            player.pick_item(item.clone());
        }
        player
    }
}

/// Class name to template table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassCatalog {
    classes: BTreeMap<String, PlayerTemplate>,
}

impl ClassCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a class.
    #[must_use]
    pub fn with_class(mut self, name: impl Into<String>, template: PlayerTemplate) -> Self {
        self.classes.insert(name.into(), template);
        self
    }

    /// Looks up a class template.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PlayerTemplate> {
        self.classes.get(name)
    }

    /// Known class names, sorted.
    pub fn class_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.classes.keys().map(String::as_str)
    }

    /// Parses a catalog from a JSON object keyed by class name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed JSON and
    /// [`ConfigError::Invalid`] if the catalog defines no classes.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let catalog: Self = serde_json::from_str(json)?;
        if catalog.classes.is_empty() {
            return Err(ConfigError::invalid("class catalog defines no classes"));
        }
        Ok(catalog)
    }
}

impl PlayerFactory for ClassCatalog {
    fn create_player(&self, class_name: &str) -> Result<Player, GameError> {
        self.get(class_name)
            .map(PlayerTemplate::instantiate)
            .ok_or_else(|| GameError::UnknownPlayerClass(class_name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{StatDelta, UsableItem};

    fn mage() -> PlayerTemplate {
        PlayerTemplate::new(Stats::new(70, 0, 2, 40), WeaponItem::new("staff", 3, 4))
            .with_item(UsableItem::new("potion", 2, StatDelta::hp(15)))
    }

    #[test]
    fn creates_player_from_template() {
        let catalog = ClassCatalog::new().with_class("mage", mage());

        let player = catalog.create_player("mage").unwrap();

        assert_eq!(player.hp(), 70);
        assert_eq!(player.mana(), 40);
        assert_eq!(player.equipped_weapon().range(), 3);
        assert_eq!(player.usable_item("potion").map(UsableItem::count), Some(2));
    }

    #[test]
    fn each_call_creates_a_fresh_player() {
        let catalog = ClassCatalog::new().with_class("mage", mage());
        let mut first = catalog.create_player("mage").unwrap();
        first.take_damage(50);

        let second = catalog.create_player("mage").unwrap();
        assert_eq!(second.hp(), 70);
    }

    #[test]
    fn unknown_class_is_rejected() {
        let catalog = ClassCatalog::new().with_class("mage", mage());
        let err = catalog.create_player("paladin").unwrap_err();
        assert_eq!(err, GameError::UnknownPlayerClass("paladin".into()));
    }

    #[test]
    fn class_names_are_sorted() {
        let catalog = ClassCatalog::new()
            .with_class("rogue", mage())
            .with_class("mage", mage());
        assert_eq!(catalog.class_names().collect::<Vec<_>>(), ["mage", "rogue"]);
    }

    #[test]
    fn loads_items_from_json() {
        let catalog = ClassCatalog::from_json_str(
            r#"{
                "cleric": {
                    "stats": { "hp": 90, "def": 2, "attack": 3, "mana": 20 },
                    "weapon": { "name": "mace", "range": 1, "damage": 4 },
                    "items": [
                        { "kind": "modifying", "name": "blessing", "effect": { "def": 2 } }
                    ]
                }
            }"#,
        )
        .unwrap();

        let cleric = catalog.create_player("cleric").unwrap();
        assert_eq!(cleric.def(), 4);
        assert_eq!(cleric.modifying_items().count(), 1);
    }

    #[test]
    fn empty_catalog_is_invalid() {
        let err = ClassCatalog::from_json_str("{}").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
