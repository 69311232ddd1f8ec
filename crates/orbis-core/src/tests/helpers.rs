//! Test setup shared by the scenario tests.

use std::sync::Arc;

use crate::board::{FieldAction, Position, RingBoard};
use crate::dice::SeededDice;
use crate::factory::{ClassCatalog, PlayerTemplate};
use crate::game::Game;
use crate::item::{ModifyingItem, StatDelta, UsableItem, WeaponItem};
use crate::player::Stats;

// =============================================================================
// Tracing
// =============================================================================

/// Installs a fmt subscriber writing through the test harness.
///
/// Safe to call from every test; only the first call installs it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

// =============================================================================
// Catalog & Board
// =============================================================================

/// Two classes: a short-range `warrior` and a long-range `archer`.
pub fn test_catalog() -> ClassCatalog {
    ClassCatalog::new()
        .with_class(
            "warrior",
            PlayerTemplate::new(Stats::new(100, 2, 4, 0), WeaponItem::new("sword", 1, 6)),
        )
        .with_class(
            "archer",
            PlayerTemplate::new(
                Stats::new(80, 1, 2, 0),
                WeaponItem::new("bow", 4, 5).with_experience_reward(3),
            ),
        )
}

/// Three rings of twelve fields with some content on the outer ring:
///
/// - `(0, 0)`: a potion (count 2) and an axe, resting field
/// - `(0, 1)`: a shrine granting +1 def
/// - `(0, 2)`: a trap costing 7 hp
/// - `(0, 3)`: a portal to field 5 of ring 1, plus a ring of protection
pub fn test_board() -> RingBoard {
    let mut board = RingBoard::uniform(3, 12).expect("uniform board is valid");
    board
        .place_item(Position::new(0, 0), UsableItem::new("potion", 2, StatDelta::hp(10)))
        .expect("field exists");
    board
        .place_item(Position::new(0, 0), WeaponItem::new("axe", 2, 9))
        .expect("field exists");
    board
        .set_action(
            Position::new(0, 1),
            FieldAction::Shrine {
                effect: StatDelta::new(0, 1, 0, 0),
            },
        )
        .expect("field exists");
    board
        .set_action(Position::new(0, 2), FieldAction::Trap { damage: 7 })
        .expect("field exists");
    board
        .set_action(Position::new(0, 3), FieldAction::Portal { field: 5 })
        .expect("field exists");
    board
        .place_item(
            Position::new(0, 3),
            ModifyingItem::new("ring-of-protection", StatDelta::new(0, 3, 0, 0)),
        )
        .expect("field exists");
    board
}

// =============================================================================
// Games
// =============================================================================

/// A game on [`test_board`] with [`test_catalog`] and seeded dice.
pub fn seeded_game(seed: u64, min_players: usize) -> Game {
    Game::new(
        Arc::new(test_board()),
        Box::new(test_catalog()),
        Box::new(SeededDice::new(6, seed).expect("six-sided dice are valid")),
        min_players,
    )
    .expect("min_players is positive")
}

/// A seeded two-player game already in play, `alice` (warrior) first and
/// `bob` (archer) second.
pub fn started_game(seed: u64) -> Game {
    let mut game = seeded_game(seed, 2);
    game.add_player("alice", "warrior").expect("alice joins");
    game.add_player("bob", "archer").expect("bob joins");
    game
}

/// Passes turns with `rest` until `name` holds the turn.
///
/// Every player must be on a resting field.
pub fn rest_until(game: &mut Game, name: &str) {
    for _ in 0..game.player_count() {
        let current = match game.current_player() {
            Some(current) if current == name => return,
            Some(current) => current.to_owned(),
            None => panic!("game is not in play"),
        };
        game.action(&current, "rest").expect("resting field");
    }
    assert_eq!(game.current_player(), Some(name));
}
