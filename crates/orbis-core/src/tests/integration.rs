//! End-to-end games driven through the public `Game` API.

use std::sync::Arc;

use crate::board::Position;
use crate::dice::MockDice;
use crate::error::{AttackRejection, GameError};
use crate::game::{Game, GameStatus};
use crate::item::UsableItem;

use super::helpers::{init_tracing, rest_until, seeded_game, started_game, test_board, test_catalog};

/// A game on the test board whose dice always roll `roll`.
fn fixed_roll_game(roll: u32) -> Game {
    let mut dice = MockDice::new();
    dice.expect_roll().return_const(roll);
    Game::new(
        Arc::new(test_board()),
        Box::new(test_catalog()),
        Box::new(dice),
        2,
    )
    .expect("valid game")
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_two_player_game_starts_on_second_join() {
    init_tracing();
    let mut game = seeded_game(11, 2);

    game.add_player("alice", "warrior").unwrap();
    assert_eq!(game.status(), GameStatus::WaitingForUsers);
    assert!(game.move_player_right("alice").is_err());

    game.add_player("bob", "archer").unwrap();
    assert_eq!(game.status(), GameStatus::CurrentPlayerMove);
    assert_eq!(game.current_player(), Some("alice"));

    let roll = game.last_dice_roll().unwrap();
    assert!((1..=6).contains(&roll));
}

#[test]
fn test_move_uses_last_roll() {
    init_tracing();
    let mut game = started_game(3);
    let roll = game.last_dice_roll().unwrap() as usize;

    assert_eq!(
        game.move_player_right("bob").unwrap_err(),
        GameError::NotCurrentPlayer("bob".into())
    );

    let position = game.move_player_right("alice").unwrap();
    assert_eq!(position, Position::new(0, roll % 12));

    let position = game.move_player_left("alice").unwrap();
    assert_eq!(position, Position::new(0, 0));
}

#[test]
fn test_late_joiner_takes_turn_after_others() {
    let mut game = started_game(5);
    game.add_player("carol", "warrior").unwrap();
    assert_eq!(game.current_player(), Some("alice"));

    game.action("alice", "rest").unwrap();
    game.action("bob", "rest").unwrap();
    assert_eq!(game.current_player(), Some("carol"));

    game.action("carol", "rest").unwrap();
    assert_eq!(game.current_player(), Some("alice"));
}

#[test]
fn test_leaving_and_rejoining() {
    init_tracing();
    let mut game = started_game(8);

    game.remove_player("alice").unwrap();
    assert_eq!(game.status(), GameStatus::WaitingForUsers);
    assert_eq!(game.current_player(), None);
    assert!(game.action("bob", "rest").is_err());

    game.add_player("alice", "warrior").unwrap();
    assert_eq!(game.status(), GameStatus::CurrentPlayerMove);
    assert_eq!(game.player_names().collect::<Vec<_>>(), ["bob", "alice"]);
    assert_eq!(game.current_player(), Some("bob"));
}

// =============================================================================
// Inventory
// =============================================================================

#[test]
fn test_pick_equip_and_use_on_starting_field() {
    init_tracing();
    let mut game = started_game(1);

    game.pick_item("alice", "potion").unwrap();
    game.pick_item("alice", "potion").unwrap();
    game.pick_item("alice", "axe").unwrap();
    game.equip_weapon("alice", "axe").unwrap();

    let alice = game.player("alice").unwrap();
    let potions: Vec<_> = alice.usable_items().collect();
    assert_eq!(potions.len(), 1);
    assert_eq!(potions[0].count(), 3);
    assert_eq!(alice.equipped_weapon().name(), "axe");
    assert!(alice.has_weapon("sword"));

    for _ in 0..3 {
        game.use_item("alice", "potion").unwrap();
    }
    let alice = game.player("alice").unwrap();
    assert_eq!(alice.hp(), 130);
    assert!(alice.usable_item("potion").is_none());
    assert_eq!(
        game.use_item("alice", "potion").unwrap_err(),
        GameError::UnknownItem("potion".into())
    );

    // inventory actions never pass the turn
    assert_eq!(game.current_player(), Some("alice"));
}

#[test]
fn test_field_keeps_items_for_next_player() {
    let mut game = started_game(2);
    game.pick_item("alice", "potion").unwrap();
    game.action("alice", "rest").unwrap();

    game.pick_item("bob", "potion").unwrap();

    let bob = game.player("bob").unwrap();
    assert_eq!(bob.usable_item("potion").map(UsableItem::count), Some(2));
}

// =============================================================================
// Combat
// =============================================================================

#[test]
fn test_archer_shoots_warrior() {
    init_tracing();
    let mut game = started_game(4);
    rest_until(&mut game, "bob");

    let attack = game.attack("bob", "alice").unwrap();

    // bow 5 + archer attack 2, warrior def 2
    assert_eq!(attack.value(), 7);
    assert_eq!(game.player("alice").unwrap().hp(), 95);
    assert_eq!(game.player("bob").unwrap().experience(), 3);
}

#[test]
fn test_hp_can_drop_below_zero() {
    let mut game = started_game(6);

    // sword 6 + 4 attack - archer def 1 = 9 per hit, hp can go below zero
    for _ in 0..10 {
        game.attack("alice", "bob").unwrap();
    }
    let bob = game.player("bob").unwrap();
    assert_eq!(bob.hp(), 80 - 90);

    // a player below zero hp still holds a seat and takes turns
    game.action("alice", "rest").unwrap();
    assert_eq!(game.current_player(), Some("bob"));
}

#[test]
fn test_attack_out_of_reach() {
    let mut game = fixed_roll_game(5);
    game.add_player("alice", "warrior").unwrap();
    game.add_player("bob", "archer").unwrap();

    game.move_player_right("alice").unwrap();

    assert_eq!(
        game.attack("alice", "bob").unwrap_err(),
        GameError::CannotAttack(AttackRejection::OutOfRange {
            distance: 5,
            range: 1
        })
    );
}

// =============================================================================
// Field actions
// =============================================================================

#[test]
fn test_walk_across_special_fields() {
    init_tracing();
    let mut game = fixed_roll_game(1);
    game.add_player("alice", "warrior").unwrap();
    game.add_player("bob", "archer").unwrap();

    // alice: onto the shrine
    game.move_player_right("alice").unwrap();
    assert!(matches!(
        game.action("alice", "rest"),
        Err(GameError::UnknownAction { available: "shrine", .. })
    ));
    game.action("alice", "shrine").unwrap();
    assert_eq!(game.player("alice").unwrap().def(), 3);

    // bob: two steps onto the trap
    game.move_player_right("bob").unwrap();
    game.move_player_right("bob").unwrap();
    game.action("bob", "trap").unwrap();
    assert_eq!(game.player("bob").unwrap().hp(), 73);

    // alice: on to the portal, pick up the ring first
    game.move_player_right("alice").unwrap();
    game.move_player_right("alice").unwrap();
    game.pick_item("alice", "ring-of-protection").unwrap();
    assert_eq!(game.player("alice").unwrap().def(), 6);
    game.action("alice", "portal").unwrap();

    assert_eq!(game.player("alice").unwrap().position(), Position::new(1, 5));
    assert_eq!(game.current_player(), Some("bob"));

    // rings differ now
    assert!(matches!(
        game.attack("bob", "alice"),
        Err(GameError::CannotAttack(AttackRejection::DifferentRing { .. }))
    ));
}
