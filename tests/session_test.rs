//! Game session integration tests
//!
//! Runs the session against the shipped definition files with seeded randomness.

use aorte::character::{Player, SaveManager};
use aorte::combat::{CombatAction, CombatOutcome, Encounter};
use aorte::core::session::Game;
use aorte::errors::GameError;
use aorte::quests::available_quests;
use aorte::registry::{load_from_dir, Registry};
use aorte::ui::{play, Console};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::Cursor;
use std::path::Path;

fn shipped_registry() -> Registry {
    load_from_dir(Path::new(env!("CARGO_MANIFEST_DIR")).join("defins")).unwrap()
}

fn assert_invariants(player: &Player) {
    assert!(player.hp >= 0 && player.hp <= player.max_hp);
    assert!(player.silver >= 0);
    for quest in &player.current_quests {
        assert!(!player.completed_quests.contains(quest));
    }
}

#[test]
fn test_shipped_definitions_load() {
    let registry = shipped_registry();
    assert!(registry.item_count() > 0);
    assert!(registry.enemy_count() >= 2);
    assert!(registry.quest_count() > 0);
    assert!(registry.item("Herb").is_some_and(|item| item.edible));
}

#[test]
fn test_explore_places_player_in_generated_location() {
    let registry = shipped_registry();
    let mut game = Game::new(&registry, Player::new("Ayla"));
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    for _ in 0..50 {
        let report = game.explore(&mut rng).unwrap();
        assert_eq!(report.location, game.location().name);
        assert_eq!(game.player().location, game.location().name);
        for item in &game.location().items {
            assert!(registry.item(item).is_some_and(|def| def.spawnable));
        }
        for enemy in &game.location().enemies {
            assert!(registry.enemy(enemy).is_some());
        }
    }
}

#[test]
fn test_accepting_item_find_already_met_completes_at_once() {
    let registry = shipped_registry();
    let mut player = Player::new("Ayla");
    player.add_item("Ancient Map");
    let mut game = Game::new(&registry, player);

    game.accept_quest("Lost Cartographer").unwrap();
    let done = game.drain_completions();
    assert_eq!(done.len(), 1);
    assert!(game.player().has_item("Amulet of Vigor"));
    assert_eq!(game.player().max_hp, 120);
    assert!(game.drain_completions().is_empty());

    assert!(matches!(
        game.accept_quest("Lost Cartographer"),
        Err(GameError::Quest(_))
    ));
}

#[test]
fn test_seeded_adventure_keeps_invariants() {
    let registry = shipped_registry();
    let mut game = Game::new(&registry, Player::new("Ayla"));
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    for (id, _) in available_quests(&registry, game.player()) {
        game.accept_quest(id).unwrap();
    }

    let mut fights = 0;
    for _ in 0..100 {
        if game.is_over() {
            break;
        }
        game.explore(&mut rng).unwrap();
        for item in game.location().items.clone() {
            game.take_item(&item).unwrap();
            assert_invariants(game.player());
        }
        for enemy in game.location().enemies.clone() {
            let mut driver = |encounter: &Encounter<'_>| {
                let player = encounter.player();
                if player.hp < player.max_hp / 4 {
                    CombatAction::Flee
                } else {
                    match encounter.usable_items().first() {
                        Some(item) => CombatAction::UseItem(Some(item.clone())),
                        None => CombatAction::Attack,
                    }
                }
            };
            let report = game.fight(&enemy, &mut rng, &mut driver).unwrap();
            fights += 1;
            assert_invariants(game.player());
            match report.outcome {
                CombatOutcome::Victory => assert!(!game.location().has_enemy(&enemy)),
                CombatOutcome::Fled => assert!(game.location().has_enemy(&enemy)),
                CombatOutcome::Defeat => {
                    assert!(game.is_over());
                    break;
                }
            }
        }
        if game.is_over() {
            break;
        }
        let edible = game.player().edible_items(&registry);
        if let Some(item) = edible.first() {
            game.eat(item, &mut rng).unwrap();
        }
        assert_invariants(game.player());
    }
    assert!(fights > 0);

    if game.is_over() {
        assert!(matches!(game.explore(&mut rng), Err(GameError::GameOver)));
    }
}

#[test]
fn test_play_loop_new_game_until_input_ends() {
    let registry = shipped_registry();
    let dir = tempfile::tempdir().unwrap();
    let saves = SaveManager::new(dir.path()).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let mut console = Console::new(Cursor::new("1\nBrannoc\n"), Vec::new());
    play(&mut console, &registry, &saves, &mut rng).unwrap();

    let out = String::from_utf8(console.into_output()).unwrap();
    assert!(out.contains("Welcome, Brannoc!"));
    assert!(out.contains("What will Brannoc do?"));
    assert!(out.trim_end().ends_with("Farewell, Adventurer!"));
}

#[test]
fn test_play_loop_load_without_saves() {
    let registry = shipped_registry();
    let dir = tempfile::tempdir().unwrap();
    let saves = SaveManager::new(dir.path()).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let mut console = Console::new(Cursor::new("2\n"), Vec::new());
    play(&mut console, &registry, &saves, &mut rng).unwrap();

    let out = String::from_utf8(console.into_output()).unwrap();
    assert!(out.contains("No save files found."));
    assert!(out.trim_end().ends_with("Farewell!"));
}

#[test]
fn test_play_loop_resumes_saved_character() {
    let registry = shipped_registry();
    let dir = tempfile::tempdir().unwrap();
    let saves = SaveManager::new(dir.path()).unwrap();
    let mut player = Player::new("Morwen");
    player.add_silver(30);
    saves.save(&player, "morwen").unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(8);

    let mut console = Console::new(Cursor::new("2\n1\n"), Vec::new());
    play(&mut console, &registry, &saves, &mut rng).unwrap();

    let out = String::from_utf8(console.into_output()).unwrap();
    assert!(out.contains("morwen  Morwen at Mystic Forest"));
    assert!(out.contains("Welcome, Morwen!"));
}
