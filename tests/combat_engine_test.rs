//! Combat engine integration tests
//!
//! Drives full encounters through the public API with scripted dice so every roll is pinned.

use aorte::character::{Player, Skill};
use aorte::combat::{
    run_encounter, CombatAction, CombatEvent, CombatOutcome, Encounter,
};
use aorte::core::dice::ScriptedDice;
use aorte::errors::CombatError;
use aorte::registry::{load_from_str, Registry};

fn registry() -> Registry {
    load_from_str(
        r#"{
            "Pelt": {"value": 4},
            "Strength Tonic": {"value": 10, "combat_usable": true,
                "effect": {"type": "buff_player", "skill": "Strength", "amount": 3}},
            "Swiftroot": {"value": 9, "combat_usable": true,
                "effect": {"type": "buff_player", "skill": "Agility", "amount": 4}}
        }"#,
        r#"{
            "Sparring Bear": {"hp": 10, "attack": 2, "silver_drop": [1, 5],
                              "drops": [{"item": "Pelt", "chance": 50}]},
            "Brute": {"hp": 50, "attack": 10}
        }"#,
        "{}",
    )
    .unwrap()
}

// ============================================================================
// Worked scenarios
// ============================================================================

#[test]
fn test_attack_kills_and_loots_once() {
    let registry = registry();
    let mut player = Player::new("Ayla");
    player.skills.set(Skill::Strength, 5);
    player.skills.set(Skill::Wisdom, 0);

    // insight (fails at Wisdom 0), attack die 6, silver 3, drop roll 10
    let mut dice = ScriptedDice::new([100, 6, 3, 10]);
    let turn = {
        let mut encounter =
            Encounter::begin(&mut player, &registry, "Sparring Bear", &mut dice).unwrap();
        assert!(!encounter.insight_ready());
        let turn = encounter.apply_action(CombatAction::Attack, &mut dice).unwrap();
        assert_eq!(encounter.enemy().hp, -1);
        assert_eq!(encounter.outcome(), Some(CombatOutcome::Victory));
        turn
    };

    assert_eq!(turn.outcome, Some(CombatOutcome::Victory));
    assert_eq!(
        turn.events,
        vec![
            CombatEvent::PlayerAttack {
                damage: 11,
                insight: false
            },
            CombatEvent::EnemyDefeated {
                enemy: "Sparring Bear".into(),
                silver: 3,
                items: vec!["Pelt".into()],
            },
        ]
    );
    assert_eq!(dice.remaining(), 0);
    assert_eq!(player.silver, 3);
    assert_eq!(player.inventory, vec!["Pelt".to_string()]);
    assert_eq!(player.kills("Sparring Bear"), 1);
    // drops are not gathered by hand
    assert_eq!(player.gathered("Pelt"), 0);
}

#[test]
fn test_enemy_hit_defeats_weak_player() {
    let registry = registry();
    let mut player = Player::new("Ayla");
    player.hp = 5;
    player.skills.set(Skill::Agility, 0);

    // insight miss, attack die 1, dodge roll 100 (Agility 0 never dodges), variance 0
    let mut dice = ScriptedDice::new([100, 1, 100, 0]);
    let mut encounter = Encounter::begin(&mut player, &registry, "Brute", &mut dice).unwrap();
    let turn = encounter.apply_action(CombatAction::Attack, &mut dice).unwrap();
    drop(encounter);

    assert!(turn.events.contains(&CombatEvent::EnemyAttack { damage: 10 }));
    assert_eq!(turn.events.last(), Some(&CombatEvent::PlayerDefeated));
    assert_eq!(turn.outcome, Some(CombatOutcome::Defeat));
    // HP floors at zero rather than going to -5
    assert_eq!(player.hp, 0);
    assert!(player.is_defeated());
}

#[test]
fn test_high_agility_always_escapes() {
    let registry = registry();
    let mut player = Player::new("Ayla");
    player.skills.set(Skill::Agility, 25);
    let hp_before = player.hp;

    // insight miss, then the worst possible flee roll
    let mut dice = ScriptedDice::new([100, 100]);
    let mut encounter = Encounter::begin(&mut player, &registry, "Brute", &mut dice).unwrap();
    let turn = encounter.apply_action(CombatAction::Flee, &mut dice).unwrap();
    assert_eq!(encounter.enemy().hp, 50);
    assert_eq!(encounter.turns(), 1);
    drop(encounter);

    assert_eq!(turn.events, vec![CombatEvent::Fled]);
    assert_eq!(turn.outcome, Some(CombatOutcome::Fled));
    assert_eq!(dice.remaining(), 0);
    assert_eq!(player.hp, hp_before);
    assert_eq!(player.kills("Brute"), 0);
}

// ============================================================================
// Buff reversal on every exit path
// ============================================================================

#[test]
fn test_buffs_reverted_after_defeat() {
    let registry = registry();
    let mut player = Player::new("Ayla");
    player.hp = 5;
    player.skills.set(Skill::Agility, 0);
    player.add_item("Strength Tonic");
    let skills_before = player.skills;

    // insight miss, tonic, dodge miss, variance 0
    let mut dice = ScriptedDice::new([100, 100, 0]);
    let mut encounter = Encounter::begin(&mut player, &registry, "Brute", &mut dice).unwrap();
    let turn = encounter
        .apply_action(CombatAction::UseItem(Some("Strength Tonic".into())), &mut dice)
        .unwrap();
    assert_eq!(turn.outcome, Some(CombatOutcome::Defeat));
    assert!(encounter.buffs().is_empty());
    drop(encounter);

    assert_eq!(player.skills, skills_before);
    assert!(!player.has_item("Strength Tonic"));
}

#[test]
fn test_buffs_reverted_after_flight() {
    let registry = registry();
    let mut player = Player::new("Ayla");
    player.skills.set(Skill::Agility, 20);
    player.add_item("Swiftroot");
    let skills_before = player.skills;

    // insight miss, Swiftroot, dodge roll 1, flee roll 96 (threshold 96 with the buff)
    let mut dice = ScriptedDice::new([100, 1, 96]);
    let mut encounter = Encounter::begin(&mut player, &registry, "Brute", &mut dice).unwrap();
    encounter
        .apply_action(CombatAction::UseItem(Some("Swiftroot".into())), &mut dice)
        .unwrap();
    assert_eq!(encounter.player().skills.get(Skill::Agility), 24);
    let turn = encounter.apply_action(CombatAction::Flee, &mut dice).unwrap();
    assert_eq!(turn.outcome, Some(CombatOutcome::Fled));
    drop(encounter);

    assert_eq!(player.skills, skills_before);
}

#[test]
fn test_buffs_reverted_when_abandoned() {
    let registry = registry();
    let mut player = Player::new("Ayla");
    player.add_item("Strength Tonic");
    player.add_item("Strength Tonic");
    let skills_before = player.skills;

    let mut dice = ScriptedDice::new([100, 1, 0, 1, 0]);
    {
        let mut encounter =
            Encounter::begin(&mut player, &registry, "Brute", &mut dice).unwrap();
        for _ in 0..2 {
            encounter
                .apply_action(CombatAction::UseItem(Some("Strength Tonic".into())), &mut dice)
                .unwrap();
        }
        assert_eq!(encounter.player().skills.get(Skill::Strength), 9);
        assert!(encounter.outcome().is_none());
    }

    assert_eq!(player.skills, skills_before);
}

// ============================================================================
// Boundaries
// ============================================================================

#[test]
fn test_fight_refused_inside_safe_zone() {
    let registry = registry();
    let mut player = Player::new("Ayla");
    player.enter_sub_location("Inn");
    let mut dice = ScriptedDice::default();
    let result = Encounter::begin(&mut player, &registry, "Brute", &mut dice);
    assert!(matches!(result, Err(CombatError::InSafeZone(place)) if place == "Inn"));
}

#[test]
fn test_run_encounter_until_flee() {
    let registry = registry();
    let mut player = Player::new("Ayla");
    player.skills.set(Skill::Agility, 25);
    let mut dice = ScriptedDice::new([100, 1, 100, 1]);
    let mut encounter = Encounter::begin(&mut player, &registry, "Brute", &mut dice).unwrap();

    let mut turns = 0;
    let mut driver = |_: &Encounter<'_>| {
        turns += 1;
        if turns == 1 {
            CombatAction::Attack
        } else {
            CombatAction::Flee
        }
    };
    let (outcome, events) = run_encounter(&mut encounter, &mut dice, &mut driver);
    assert_eq!(outcome, CombatOutcome::Fled);
    assert_eq!(events.last(), Some(&CombatEvent::Fled));
    assert!(encounter
        .apply_action(CombatAction::Attack, &mut dice)
        .is_err());
}

// ============================================================================
// Extreme and dangling data
// ============================================================================

#[test]
fn test_huge_wisdom_does_not_overflow_insight() {
    let registry = registry();
    let mut player = Player::new("Ayla");
    player.skills.set(Skill::Wisdom, 2_000_000_000);

    // insight roll, then an attack die of 1 with the bonus applied
    let mut dice = ScriptedDice::new([100, 1]);
    let mut encounter = Encounter::begin(&mut player, &registry, "Brute", &mut dice).unwrap();
    assert!(encounter.insight_ready());
    let turn = encounter.apply_action(CombatAction::Attack, &mut dice).unwrap();
    assert_eq!(turn.outcome, Some(CombatOutcome::Victory));
}

#[test]
fn test_huge_enemy_attack_saturates() {
    let registry = load_from_str(
        "{}",
        r#"{"Titan": {"hp": 50, "attack": 2147483647}}"#,
        "{}",
    )
    .unwrap();
    let mut player = Player::new("Ayla");
    player.skills.set(Skill::Agility, 0);

    // insight miss, attack die 1, no dodge, variance +2
    let mut dice = ScriptedDice::new([100, 1, 100, 2]);
    let mut encounter = Encounter::begin(&mut player, &registry, "Titan", &mut dice).unwrap();
    let turn = encounter.apply_action(CombatAction::Attack, &mut dice).unwrap();
    drop(encounter);

    assert!(turn.events.contains(&CombatEvent::EnemyAttack { damage: i32::MAX }));
    assert_eq!(turn.outcome, Some(CombatOutcome::Defeat));
    assert_eq!(player.hp, 0);
}

#[test]
fn test_unknown_drop_is_skipped() {
    let registry = load_from_str(
        r#"{"Pelt": {"value": 4}}"#,
        r#"{"Wraith": {"hp": 1, "attack": 1, "silver_drop": [2, 2],
                       "drops": [{"item": "Ectoplasm", "chance": 100},
                                 {"item": "Pelt", "chance": 100}]}}"#,
        "{}",
    )
    .unwrap();
    let mut player = Player::new("Ayla");

    // insight miss, attack die 1, silver, both drop rolls
    let mut dice = ScriptedDice::new([100, 1, 2, 1, 1]);
    let mut encounter = Encounter::begin(&mut player, &registry, "Wraith", &mut dice).unwrap();
    let turn = encounter.apply_action(CombatAction::Attack, &mut dice).unwrap();
    drop(encounter);

    assert_eq!(
        turn.events.last(),
        Some(&CombatEvent::EnemyDefeated {
            enemy: "Wraith".into(),
            silver: 2,
            items: vec!["Pelt".into()],
        })
    );
    assert_eq!(player.silver, 2);
    assert_eq!(player.kills("Wraith"), 1);
    assert!(player.has_item("Pelt"));
    assert!(!player.has_item("Ectoplasm"));
}
