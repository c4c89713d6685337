mod common;

use std::collections::BTreeSet;

use common::Fixture;
use game_core::{
    GameEvent, ProgressionError, Scene, ShopError, SlotError, Trade, experience_to_next_level,
};

const BASIC: [&str; 3] = ["iceShard", "quick", "double"];
const INTERMEDIATE: [&str; 3] = ["power", "haste", "regen"];

#[test]
fn test_level_up_applies_fixed_increases() {
    let fx = Fixture::new();
    let mut session = fx.session();
    session.player.experience = 100;
    session.player.hp = 10;

    let mut engine = fx.engine(&mut session);
    assert!(engine.check_level_up());
    assert!(!engine.check_level_up());
    drop(engine);

    let player = &session.player;
    assert_eq!(player.level, 2);
    assert_eq!(player.experience, 0);
    assert_eq!((player.max_hp, player.hp), (120, 120));
    assert_eq!((player.max_mp, player.mp), (60, 60));
    assert_eq!(player.speed, 13);
    assert_eq!(player.spells.len(), 3);

    let events = session.drain_events();
    assert!(events.contains(&GameEvent::LevelUp {
        old_level: 1,
        new_level: 2,
        hp_increase: 20,
        mp_increase: 10,
        speed_increase: 1,
    }));
    let Some(GameEvent::RuneChoice { choices }) = events.last() else {
        panic!("expected a rune choice, got {events:?}");
    };
    let offered: BTreeSet<&str> = choices.iter().map(String::as_str).collect();
    assert_eq!(offered, BASIC.into_iter().collect());
    assert_eq!(&session.pending_rune_choices, choices);
}

#[test]
fn test_surplus_experience_grants_one_level_per_check() {
    let fx = Fixture::new();
    let mut session = fx.session();
    session.player.experience = 1_000;

    let mut engine = fx.engine(&mut session);
    assert!(engine.check_level_up());
    assert_eq!(engine.session().player.level, 2);
    assert_eq!(engine.session().player.experience, 900);

    assert!(engine.check_level_up());
    assert_eq!(engine.session().player.level, 3);
    assert_eq!(
        engine.session().player.experience,
        900 - experience_to_next_level(2)
    );
    // every third level adds an empty slot
    assert_eq!(engine.session().player.spells.len(), 4);
    assert!(engine.session().player.spells[3].is_empty());
}

#[test]
fn test_victory_experience_triggers_level_up() {
    let fx = Fixture::new();
    let mut session = fx.session();
    session.player.experience = 80;

    let mut engine = fx.engine(&mut session);
    engine.start_battle(Some("wolf")).unwrap();
    engine.end_battle(true).unwrap();
    drop(engine);

    assert_eq!(session.player.level, 2);
    assert_eq!(session.player.experience, 0);
    let kinds: Vec<&'static str> = session.drain_events().iter().map(GameEvent::name).collect();
    let level_up = kinds.iter().position(|name| *name == "LevelUp").unwrap();
    let battle_end = kinds.iter().position(|name| *name == "BattleEnd").unwrap();
    assert!(level_up < battle_end);
}

#[test]
fn test_offers_respect_tier_levels() {
    let fx = Fixture::new();
    for level in 1..5 {
        let mut session = fx.session();
        session.player.level = level;
        let choices = fx.engine(&mut session).offer_rune_choice();
        assert_eq!(choices.len(), 3);
        assert!(choices.iter().all(|id| BASIC.contains(&id.as_str())));
    }

    let mut session = fx.session();
    session.player.level = 5;
    session.player.unlocked_runes.extend(BASIC.map(String::from));
    let choices = fx.engine(&mut session).offer_rune_choice();
    let offered: BTreeSet<&str> = choices.iter().map(String::as_str).collect();
    assert_eq!(offered, INTERMEDIATE.into_iter().collect());

    let mut session = fx.session();
    session.player.level = 10;
    let choices = fx.engine(&mut session).offer_rune_choice();
    assert_eq!(choices.len(), 3);
    let unique: BTreeSet<&String> = choices.iter().collect();
    assert_eq!(unique.len(), 3);
    assert!(choices.iter().all(|id| fx.runes[id].tier.is_some()));
}

#[test]
fn test_exhausted_pool_offers_nothing() {
    let fx = Fixture::new();
    let mut session = fx.session();
    session.player.unlocked_runes.extend(BASIC.map(String::from));
    session.pending_rune_choices = vec!["stale".to_string()];

    let choices = fx.engine(&mut session).offer_rune_choice();
    assert!(choices.is_empty());
    assert!(session.pending_rune_choices.is_empty());
    assert_eq!(
        session.log.last().unwrap().message,
        "All available runes are already unlocked!"
    );
    assert!(session.pending_events().is_empty());
}

#[test]
fn test_choose_rune() {
    let fx = Fixture::new();
    let mut session = fx.session();
    session.player.experience = 100;

    let mut engine = fx.engine(&mut session);
    engine.check_level_up();
    assert_eq!(
        engine.choose_rune("firebolt"),
        Err(ProgressionError::AlreadyUnlocked("firebolt".to_string()))
    );
    assert_eq!(
        engine.choose_rune("nope"),
        Err(ProgressionError::UnknownRune("nope".to_string()))
    );
    assert_eq!(engine.session().pending_rune_choices.len(), 3);

    engine.choose_rune("quick").unwrap();
    assert!(engine.session().player.has_unlocked("quick"));
    assert!(engine.session().pending_rune_choices.is_empty());
    assert_eq!(
        engine.choose_rune("quick"),
        Err(ProgressionError::AlreadyUnlocked("quick".to_string()))
    );
}

#[test]
fn test_shop_round_trip() {
    let fx = Fixture::new();
    let mut session = fx.session();
    session.player.gold = 20;

    let mut engine = fx.engine(&mut session);
    assert_eq!(engine.buy_material("wolfPelt", 2), Ok(15));
    assert_eq!(engine.session().player.gold, 5);
    assert_eq!(engine.session().player.material_count("wolfPelt"), 2);

    assert_eq!(
        engine.buy_material("wolfPelt", 1),
        Err(ShopError::InsufficientGold { cost: 8, gold: 5 })
    );
    assert_eq!(
        engine.buy_material("dragonScale", 1),
        Err(ShopError::UnknownMaterial("dragonScale".to_string()))
    );

    assert_eq!(engine.sell_material("wolfPelt", 2), Ok(8));
    assert_eq!(engine.session().player.gold, 13);
    assert!(!engine.session().player.materials.contains_key("wolfPelt"));
    assert_eq!(
        engine.sell_material("wolfPelt", 1),
        Err(ShopError::InsufficientMaterials {
            material_id: "wolfPelt".to_string(),
            wanted: 1,
            held: 0,
        })
    );
    drop(engine);

    let events = session.drain_events();
    assert_eq!(
        events.last(),
        Some(&GameEvent::ShopUpdate {
            trade: Trade::Sell,
            material_id: "wolfPelt".to_string(),
            quantity: 2,
            gold: 8,
        })
    );
}

#[test]
fn test_rest_restores_resources() {
    let fx = Fixture::new();
    let mut session = fx.session();
    session.player.hp = 1;
    session.player.mp = 0;
    fx.engine(&mut session).rest();
    assert_eq!(session.player.hp, session.player.max_hp);
    assert_eq!(session.player.mp, session.player.max_mp);
}

#[test]
fn test_spell_slot_editing() {
    let fx = Fixture::new();
    let mut session = fx.session();
    let mut engine = fx.engine(&mut session);

    engine
        .update_spell_slot(0, vec!["amp".to_string(), "amp".to_string()])
        .unwrap();
    engine.add_rune_to_slot(0, "firebolt").unwrap();
    assert_eq!(engine.session().player.spells[0], ["amp", "amp", "firebolt"]);

    let chain = engine.session().player.spells[0].clone();
    let spell = engine.calculate_spell(&chain);
    assert_eq!(spell.damage, 56);

    assert_eq!(engine.remove_rune_from_slot(0, 1), Ok("amp".to_string()));
    assert_eq!(
        engine.remove_rune_from_slot(0, 5),
        Err(SlotError::RuneOutOfRange {
            slot: 0,
            index: 5,
            len: 2
        })
    );
    assert_eq!(
        engine.add_rune_to_slot(7, "heal"),
        Err(SlotError::SlotOutOfRange { index: 7, len: 3 })
    );
    drop(engine);

    let events = session.drain_events();
    assert_eq!(
        events.last(),
        Some(&GameEvent::SpellSlotUpdated {
            slot: 0,
            runes: vec!["amp".to_string(), "firebolt".to_string()],
        })
    );
}

#[test]
fn test_restart_resets_everything_but_the_log() {
    let fx = Fixture::new();
    let mut session = fx.session();
    session.player.gold = 500;
    session.player.level = 7;

    let mut engine = fx.engine(&mut session);
    engine.start_battle(Some("goblin")).unwrap();
    let battle_id = engine.session().battle_id();
    engine.restart_game();
    drop(engine);

    assert_eq!(session.player, game_core::Player::starting());
    assert!(session.enemy.is_none());
    assert!(!session.battle.active);
    assert_eq!(session.scene, Scene::Camp);
    assert!(session.battle_id() > battle_id);
    assert_eq!(session.log.last().unwrap().message, "Game restarted!");
    assert_eq!(session.log.len(), 2);
    assert_eq!(session.drain_events().last(), Some(&GameEvent::GameRestart));
}
