use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use game_core::{
    CastError, GameEvent, GameEventKind, ManualClock, Player, SaveData, Scene,
};
use runtime::{
    InMemorySaveRepository, OracleManager, Runtime, RuntimeConfig, RuntimeError, SaveRepository,
    Topic,
};

const START_MS: u64 = 1_700_000_000_000;

fn oracles() -> OracleManager {
    OracleManager::builtin()
        .expect("bundled content parses")
        .with_clock(Arc::new(ManualClock::new(START_MS)))
}

fn config() -> RuntimeConfig {
    RuntimeConfig {
        seed: Some(7),
        ..RuntimeConfig::default()
    }
}

async fn runtime() -> Runtime {
    Runtime::builder()
        .config(config())
        .oracles(oracles())
        .build()
        .await
        .expect("runtime builds")
}

#[tokio::test(start_paused = true)]
async fn test_victory_returns_to_camp_after_delay() {
    let runtime = runtime().await;
    let handle = runtime.handle();

    handle.start_battle(Some("wolf")).await.unwrap();
    handle.end_battle(true).await.unwrap();

    let session = handle.query_session().await.unwrap();
    assert_eq!(session.scene, Scene::Battle);
    assert!(!session.battle.active);
    assert_eq!(session.player.gold, 12);
    assert_eq!(session.player.experience, 20);

    tokio::time::sleep(Duration::from_millis(1_999)).await;
    assert_eq!(handle.query_session().await.unwrap().scene, Scene::Battle);

    tokio::time::sleep(Duration::from_millis(2)).await;
    let session = handle.query_session().await.unwrap();
    assert_eq!(session.scene, Scene::Camp);
    assert!(session.enemy.is_none());

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_stale_camp_return_does_not_clear_new_battle() {
    let runtime = runtime().await;
    let handle = runtime.handle();

    handle.start_battle(Some("wolf")).await.unwrap();
    handle.end_battle(false).await.unwrap();
    handle.start_battle(Some("goblin")).await.unwrap();

    tokio::time::sleep(Duration::from_millis(2_500)).await;

    let session = handle.query_session().await.unwrap();
    assert_eq!(session.scene, Scene::Battle);
    assert!(session.battle.active);
    assert_eq!(session.enemy.map(|enemy| enemy.id), Some("goblin".to_string()));
}

#[tokio::test]
async fn test_retreat_twice_reports_inactive_battle() {
    let runtime = runtime().await;
    let handle = runtime.handle();

    handle.start_battle(None).await.unwrap();
    handle.retreat().await.unwrap();
    let err = handle.retreat().await.unwrap_err();
    assert_eq!(err.error_code(), "BATTLE_NOT_ACTIVE");

    let session = handle.query_session().await.unwrap();
    assert_eq!(session.scene, Scene::Camp);
    assert_eq!(session.battle.focus_value, 20);
}

#[tokio::test]
async fn test_cast_rejection_maps_to_runtime_error() {
    let runtime = runtime().await;
    let handle = runtime.handle();

    let err = handle.start_cast(0).await.unwrap_err();
    assert!(matches!(err, RuntimeError::Cast(CastError::BattleInactive)));

    handle.start_battle(Some("wolf")).await.unwrap();
    let err = handle.start_cast(0).await.unwrap_err();
    assert!(matches!(err, RuntimeError::Cast(CastError::NotPlayerTurn)));

    let err = handle.buy_material("dragonScale", 1).await.unwrap_err();
    assert_eq!(err.error_code(), "SHOP_UNKNOWN_MATERIAL");
}

#[tokio::test]
async fn test_listener_panic_does_not_stop_others() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let runtime = Runtime::builder()
        .config(config())
        .oracles(oracles())
        .listener(GameEventKind::BattleStart, |_| panic!("listener failure"))
        .listener(GameEventKind::BattleStart, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    handle.start_battle(Some("wolf")).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Worker is still serving commands.
    assert!(handle.query_session().await.unwrap().battle.active);
}

#[tokio::test]
async fn test_listeners_added_and_removed_through_handle() {
    let runtime = runtime().await;
    let handle = runtime.handle();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    let id = handle
        .add_listener(GameEventKind::GameRestart, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .await
        .unwrap();

    handle.restart_game().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert!(handle.remove_listener(id).await.unwrap());
    handle.restart_game().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_topic_subscribers_receive_their_events() {
    let runtime = runtime().await;
    let handle = runtime.handle();
    let mut session_rx = runtime.subscribe(Topic::Session);
    let mut receivers = handle.subscribe_multiple(&[Topic::Battle, Topic::Progression]);
    let mut battle_rx = receivers.remove(&Topic::Battle).unwrap();
    let mut progression_rx = receivers.remove(&Topic::Progression).unwrap();

    handle.start_battle(Some("wolf")).await.unwrap();
    let start = battle_rx.recv().await.unwrap();
    match start.payload {
        GameEvent::BattleStart { battle_id, ref enemy_id, .. } => {
            assert_eq!(enemy_id, "wolf");
            assert_eq!(battle_id, start.battle_id);
        }
        ref other => panic!("unexpected first battle event {other:?}"),
    }
    assert_eq!(start.timestamp, START_MS);

    let scene = session_rx.recv().await.unwrap();
    assert_eq!(scene.payload, GameEvent::SceneChange { scene: Scene::Battle });

    handle.end_battle(true).await.unwrap();
    let resources = loop {
        let event = progression_rx.recv().await.unwrap();
        if let GameEvent::ResourceChange { gold, experience, level } = event.payload {
            break (gold, experience, level);
        }
    };
    assert_eq!(resources, (12, 20, 1));

    let back = session_rx.recv().await.unwrap();
    assert_eq!(back.payload, GameEvent::SceneChange { scene: Scene::Camp });
}

#[tokio::test]
async fn test_queries_do_not_commit_rolls() {
    let runtime = runtime().await;
    let handle = runtime.handle();
    handle.start_battle(Some("ogre")).await.unwrap();

    let nonce = handle.query_session().await.unwrap().roll_nonce();
    let preview = handle.predict_atb(1.0).await.unwrap();
    assert!(preview.player > 0.0);
    assert!(preview.player > preview.enemy, "ogre is slower than the player");
    handle.will_cast_be_interrupted(1).await.unwrap();
    assert_eq!(handle.query_session().await.unwrap().roll_nonce(), nonce);

    let spell = handle
        .calculate_spell(vec!["amp".into(), "firebolt".into()])
        .await
        .unwrap();
    assert_eq!((spell.damage, spell.cost), (38, 13));
    assert_eq!(handle.cast_progress_percentage().await.unwrap(), 0.0);
    assert_eq!(handle.atb_progress_percentage(50.0).await.unwrap(), 50.0);

    let log = handle.battle_log().await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].timestamp, START_MS);
}

#[tokio::test]
async fn test_camp_actions_through_handle() {
    let runtime = runtime().await;
    let handle = runtime.handle();

    handle.update_spell_slot(2, vec!["amp".into()]).await.unwrap();
    handle.add_rune_to_slot(2, "heal").await.unwrap();
    assert_eq!(handle.remove_rune_from_slot(2, 0).await.unwrap(), "amp");
    let err = handle.remove_rune_from_slot(9, 0).await.unwrap_err();
    assert_eq!(err.error_code(), "SLOT_OUT_OF_RANGE");

    let err = handle.choose_rune("firebolt").await.unwrap_err();
    assert_eq!(err.error_code(), "PROGRESSION_ALREADY_UNLOCKED");

    let err = handle.sell_material("wolfPelt", 1).await.unwrap_err();
    assert_eq!(err.error_code(), "SHOP_INSUFFICIENT_MATERIALS");

    handle.rest().await.unwrap();
    let session = handle.query_session().await.unwrap();
    assert_eq!(session.player.spells[2], ["heal"]);
    assert_eq!(session.player.hp, session.player.max_hp);
}

#[tokio::test]
async fn test_save_and_load_round_trip() {
    let repository = Arc::new(InMemorySaveRepository::new());
    let runtime = Runtime::builder()
        .config(config())
        .oracles(oracles())
        .repository(repository.clone())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    assert!(!handle.has_save().await.unwrap());
    assert!(!handle.load().await.unwrap());

    handle.start_battle(Some("ogre")).await.unwrap();
    let save = handle.save().await.unwrap();
    assert!(save.is_mid_battle());
    assert!(repository.exists());

    handle.restart_game().await.unwrap();
    assert_eq!(handle.query_session().await.unwrap().scene, Scene::Camp);

    assert!(handle.load().await.unwrap());
    let session = handle.query_session().await.unwrap();
    assert_eq!(session.scene, Scene::Battle);
    assert!(session.battle.active);
    assert_eq!(session.enemy.map(|enemy| enemy.id), Some("ogre".to_string()));

    handle.delete_save().await.unwrap();
    assert!(!handle.has_save().await.unwrap());
}

#[tokio::test]
async fn test_save_without_repository_is_rejected() {
    let runtime = runtime().await;
    let err = runtime.handle().save().await.unwrap_err();
    assert!(matches!(err, RuntimeError::NoSaveRepository));
}

#[tokio::test]
async fn test_builder_restores_existing_save() {
    let mut player = Player::starting();
    player.level = 3;
    player.gold = 99;
    let repository = Arc::new(InMemorySaveRepository::with_save(SaveData {
        player,
        last_scene: Scene::Camp,
        timestamp: START_MS,
        enemy: None,
        battle: None,
    }));
    let scene_changes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&scene_changes);

    let runtime = Runtime::builder()
        .config(config())
        .oracles(oracles())
        .repository(repository)
        .restore_from_save(true)
        .listener(GameEventKind::SceneChange, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .build()
        .await
        .unwrap();

    let session = runtime.handle().query_session().await.unwrap();
    assert_eq!((session.player.level, session.player.gold), (3, 99));
    assert_eq!(scene_changes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_build_requires_oracles() {
    let err = Runtime::builder().build().await.err().unwrap();
    assert!(matches!(err, RuntimeError::MissingOracles));

    let runtime = Runtime::builder().builtin_content().unwrap().build().await;
    assert!(runtime.is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_auto_tick_advances_battle() {
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            tick_interval: Some(Duration::from_millis(100)),
            ..config()
        })
        .oracles(oracles())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    handle.start_battle(Some("wolf")).await.unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;

    let session = handle.query_session().await.unwrap();
    assert!(session.battle.active);
    assert!(session.player.hp < session.player.max_hp, "wolf acted on its own");
}
