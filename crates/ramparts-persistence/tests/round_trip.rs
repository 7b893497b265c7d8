use ramparts_core::enums::TowerKind;
use ramparts_core::hooks::{LeaderboardHook, PersistenceHook};
use ramparts_core::types::Point;
use ramparts_persistence::{restore_or_fresh, FileStore, JsonPersistence, Leaderboard, SaveSlots};
use ramparts_sim::{SimConfig, SimulationEngine};

#[test]
fn test_mid_wave_save_resumes_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut slots = SaveSlots::new(FileStore::new(dir.path()));

    let mut engine = SimulationEngine::new(SimConfig::with_seed(5));
    engine.place_tower(TowerKind::Basic, Point::new(100.0, 250.0)).unwrap();
    engine.start_wave().unwrap();
    for _ in 0..120 {
        engine.tick();
    }
    slots.save("midgame", &engine).unwrap();

    let mut loaded = slots.load("midgame", SimConfig::default()).unwrap();
    let before = engine.snapshot();
    let after = loaded.snapshot();
    assert_eq!(after.run, before.run);
    assert_eq!(after.enemies.len(), before.enemies.len());
    assert_eq!(after.wave.status, before.wave.status);
    assert!(after.alerts.is_empty());
}

#[test]
fn test_truncated_blob_recovers_to_new_run() {
    let engine = SimulationEngine::new(SimConfig::default());
    let codec = JsonPersistence::default();
    let blob = codec.serialize(&engine.to_save_data()).unwrap();
    let truncated = &blob[..blob.len() / 2];

    let mut recovered = restore_or_fresh(&codec, truncated, SimConfig::default());
    let snapshot = recovered.snapshot();
    assert_eq!(snapshot.run.current_wave, 1);
    assert_eq!(snapshot.alerts.len(), 1);
}

#[test]
fn test_final_score_lands_on_leaderboard() {
    let dir = tempfile::tempdir().unwrap();
    let mut board = Leaderboard::new(FileStore::new(dir.path()));
    board.submit_score("player", 4000, 7).unwrap();
    let top = board.fetch_top(3);
    assert_eq!(top[1].player, "player");
    assert_eq!(top[1].wave, 7);
}
