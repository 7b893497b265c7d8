//! Whole-run scenarios driven only through the public engine API.

use ramparts_sim::core::commands::PlayerCommand;
use ramparts_sim::core::enums::{GamePhase, TowerKind, WaveStatus};
use ramparts_sim::core::events::GameEvent;
use ramparts_sim::core::save::SaveData;
use ramparts_sim::core::types::Point;
use ramparts_sim::{SimConfig, SimulationEngine};

const DEFENSE: [(TowerKind, f64, f64); 8] = [
    (TowerKind::Sniper, 100.0, 250.0),
    (TowerKind::Sniper, 150.0, 200.0),
    (TowerKind::Strong, 300.0, 200.0),
    (TowerKind::Fast, 300.0, 400.0),
    (TowerKind::Strong, 500.0, 400.0),
    (TowerKind::Fast, 450.0, 300.0),
    (TowerKind::Sniper, 550.0, 300.0),
    (TowerKind::Sniper, 700.0, 250.0),
];

fn defended_engine(seed: u64) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        starting_gold: 5_000,
        time_scale: 4.0,
        ..SimConfig::default()
    });
    engine.queue_commands(DEFENSE.iter().map(|&(kind, x, y)| PlayerCommand::PlaceTower { kind, x, y }));
    engine
}

#[test]
fn test_full_campaign_keeps_bookkeeping_consistent() {
    let mut engine = defended_engine(7);
    let mut spawned = 0u32;
    let mut bonuses = Vec::new();

    for _ in 0..20_000 {
        if engine.wave_status() == WaveStatus::Idle && engine.phase() == GamePhase::Playing {
            engine.queue_command(PlayerCommand::StartWave);
        }
        let snapshot = engine.tick();
        assert!(snapshot.alerts.is_empty(), "unexpected alerts: {:?}", snapshot.alerts);

        for event in &snapshot.events {
            match event {
                GameEvent::EnemySpawned { .. } => spawned += 1,
                GameEvent::WaveCompleted { wave, bonus } => bonuses.push((*wave, *bonus)),
                _ => {}
            }
        }
        for enemy in &snapshot.enemies {
            assert!(enemy.health >= 1 && enemy.health <= enemy.max_health);
            assert!(enemy.progress >= 0.0 && enemy.progress <= 1.0);
        }
        let run = &snapshot.run;
        assert_eq!(
            run.enemies_killed + run.enemies_leaked + snapshot.enemies.len() as u32,
            spawned
        );
        assert!(run.lives <= 100);

        if snapshot.phase.is_over() {
            break;
        }
    }

    assert!(engine.phase().is_over(), "run did not finish");
    for (index, (wave, bonus)) in bonuses.iter().enumerate() {
        assert_eq!(*wave, index as u32 + 1);
        assert_eq!(*bonus, 20 + 5 * wave);
    }
    if engine.phase() == GamePhase::Victory {
        assert_eq!(bonuses.len(), 8);
        assert_eq!(engine.wave_status(), WaveStatus::Complete);
    }
}

#[test]
fn test_identical_inputs_replay_identically() {
    let play = |seed| {
        let mut engine = defended_engine(seed);
        engine.queue_command(PlayerCommand::StartWave);
        (0..2_000)
            .map(|_| serde_json::to_string(&engine.tick()).unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(play(99), play(99));
}

#[test]
fn test_save_blob_survives_json_round_trip_mid_wave() {
    let mut engine = defended_engine(3);
    engine.queue_command(PlayerCommand::StartWave);
    for _ in 0..40 {
        engine.tick();
    }
    let blob = serde_json::to_string(&engine.to_save_data()).unwrap();
    let data: SaveData = serde_json::from_str(&blob).unwrap();
    let mut restored = SimulationEngine::from_save_data(SimConfig::default(), &data);

    let original = engine.snapshot();
    let reloaded = restored.snapshot();
    assert_eq!(reloaded.run.gold, original.run.gold);
    assert_eq!(reloaded.towers.len(), DEFENSE.len());
    assert_eq!(reloaded.enemies.len(), original.enemies.len());
    assert_eq!(reloaded.wave.pending_spawns, original.wave.pending_spawns);

    // The restored run keeps playing to the end of the wave.
    let mut completed = false;
    for _ in 0..10_000 {
        let snapshot = restored.tick();
        if snapshot
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::WaveCompleted { wave: 1, .. }))
        {
            completed = true;
            break;
        }
    }
    assert!(completed);
}

#[test]
fn test_placement_preview_matches_placement() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let spots = [
        Point::new(100.0, 250.0),
        Point::new(100.0, 300.0),
        Point::new(5.0, 5.0),
        Point::new(110.0, 250.0),
    ];
    for spot in spots {
        let preview = engine.can_place(TowerKind::Basic, spot);
        let placed = engine.place_tower(TowerKind::Basic, spot);
        assert_eq!(preview.is_ok(), placed.is_ok());
    }
    assert_eq!(engine.run_state().towers_built, 1);
}
