//! Headless demo: builds a fixed defense, plays every wave as soon as the
//! previous one clears, and reports the final result.

use std::time::Duration;

use ramparts_app::bootstrap;
use ramparts_app::game_loop::{spawn_game_loop, GameSession, LoopOptions};
use ramparts_app::render::LogRenderHook;
use ramparts_core::commands::PlayerCommand;
use ramparts_core::enums::{EnemyKind, GamePhase, TowerKind, WaveStatus};
use ramparts_persistence::{FileStore, Leaderboard, SaveSlots};

const OPENING_BUILD: [(TowerKind, f64, f64); 4] = [
    (TowerKind::Basic, 100.0, 250.0),
    (TowerKind::Basic, 150.0, 200.0),
    (TowerKind::Fast, 300.0, 200.0),
    (TowerKind::Basic, 450.0, 300.0),
];

const LATER_BUILD: [(TowerKind, f64, f64); 4] = [
    (TowerKind::Sniper, 300.0, 400.0),
    (TowerKind::Strong, 500.0, 400.0),
    (TowerKind::Sniper, 550.0, 300.0),
    (TowerKind::Strong, 700.0, 250.0),
];

fn main() {
    bootstrap::init_tracing();
    tracing::info!("=== RAMPARTS headless demo ===");
    log_catalogue();

    let mut config = bootstrap::load_config();
    // The scripted player is impatient.
    config.time_scale = config.time_scale.max(4.0);
    let store = FileStore::new(bootstrap::data_dir());
    let capacity = config.leaderboard_capacity;
    let mut session = GameSession::new(
        config,
        SaveSlots::new(store.clone()),
        Leaderboard::with_capacity(store.clone(), capacity),
        "demo",
    );
    session.add_render_hook(Box::new(LogRenderHook::new(600)));

    let handle = match spawn_game_loop(
        session,
        LoopOptions {
            realtime: false,
            max_ticks: Some(500_000),
        },
    ) {
        Ok(handle) => handle,
        Err(error) => {
            tracing::error!(%error, "could not start game loop");
            std::process::exit(1);
        }
    };

    for (kind, x, y) in OPENING_BUILD {
        handle.send_player(PlayerCommand::PlaceTower { kind, x, y });
    }

    let mut pending_build = LATER_BUILD.iter().peekable();
    let mut requested_wave = 0;
    let mut final_snapshot = None;
    while handle.is_running() {
        std::thread::sleep(Duration::from_millis(2));
        let Some(snapshot) = handle.latest_snapshot() else {
            continue;
        };
        if snapshot.phase.is_over() {
            final_snapshot = Some(snapshot);
            break;
        }
        if snapshot.phase != GamePhase::Playing
            || snapshot.wave.status != WaveStatus::Idle
            || snapshot.run.current_wave <= requested_wave
            || snapshot.run.towers_built < OPENING_BUILD.len() as u32
        {
            continue;
        }

        // Spend savings between waves, then send the next one.
        let mut budget = snapshot.run.gold;
        if let Some(&&(kind, x, y)) = pending_build.peek() {
            if budget >= kind.stats().cost {
                budget -= kind.stats().cost;
                pending_build.next();
                handle.send_player(PlayerCommand::PlaceTower { kind, x, y });
            }
        }
        for tower in &snapshot.towers {
            if let Some(cost) = tower.upgrade_cost.filter(|cost| *cost <= budget) {
                budget -= cost;
                handle.send_player(PlayerCommand::UpgradeTower { tower: tower.id });
            }
        }
        requested_wave = snapshot.run.current_wave;
        handle.send_player(PlayerCommand::StartWave);
    }
    handle.shutdown();

    match final_snapshot {
        Some(snapshot) => {
            tracing::info!(
                phase = ?snapshot.phase,
                wave = snapshot.run.current_wave,
                score = snapshot.run.score,
                "demo finished"
            );
            match serde_json::to_string_pretty(&snapshot.run) {
                Ok(json) => println!("{json}"),
                Err(error) => tracing::warn!(%error, "could not encode final state"),
            }
        }
        None => tracing::warn!("demo stopped before the run ended"),
    }

    let leaderboard = Leaderboard::with_capacity(store, capacity);
    for (rank, entry) in leaderboard.entries().iter().enumerate() {
        tracing::info!(rank = rank + 1, player = %entry.player, score = entry.score, wave = entry.wave, "leaderboard");
    }
}

fn log_catalogue() {
    for kind in TowerKind::ALL {
        let stats = kind.stats();
        tracing::info!(
            kind = kind.as_str(),
            cost = stats.cost,
            damage = stats.damage,
            range = stats.range,
            interval_ms = stats.fire_interval_ms,
            "tower"
        );
    }
    for kind in EnemyKind::ALL {
        let stats = kind.stats();
        tracing::info!(
            kind = kind.as_str(),
            health = stats.health,
            speed = stats.speed,
            reward = stats.reward,
            "enemy"
        );
    }
}
