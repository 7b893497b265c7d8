//! Game loop thread: runs the simulation engine at a fixed rate.
//!
//! The engine lives inside the thread. Commands arrive through an `mpsc`
//! channel; every iteration ticks once, hands the snapshot to the render
//! hooks and stores it for polling. Completed waves and finished runs are
//! autosaved, and a finished run submits its score to the leaderboard.

use std::ops::ControlFlow;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use ramparts_core::constants::TICK_RATE;
use ramparts_core::enums::GamePhase;
use ramparts_core::events::GameEvent;
use ramparts_core::hooks::{LeaderboardHook, RenderHook};
use ramparts_core::state::GameStateSnapshot;
use ramparts_persistence::save_load::AUTOSAVE_SLOT;
use ramparts_persistence::{BlobStore, Leaderboard, SaveSlots};
use ramparts_sim::{SimConfig, SimulationEngine};

use crate::state::{GameHandle, GameLoopCommand};

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

pub type BoxedRenderHook = Box<dyn RenderHook + Send>;

/// One run plus everything observing it.
pub struct GameSession<S: BlobStore> {
    config: SimConfig,
    engine: SimulationEngine,
    render_hooks: Vec<BoxedRenderHook>,
    slots: SaveSlots<S>,
    leaderboard: Leaderboard<S>,
    player: String,
    /// The current run's end has already been handled.
    finished: bool,
}

impl<S: BlobStore> GameSession<S> {
    pub fn new(config: SimConfig, slots: SaveSlots<S>, leaderboard: Leaderboard<S>, player: impl Into<String>) -> Self {
        Self {
            engine: SimulationEngine::new(config.clone()),
            config,
            render_hooks: Vec::new(),
            slots,
            leaderboard,
            player: player.into(),
            finished: false,
        }
    }

    pub fn add_render_hook(&mut self, hook: BoxedRenderHook) {
        self.render_hooks.push(hook);
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn slots(&self) -> &SaveSlots<S> {
        &self.slots
    }

    pub fn leaderboard(&self) -> &Leaderboard<S> {
        &self.leaderboard
    }

    /// Apply a loop command. Breaks on shutdown.
    pub fn handle(&mut self, command: GameLoopCommand) -> ControlFlow<()> {
        match command {
            GameLoopCommand::PlayerCommand(command) => self.engine.queue_command(command),
            GameLoopCommand::Save { slot } => {
                if let Err(error) = self.slots.save(&slot, &self.engine) {
                    tracing::warn!(%slot, %error, "save failed");
                }
            }
            GameLoopCommand::Load { slot } => match self.slots.load(&slot, self.config.clone()) {
                Ok(engine) => {
                    self.finished = engine.phase().is_over();
                    self.engine = engine;
                }
                Err(error) => tracing::warn!(%slot, %error, "load failed"),
            },
            GameLoopCommand::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Tick once, persist milestones and notify render hooks.
    pub fn step(&mut self) -> GameStateSnapshot {
        let snapshot = self.engine.tick();

        if !snapshot.phase.is_over() {
            self.finished = false;
        }
        let wave_completed = snapshot
            .events
            .iter()
            .any(|event| matches!(event, GameEvent::WaveCompleted { .. }));
        let run_ended = snapshot.phase.is_over() && !self.finished;

        if wave_completed || run_ended {
            if let Err(error) = self.slots.save(AUTOSAVE_SLOT, &self.engine) {
                tracing::warn!(%error, "autosave failed");
            }
        }
        if run_ended {
            self.finished = true;
            let run = &snapshot.run;
            let wave = final_wave(snapshot.phase, run.current_wave, self.engine.config().waves.len());
            if let Err(error) = self.leaderboard.submit_score(&self.player, run.score, wave) {
                tracing::warn!(%error, "score submission failed");
            }
            tracing::info!(
                phase = ?snapshot.phase,
                score = run.score,
                kills = run.enemies_killed,
                leaks = run.enemies_leaked,
                towers = run.towers_built,
                "run_finished"
            );
        }

        for hook in &mut self.render_hooks {
            hook.render(&snapshot);
        }
        snapshot
    }
}

/// Wave recorded on the leaderboard: the last wave cleared on victory, the
/// last one survived on defeat.
fn final_wave(phase: GamePhase, current_wave: u32, total_waves: usize) -> u32 {
    let total = u32::try_from(total_waves).unwrap_or(u32::MAX);
    match phase {
        GamePhase::Victory => current_wave.min(total),
        _ => current_wave.saturating_sub(1),
    }
}

/// Loop pacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopOptions {
    /// Sleep to hold the nominal tick rate; otherwise run flat out.
    pub realtime: bool,
    /// Stop after this many iterations.
    pub max_ticks: Option<u64>,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            realtime: true,
            max_ticks: None,
        }
    }
}

/// Spawn the game loop on a named thread.
pub fn spawn_game_loop<S>(session: GameSession<S>, options: LoopOptions) -> std::io::Result<GameHandle>
where
    S: BlobStore + Send + 'static,
{
    let (command_tx, command_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("ramparts-game-loop".into())
        .spawn(move || run_game_loop(session, command_rx, &shared, options))?;

    Ok(GameHandle {
        command_tx,
        latest_snapshot,
        thread: Some(thread),
    })
}

/// Runs until Shutdown, channel disconnect or the tick limit.
fn run_game_loop<S: BlobStore>(
    mut session: GameSession<S>,
    command_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    options: LoopOptions,
) {
    let mut next_tick_time = Instant::now();
    let mut ticks = 0u64;
    tracing::info!(seed = session.config.seed, realtime = options.realtime, "game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match command_rx.try_recv() {
                Ok(command) => {
                    if session.handle(command).is_break() {
                        tracing::info!(ticks, "game loop shut down");
                        return;
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (the engine handles pause and game over)
        let snapshot = session.step();
        ticks += 1;

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if options.max_ticks.is_some_and(|max| ticks >= max) {
            tracing::info!(ticks, "tick limit reached");
            return;
        }

        // 4. Sleep until the next tick
        if options.realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind; resync instead of catching up.
                next_tick_time = now;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ramparts_core::commands::PlayerCommand;
    use ramparts_core::enums::{EnemyKind, TowerKind};
    use ramparts_persistence::MemoryStore;
    use ramparts_sim::wave::WaveDef;

    use crate::render::RecordingRenderHook;

    fn session(config: SimConfig) -> GameSession<MemoryStore> {
        GameSession::new(
            config,
            SaveSlots::new(MemoryStore::new()),
            Leaderboard::new(MemoryStore::new()),
            "tester",
        )
    }

    fn one_goblin() -> SimConfig {
        SimConfig {
            starting_gold: 1_000,
            waves: vec![WaveDef::new(&[(EnemyKind::Goblin, 1)])],
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartWave)).unwrap();
        tx.send(GameLoopCommand::Save { slot: "a".into() }).unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartWave)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_render_hooks_see_paused_frames() {
        let mut session = session(SimConfig::default());
        let recorder = RecordingRenderHook::new();
        session.add_render_hook(Box::new(recorder.clone()));

        let _ = session.handle(GameLoopCommand::PlayerCommand(PlayerCommand::Pause));
        session.step();
        session.step();

        let frames = recorder.frames();
        assert_eq!(frames.len(), 2);
        assert!(frames.iter().all(|f| f.phase == GamePhase::Paused));
        assert!(frames.iter().all(|f| f.time.tick == 0));
    }

    #[test]
    fn test_victory_autosaves_and_submits_score() {
        let mut session = session(one_goblin());
        let _ = session.handle(GameLoopCommand::PlayerCommand(PlayerCommand::PlaceTower {
            kind: TowerKind::Sniper,
            x: 100.0,
            y: 250.0,
        }));
        let _ = session.handle(GameLoopCommand::PlayerCommand(PlayerCommand::StartWave));

        let mut phase = GamePhase::Playing;
        for _ in 0..3_600 {
            phase = session.step().phase;
            if phase.is_over() {
                break;
            }
        }
        assert_eq!(phase, GamePhase::Victory);
        assert_eq!(session.slots().store().keys(), vec![AUTOSAVE_SLOT.to_string()]);

        let top = session.leaderboard().fetch_top(10);
        let entry = top.iter().find(|e| e.player == "tester").unwrap();
        assert_eq!(entry.score, session.engine().run_state().score);
        assert_eq!(session.engine().run_state().current_wave, 2);
        assert_eq!(entry.wave, 1);

        // The end of a run is handled once.
        session.step();
        assert_eq!(session.leaderboard().entries().len(), 4);
    }

    #[test]
    fn test_defeat_submits_last_survived_wave() {
        let mut session = session(SimConfig {
            waves: vec![WaveDef::new(&[(EnemyKind::Goblin, 10)])],
            ..SimConfig::default()
        });
        let _ = session.handle(GameLoopCommand::PlayerCommand(PlayerCommand::StartWave));

        let mut phase = GamePhase::Playing;
        for _ in 0..3_600 {
            phase = session.step().phase;
            if phase.is_over() {
                break;
            }
        }
        assert_eq!(phase, GamePhase::Defeat);
        let top = session.leaderboard().fetch_top(10);
        let entry = top.iter().find(|e| e.player == "tester").unwrap();
        assert_eq!(entry.wave, 0);
    }

    #[test]
    fn test_final_wave_is_capped_at_table_length() {
        assert_eq!(final_wave(GamePhase::Victory, 9, 8), 8);
        assert_eq!(final_wave(GamePhase::Victory, 3, 8), 3);
        assert_eq!(final_wave(GamePhase::Defeat, 4, 8), 3);
        assert_eq!(final_wave(GamePhase::Defeat, 0, 8), 0);
    }

    #[test]
    fn test_save_and_load_commands() {
        let mut session = session(SimConfig::default());
        let _ = session.handle(GameLoopCommand::PlayerCommand(PlayerCommand::PlaceTower {
            kind: TowerKind::Basic,
            x: 100.0,
            y: 200.0,
        }));
        session.step();
        let _ = session.handle(GameLoopCommand::Save { slot: "one".into() });
        let _ = session.handle(GameLoopCommand::PlayerCommand(PlayerCommand::Restart));
        assert!(session.step().towers.is_empty());

        let _ = session.handle(GameLoopCommand::Load { slot: "one".into() });
        assert_eq!(session.step().towers.len(), 1);
        assert!(session.handle(GameLoopCommand::Shutdown).is_break());
    }

    #[test]
    fn test_loop_thread_stops_on_shutdown() {
        let handle = spawn_game_loop(
            session(SimConfig::default()),
            LoopOptions {
                realtime: false,
                max_ticks: None,
            },
        )
        .unwrap();
        handle.send_player(PlayerCommand::StartWave);

        let deadline = Instant::now() + Duration::from_secs(5);
        while handle
            .latest_snapshot()
            .map_or(true, |s| s.time.tick < 10)
        {
            assert!(Instant::now() < deadline, "loop produced no snapshots");
            std::thread::sleep(Duration::from_millis(1));
        }
        assert!(handle.is_running());
        handle.shutdown();
    }

    #[test]
    fn test_tick_limit_ends_loop() {
        let handle = spawn_game_loop(
            session(SimConfig::default()),
            LoopOptions {
                realtime: false,
                max_ticks: Some(25),
            },
        )
        .unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while handle.is_running() {
            assert!(Instant::now() < deadline);
            std::thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(handle.latest_snapshot().unwrap().time.tick, 25);
        handle.shutdown();
    }

    #[test]
    fn test_tick_duration_constant() {
        assert_eq!(TICK_DURATION.as_nanos(), (1_000_000_000u64 / 60) as u128);
    }
}
