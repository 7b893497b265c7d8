//! Simulation engine: the tick-by-tick core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world and the run state, applies
//! queued player commands at the tick boundary, runs all systems in a fixed
//! order, and produces `GameStateSnapshot`s. Completely headless.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ramparts_core::commands::PlayerCommand;
use ramparts_core::constants::MAX_TIME_SCALE;
use ramparts_core::enums::{AlertLevel, GamePhase, TowerKind, WaveStatus};
use ramparts_core::errors::CommandError;
use ramparts_core::events::{Alert, GameEvent};
use ramparts_core::save::{EnemyRecord, SaveData, TowerRecord, SAVE_VERSION};
use ramparts_core::state::{GameStateSnapshot, RunState};
use ramparts_core::types::{EntityId, Point, SimTime};

use crate::config::SimConfig;
use crate::economy::{self, Economy};
use crate::entities::{entity_from_id, entity_id, Enemy, Tower};
use crate::path::PathGeometry;
use crate::placement::PlacementRules;
use crate::systems;
use crate::wave::WaveDirector;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    world: World,
    path: PathGeometry,
    placement: PlacementRules,
    economy: Economy,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    run: RunState,
    waves: WaveDirector,
    next_spawn_order: u64,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
    alerts: Vec<Alert>,
}

impl SimulationEngine {
    /// Create a fresh run with the given config.
    pub fn new(config: SimConfig) -> Self {
        let path = config.path_geometry();
        if path.points() != config.path.as_slice() {
            tracing::warn!(points = config.path.len(), "configured path is degenerate, using default route");
        }
        let waves = WaveDirector::new(config.waves.clone(), config.spawn_interval_ms);
        // An empty wave table has nothing left to defend against.
        let phase = if waves.status() == WaveStatus::Complete {
            tracing::warn!("wave table is empty, run starts in victory");
            GamePhase::Victory
        } else {
            GamePhase::default()
        };
        Self {
            world: World::new(),
            placement: PlacementRules::from_config(&config),
            economy: Economy::from_config(&config),
            time: SimTime::default(),
            phase,
            time_scale: sanitize_time_scale(config.time_scale).unwrap_or(1.0),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            run: RunState::new(config.starting_gold, config.starting_lives),
            waves,
            next_spawn_order: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            alerts: Vec::new(),
            path,
            config,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one fixed tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.tick_for(self.config.tick_ms)
    }

    /// Advance by `dt_ms` milliseconds of wall time, scaled by the current
    /// time scale. Commands are applied first; while paused or after the run
    /// ended nothing advances, but a snapshot is still produced.
    pub fn tick_for(&mut self, dt_ms: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Playing {
            let scaled = dt_ms.max(0.0) * self.time_scale;
            self.time.advance(scaled);
            self.run_systems(scaled);
        }

        self.snapshot()
    }

    /// Snapshot of the current state. Drains pending events and alerts.
    pub fn snapshot(&mut self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.path,
            &self.time,
            self.phase,
            &self.run,
            &self.waves,
            std::mem::take(&mut self.events),
            std::mem::take(&mut self.alerts),
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    pub fn wave_status(&self) -> WaveStatus {
        self.waves.status()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn path(&self) -> &PathGeometry {
        &self.path
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Number of enemies currently on the field.
    pub fn live_enemy_count(&self) -> usize {
        self.world.query::<&Enemy>().iter().count()
    }

    /// Add an alert to the next snapshot.
    pub fn push_alert(&mut self, level: AlertLevel, message: impl Into<String>) {
        self.alerts.push(Alert {
            level,
            message: message.into(),
            tick: self.time.tick,
        });
    }

    // --- Direct operations ---

    /// Whether a tower of `kind` could be placed at `position` right now.
    /// Never mutates state.
    pub fn can_place(&self, kind: TowerKind, position: Point) -> Result<(), CommandError> {
        if self.phase.is_over() {
            return Err(CommandError::GameOver);
        }
        self.placement
            .validate(position, &self.path, self.tower_positions())?;
        let cost = kind.stats().cost;
        if self.run.gold < cost {
            return Err(CommandError::InsufficientGold {
                needed: cost,
                available: self.run.gold,
            });
        }
        Ok(())
    }

    /// Place a level-1 tower, paying its base cost.
    pub fn place_tower(&mut self, kind: TowerKind, position: Point) -> Result<EntityId, CommandError> {
        self.can_place(kind, position)?;
        economy::spend(&mut self.run, kind.stats().cost)?;
        let entity = world_setup::spawn_tower(&mut self.world, &mut self.next_spawn_order, kind, position);
        self.run.towers_built += 1;
        let id = entity_id(entity);
        tracing::info!(tower = %id, kind = kind.as_str(), x = position.x, y = position.y, gold = self.run.gold, "tower_placed");
        Ok(id)
    }

    /// Upgrade a tower by one level. Returns the new level.
    pub fn upgrade_tower(&mut self, id: EntityId) -> Result<u32, CommandError> {
        self.ensure_running()?;
        let entity = self.tower_entity(id)?;
        let mut tower = self
            .world
            .get::<&mut Tower>(entity)
            .map_err(|_| CommandError::TowerNotFound(id))?;
        let cost = tower.upgrade(&mut self.run.gold)?;
        let level = tower.level();
        tracing::info!(tower = %id, level, cost, gold = self.run.gold, "tower_upgraded");
        Ok(level)
    }

    /// Sell a tower for its refund value. Returns the gold credited.
    pub fn sell_tower(&mut self, id: EntityId) -> Result<u32, CommandError> {
        self.ensure_running()?;
        let entity = self.tower_entity(id)?;
        let refund = self
            .world
            .get::<&Tower>(entity)
            .map(|tower| tower.sell_value())
            .map_err(|_| CommandError::TowerNotFound(id))?;
        let _ = self.world.despawn(entity);
        self.run.gold += refund;
        tracing::info!(tower = %id, refund, gold = self.run.gold, "tower_sold");
        Ok(refund)
    }

    /// Start the next wave. Returns its 1-based number.
    pub fn start_wave(&mut self) -> Result<u32, CommandError> {
        self.ensure_running()?;
        let count = self.waves.start_wave(self.time.elapsed_ms, &mut self.rng)?;
        let wave = self.waves.wave_number();
        self.run.current_wave = wave;
        self.run.wave_active = true;
        self.run.enemies_spawned_this_wave = 0;
        self.run.enemies_remaining_this_wave = count;
        self.events.push(GameEvent::WaveStarted {
            wave,
            enemy_count: count,
        });
        tracing::info!(wave, enemies = count, "wave_started");
        Ok(wave)
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            tracing::debug!(tick = self.time.tick, "paused");
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            tracing::debug!(tick = self.time.tick, "resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            GamePhase::Defeat | GamePhase::Victory => {}
        }
    }

    /// Clamp to [0, 4]; NaN is ignored.
    pub fn set_time_scale(&mut self, scale: f64) {
        if let Some(scale) = sanitize_time_scale(scale) {
            self.time_scale = scale;
        }
    }

    /// Discard the run and start over with the same config. Queued commands
    /// that follow the restart still apply to the new run.
    pub fn restart(&mut self) {
        let queued = std::mem::take(&mut self.command_queue);
        *self = Self::new(self.config.clone());
        self.command_queue = queued;
        tracing::info!(seed = self.config.seed, "run_restarted");
    }

    // --- Save / restore ---

    /// Persistable view of the run. Projectiles are not included.
    pub fn to_save_data(&self) -> SaveData {
        let towers = systems::in_spawn_order::<Tower>(&self.world)
            .into_iter()
            .filter_map(|entity| {
                let tower = self.world.get::<&Tower>(entity).ok()?;
                Some(TowerRecord {
                    x: tower.position.x,
                    y: tower.position.y,
                    kind: tower.kind,
                    level: tower.level(),
                    total_invested: tower.total_invested(),
                })
            })
            .collect();
        let enemies = systems::in_spawn_order::<Enemy>(&self.world)
            .into_iter()
            .filter_map(|entity| {
                let enemy = self.world.get::<&Enemy>(entity).ok()?;
                Some(EnemyRecord {
                    kind: enemy.kind,
                    segment: enemy.segment(),
                    progress: enemy.progress(),
                    health: Some(enemy.health()),
                })
            })
            .collect();
        SaveData {
            version: SAVE_VERSION,
            seed: self.config.seed,
            rng_word_pos: Some(self.rng.get_word_pos()),
            timestamp: unix_timestamp(),
            run: self.run.clone(),
            wave_status: self.waves.status(),
            pending_spawns: self.waves.pending().collect(),
            towers,
            enemies,
        }
    }

    /// Rebuild a run from save data. Towers and enemies go through the same
    /// constructors as fresh ones; derived stats are recomputed.
    pub fn from_save_data(config: SimConfig, data: &SaveData) -> Self {
        let mut engine = Self::new(SimConfig {
            seed: data.seed,
            ..config
        });
        engine.run = data.run.clone();
        if let Some(word_pos) = data.rng_word_pos {
            engine.rng.set_word_pos(word_pos);
        }

        for record in &data.towers {
            if record.x.is_finite() && record.y.is_finite() {
                world_setup::restore_tower(&mut engine.world, &mut engine.next_spawn_order, record);
            }
        }
        for record in &data.enemies {
            world_setup::restore_enemy(&mut engine.world, &mut engine.next_spawn_order, &engine.path, record);
        }

        engine.waves.restore(
            data.run.current_wave,
            data.wave_status,
            data.pending_spawns.clone(),
            engine.time.elapsed_ms,
        );
        let status = engine.waves.status();
        engine.run.current_wave = engine.waves.wave_number();
        engine.run.wave_active = status.is_active();
        if status.is_active() {
            engine.run.enemies_remaining_this_wave =
                engine.waves.pending_count() + engine.live_enemy_count() as u32;
        }

        engine.phase = if engine.run.lives == 0 {
            GamePhase::Defeat
        } else if status == WaveStatus::Complete {
            GamePhase::Victory
        } else {
            GamePhase::Playing
        };
        tracing::info!(
            wave = engine.run.current_wave,
            towers = data.towers.len(),
            enemies = data.enemies.len(),
            phase = ?engine.phase,
            "run_restored"
        );
        engine
    }

    // --- Internals ---

    fn ensure_running(&self) -> Result<(), CommandError> {
        if self.phase.is_over() {
            Err(CommandError::GameOver)
        } else {
            Ok(())
        }
    }

    fn tower_entity(&self, id: EntityId) -> Result<Entity, CommandError> {
        entity_from_id(id)
            .filter(|entity| self.world.get::<&Tower>(*entity).is_ok())
            .ok_or(CommandError::TowerNotFound(id))
    }

    fn tower_positions(&self) -> Vec<Point> {
        self.world
            .query::<&Tower>()
            .iter()
            .map(|(_, tower)| tower.position)
            .collect()
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        let result = match command {
            PlayerCommand::PlaceTower { kind, x, y } => self.place_tower(kind, Point::new(x, y)).map(|_| ()),
            PlayerCommand::UpgradeTower { tower } => self.upgrade_tower(tower).map(|_| ()),
            PlayerCommand::SellTower { tower } => self.sell_tower(tower).map(|_| ()),
            PlayerCommand::StartWave => self.start_wave().map(|_| ()),
            PlayerCommand::Pause => {
                self.pause();
                Ok(())
            }
            PlayerCommand::Resume => {
                self.resume();
                Ok(())
            }
            PlayerCommand::TogglePause => {
                self.toggle_pause();
                Ok(())
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.set_time_scale(scale);
                Ok(())
            }
            PlayerCommand::Restart => {
                self.restart();
                Ok(())
            }
        };
        if let Err(error) = result {
            tracing::warn!(%error, tick = self.time.tick, "command_rejected");
            self.push_alert(AlertLevel::Warning, error.to_string());
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt_ms: f64) {
        let now_ms = self.time.elapsed_ms;
        let dt_secs = dt_ms / 1000.0;

        // 1. Wave spawning
        if let Some(kind) = self.waves.tick(now_ms) {
            let entity = world_setup::spawn_enemy(&mut self.world, &mut self.next_spawn_order, kind);
            self.run.enemies_spawned_this_wave += 1;
            self.events.push(GameEvent::EnemySpawned {
                enemy: entity_id(entity),
                kind,
            });
        }

        // 2. Movement and leaks
        let defeated = systems::movement::run(
            &mut self.world,
            &self.path,
            dt_secs,
            &self.economy,
            &mut self.run,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        if defeated {
            self.phase = GamePhase::Defeat;
            self.run.wave_active = false;
            self.events.push(GameEvent::Defeat {
                wave: self.run.current_wave,
                score: self.run.score,
            });
            tracing::info!(wave = self.run.current_wave, score = self.run.score, "defeat");
            return;
        }

        // 3. Tower targeting and fire
        systems::tower_fire::run(
            &mut self.world,
            &self.path,
            now_ms,
            self.config.guidance,
            self.config.projectile_speed,
            &mut self.next_spawn_order,
            &mut self.events,
        );

        // 4. Projectile flight and hits
        systems::projectiles::run(
            &mut self.world,
            &self.path,
            &self.config.playfield,
            dt_secs,
            &self.economy,
            &mut self.run,
            &mut self.events,
            &mut self.despawn_buffer,
        );

        // 5. Wave completion
        if let Some(wave) = self.waves.is_wave_complete(self.live_enemy_count()) {
            let bonus = self.economy.complete_wave(&mut self.run, wave);
            self.events.push(GameEvent::WaveCompleted { wave, bonus });
            tracing::info!(wave, bonus, gold = self.run.gold, "wave_complete");
            if self.waves.status() == WaveStatus::Complete {
                self.phase = GamePhase::Victory;
                self.events.push(GameEvent::Victory {
                    score: self.run.score,
                });
                tracing::info!(score = self.run.score, "victory");
            }
        }
    }

    /// Live projectile count (for tests).
    #[cfg(test)]
    pub(crate) fn projectile_count(&self) -> usize {
        self.world
            .query::<&crate::entities::Projectile>()
            .iter()
            .count()
    }

    /// Drop an enemy straight onto the field (for tests).
    #[cfg(test)]
    pub(crate) fn spawn_test_enemy(
        &mut self,
        kind: ramparts_core::enums::EnemyKind,
        segment: usize,
        progress: f64,
    ) -> Entity {
        world_setup::restore_enemy(
            &mut self.world,
            &mut self.next_spawn_order,
            &self.path,
            &EnemyRecord {
                kind,
                segment,
                progress,
                health: None,
            },
        )
    }
}

fn sanitize_time_scale(scale: f64) -> Option<f64> {
    (!scale.is_nan()).then(|| scale.clamp(0.0, MAX_TIME_SCALE))
}

fn unix_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
