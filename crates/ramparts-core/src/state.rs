//! Run state and the per-tick snapshot handed to observers.

use serde::{Deserialize, Serialize};

use crate::constants::{STARTING_GOLD, STARTING_LIVES};
use crate::enums::*;
use crate::events::{Alert, GameEvent};
use crate::types::{EntityId, Point, SimTime};

/// Economy and progress of one run. Reset wholesale on restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunState {
    pub gold: u32,
    pub lives: u32,
    pub score: u32,
    /// 1-based number of the next wave to start (or the one in progress).
    pub current_wave: u32,
    pub wave_active: bool,
    pub enemies_spawned_this_wave: u32,
    /// Enemies of the current wave not yet killed or leaked.
    pub enemies_remaining_this_wave: u32,
    pub enemies_killed: u32,
    pub enemies_leaked: u32,
    pub towers_built: u32,
}

impl RunState {
    pub fn new(gold: u32, lives: u32) -> Self {
        Self {
            gold,
            lives,
            score: 0,
            current_wave: 1,
            wave_active: false,
            enemies_spawned_this_wave: 0,
            enemies_remaining_this_wave: 0,
            enemies_killed: 0,
            enemies_leaked: 0,
            towers_built: 0,
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new(STARTING_GOLD, STARTING_LIVES)
    }
}

/// Complete game state broadcast to observers after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub run: RunState,
    pub wave: WaveView,
    pub towers: Vec<TowerView>,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub events: Vec<GameEvent>,
    pub alerts: Vec<Alert>,
}

/// Wave director status for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub status: WaveStatus,
    pub total_waves: u32,
    /// Enemies of the current wave still waiting to spawn.
    pub pending_spawns: u32,
}

/// A placed tower with its derived stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub id: EntityId,
    pub kind: TowerKind,
    pub position: Point,
    pub level: u32,
    pub damage: u32,
    pub range: f64,
    pub fire_interval_ms: f64,
    /// None at max level.
    pub upgrade_cost: Option<u32>,
    pub sell_value: u32,
    pub target: Option<EntityId>,
}

/// A live enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub position: Point,
    pub health: u32,
    pub max_health: u32,
    pub segment: usize,
    pub progress: f64,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Point,
    pub damage: u32,
    pub homing: bool,
}
