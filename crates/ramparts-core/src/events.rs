//! Events emitted by the simulation for UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EntityId, Point};

/// Discrete things that happened during one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A wave was started.
    WaveStarted { wave: u32, enemy_count: u32 },
    /// An enemy entered the path.
    EnemySpawned { enemy: EntityId, kind: EnemyKind },
    /// A tower released a volley.
    TowerFired {
        tower: EntityId,
        target: EntityId,
        projectiles: u32,
    },
    /// A projectile lost its target or left the playfield.
    ProjectileMissed { position: Point },
    /// An enemy was killed; reward already credited.
    EnemyKilled {
        enemy: EntityId,
        kind: EnemyKind,
        reward: u32,
    },
    /// An enemy reached the end of the path.
    EnemyLeaked {
        enemy: EntityId,
        kind: EnemyKind,
        lives_lost: u32,
    },
    /// All enemies of a wave were dealt with; bonus already credited.
    WaveCompleted { wave: u32, bonus: u32 },
    /// Final wave cleared.
    Victory { score: u32 },
    /// Lives ran out.
    Defeat { wave: u32, score: u32 },
}

/// Alert for the UI message area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub tick: u64,
}
