//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Tower archetype. Base stats are looked up with [`TowerKind::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerKind {
    /// Cheap all-rounder.
    #[default]
    Basic,
    /// Heavy hitter with a slow reload.
    Strong,
    /// Rapid fire, low damage, slightly longer reach.
    Fast,
    /// Long range, very slow, massive single hits.
    Sniper,
}

impl TowerKind {
    pub const ALL: [TowerKind; 4] = [
        TowerKind::Basic,
        TowerKind::Strong,
        TowerKind::Fast,
        TowerKind::Sniper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Strong => "strong",
            Self::Fast => "fast",
            Self::Sniper => "sniper",
        }
    }
}

/// Enemy archetype. Base stats are looked up with [`EnemyKind::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    #[default]
    Goblin,
    Orc,
    Troll,
    Dragon,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Goblin,
        EnemyKind::Orc,
        EnemyKind::Troll,
        EnemyKind::Dragon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Goblin => "goblin",
            Self::Orc => "orc",
            Self::Troll => "troll",
            Self::Dragon => "dragon",
        }
    }
}

/// Enemy lifecycle. Terminal states never transition back to `Alive`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    #[default]
    Alive,
    /// Health reached zero; reward has been granted.
    Dead,
    /// Reached the end of the path; a life penalty has been applied.
    Leaked,
}

/// Wave director lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaveStatus {
    /// Between waves, waiting for the player to start the next one.
    #[default]
    Idle,
    /// Spawn sequence still has enemies left to release.
    Spawning,
    /// Every enemy of the wave has spawned; waiting for the field to clear.
    Clearing,
    /// All configured waves have been cleared.
    Complete,
}

impl WaveStatus {
    /// Whether a wave is in progress (spawning or clearing).
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Spawning | Self::Clearing)
    }
}

/// How tower projectiles steer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Guidance {
    /// Fly along the launch heading until a hit or leaving the playfield.
    Straight,
    /// Re-aim at the locked target every tick; a vanished target is a miss.
    #[default]
    Homing,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Running: building between waves or defending during one.
    #[default]
    Playing,
    /// Entity state frozen; observers still receive snapshots.
    Paused,
    /// Lives reached zero.
    Defeat,
    /// Every configured wave was cleared.
    Victory,
}

impl GamePhase {
    /// Whether the run has ended (win or loss).
    pub fn is_over(&self) -> bool {
        matches!(self, Self::Defeat | Self::Victory)
    }
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}
