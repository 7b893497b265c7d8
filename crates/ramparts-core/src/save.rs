//! Save-data records produced by the engine and consumed by the persistence hook.
//!
//! Every struct defaults field-by-field, so a blob with missing fields still
//! loads. Projectiles are never saved and towers/enemies store only their
//! identity and mutable state; derived stats are recomputed on restore.

use serde::{Deserialize, Serialize};

use crate::enums::{EnemyKind, TowerKind, WaveStatus};
use crate::state::RunState;

/// Current save format version.
pub const SAVE_VERSION: u32 = 1;

/// Full save data for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    pub version: u32,
    pub seed: u64,
    /// Position in the seeded RNG stream. None restarts the stream.
    pub rng_word_pos: Option<u128>,
    /// Seconds since the Unix epoch at save time.
    pub timestamp: u64,
    pub run: RunState,
    pub wave_status: WaveStatus,
    /// Remaining spawn order of the wave in progress.
    pub pending_spawns: Vec<EnemyKind>,
    pub towers: Vec<TowerRecord>,
    pub enemies: Vec<EnemyRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerRecord {
    pub x: f64,
    pub y: f64,
    pub kind: TowerKind,
    pub level: u32,
    /// Zero means "unknown"; restore falls back to the cost of reaching `level`.
    pub total_invested: u32,
}

impl Default for TowerRecord {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            kind: TowerKind::default(),
            level: 1,
            total_invested: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyRecord {
    pub kind: EnemyKind,
    pub segment: usize,
    pub progress: f64,
    /// None restores at full health.
    pub health: Option<u32>,
}

impl Default for EnemyRecord {
    fn default() -> Self {
        Self {
            kind: EnemyKind::default(),
            segment: 0,
            progress: 0.0,
            health: None,
        }
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player: String,
    pub score: u32,
    pub wave: u32,
}
