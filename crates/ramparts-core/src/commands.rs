//! Player commands sent from the UI layer to the simulation.
//!
//! Commands are queued and applied at the next tick boundary. Failures do
//! not abort the tick; they surface as alerts in the following snapshot.

use serde::{Deserialize, Serialize};

use crate::enums::TowerKind;
use crate::types::EntityId;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Building ---
    /// Place a new tower, paying its base cost.
    PlaceTower { kind: TowerKind, x: f64, y: f64 },
    /// Upgrade an existing tower by one level.
    UpgradeTower { tower: EntityId },
    /// Sell a tower for 70% of the gold invested in it.
    SellTower { tower: EntityId },

    // --- Waves ---
    /// Start the next configured wave.
    StartWave,

    // --- Simulation control ---
    /// Freeze entity state.
    Pause,
    /// Unfreeze entity state.
    Resume,
    /// Flip between paused and playing.
    TogglePause,
    /// Set time scale (1.0 = normal, 2.0 = double, 0.0 = frozen).
    SetTimeScale { scale: f64 },
    /// Discard the current run and start a fresh one.
    Restart,
}
