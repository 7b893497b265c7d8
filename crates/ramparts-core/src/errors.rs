//! Error taxonomy. Nothing here is fatal to the process: the worst outcome
//! of any core condition is the end of the current run.

use thiserror::Error;

use crate::types::EntityId;

/// Why a tower position was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("position is outside the buildable area")]
    OutOfBounds,
    #[error("position is too close to the enemy path")]
    OnPath,
    #[error("position is too close to another tower")]
    TooCloseToTower,
}

/// Rejected player action. Simulation state is unchanged when returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("invalid placement: {0}")]
    InvalidPlacement(#[from] PlacementError),
    #[error("insufficient gold: need {needed}, have {available}")]
    InsufficientGold { needed: u32, available: u32 },
    #[error("tower is already at max level")]
    MaxLevel,
    #[error("tower {0} not found")]
    TowerNotFound(EntityId),
    #[error("a wave is already in progress")]
    WaveAlreadyActive,
    #[error("no more waves")]
    NoMoreWaves,
    #[error("the run is over")]
    GameOver,
}

/// Persistence failure. A corrupt blob is recovered by starting a fresh run.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("save data is corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("no blob stored under key {0:?}")]
    NotFound(String),
}
