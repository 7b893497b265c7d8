//! Collaborator interfaces the simulation is observed or persisted through.
//!
//! None of these may mutate simulation state: renderers get a snapshot,
//! persistence gets a save record built after the tick settled.

use crate::errors::PersistError;
use crate::save::{LeaderboardEntry, SaveData};
use crate::state::GameStateSnapshot;

/// Draws (or otherwise presents) the state after each tick.
/// Called while paused too, so overlays can be shown.
pub trait RenderHook {
    fn render(&mut self, snapshot: &GameStateSnapshot);
}

/// Converts run state to and from an opaque storage blob.
pub trait PersistenceHook {
    fn serialize(&self, data: &SaveData) -> Result<String, PersistError>;
    fn deserialize(&self, blob: &str) -> Result<SaveData, PersistError>;
}

/// Best-scores table, ranked by score descending. Ties keep submission order.
pub trait LeaderboardHook {
    fn submit_score(&mut self, player: &str, score: u32, wave: u32) -> Result<(), PersistError>;
    fn fetch_top(&self, n: usize) -> Vec<LeaderboardEntry>;
}
