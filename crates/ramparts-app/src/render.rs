//! Render hooks that do not draw anything.

use std::sync::{Arc, Mutex};

use ramparts_core::hooks::RenderHook;
use ramparts_core::state::GameStateSnapshot;

/// Logs a one-line summary every `every` ticks and on phase changes.
pub struct LogRenderHook {
    every: u64,
    last_phase: Option<ramparts_core::enums::GamePhase>,
}

impl LogRenderHook {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            last_phase: None,
        }
    }
}

impl RenderHook for LogRenderHook {
    fn render(&mut self, snapshot: &GameStateSnapshot) {
        let phase_changed = self.last_phase != Some(snapshot.phase);
        self.last_phase = Some(snapshot.phase);
        if !phase_changed && snapshot.time.tick % self.every != 0 {
            return;
        }
        tracing::info!(
            tick = snapshot.time.tick,
            phase = ?snapshot.phase,
            wave = snapshot.run.current_wave,
            gold = snapshot.run.gold,
            lives = snapshot.run.lives,
            score = snapshot.run.score,
            enemies = snapshot.enemies.len(),
            towers = snapshot.towers.len(),
            "frame"
        );
    }
}

/// Keeps every snapshot it is handed, for inspection from another thread.
#[derive(Clone, Default)]
pub struct RecordingRenderHook {
    frames: Arc<Mutex<Vec<GameStateSnapshot>>>,
}

impl RecordingRenderHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<GameStateSnapshot> {
        self.frames.lock().map(|frames| frames.clone()).unwrap_or_default()
    }
}

impl RenderHook for RecordingRenderHook {
    fn render(&mut self, snapshot: &GameStateSnapshot) {
        if let Ok(mut frames) = self.frames.lock() {
            frames.push(snapshot.clone());
        }
    }
}
