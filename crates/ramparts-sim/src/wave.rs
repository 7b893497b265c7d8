//! Wave definitions and the wave director state machine.
//!
//! Idle -> Spawning -> Clearing -> Idle (next wave) | Complete (all waves done).
//! Spawn timing is an explicit scheduled-time comparison made inside the tick.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use ramparts_core::enums::{EnemyKind, WaveStatus};
use ramparts_core::errors::CommandError;

/// `count` enemies of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveGroup {
    pub kind: EnemyKind,
    pub count: u32,
}

/// Composition of one wave.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WaveDef {
    pub groups: Vec<WaveGroup>,
}

impl WaveDef {
    pub fn new(groups: &[(EnemyKind, u32)]) -> Self {
        Self {
            groups: groups
                .iter()
                .map(|&(kind, count)| WaveGroup { kind, count })
                .collect(),
        }
    }

    pub fn enemy_count(&self) -> u32 {
        self.groups.iter().map(|g| g.count).sum()
    }

    /// Flat spawn list in declaration order, before shuffling.
    fn expand(&self) -> Vec<EnemyKind> {
        self.groups
            .iter()
            .flat_map(|g| std::iter::repeat(g.kind).take(g.count as usize))
            .collect()
    }
}

/// The eight-wave campaign.
pub fn default_waves() -> Vec<WaveDef> {
    use EnemyKind::*;
    vec![
        WaveDef::new(&[(Goblin, 5)]),
        WaveDef::new(&[(Goblin, 8), (Orc, 2)]),
        WaveDef::new(&[(Goblin, 10), (Orc, 5)]),
        WaveDef::new(&[(Orc, 8), (Troll, 2)]),
        WaveDef::new(&[(Goblin, 15), (Orc, 10), (Troll, 3)]),
        WaveDef::new(&[(Orc, 12), (Troll, 8), (Dragon, 1)]),
        WaveDef::new(&[(Goblin, 20), (Orc, 15), (Troll, 10), (Dragon, 2)]),
        WaveDef::new(&[(Troll, 15), (Dragon, 5)]),
    ]
}

/// Sequences spawns for one wave at a time and detects its completion.
#[derive(Debug, Clone)]
pub struct WaveDirector {
    waves: Vec<WaveDef>,
    status: WaveStatus,
    /// 0-based index of the wave in progress, or of the next one when Idle.
    index: usize,
    pending: VecDeque<EnemyKind>,
    next_spawn_ms: f64,
    spawn_interval_ms: f64,
}

impl WaveDirector {
    pub fn new(waves: Vec<WaveDef>, spawn_interval_ms: f64) -> Self {
        let status = if waves.is_empty() {
            WaveStatus::Complete
        } else {
            WaveStatus::Idle
        };
        Self {
            waves,
            status,
            index: 0,
            pending: VecDeque::new(),
            next_spawn_ms: 0.0,
            spawn_interval_ms,
        }
    }

    pub fn status(&self) -> WaveStatus {
        self.status
    }

    pub fn total_waves(&self) -> u32 {
        self.waves.len() as u32
    }

    /// 1-based number of the wave in progress, or of the next one when Idle.
    pub fn wave_number(&self) -> u32 {
        self.index as u32 + 1
    }

    pub fn pending(&self) -> impl Iterator<Item = EnemyKind> + '_ {
        self.pending.iter().copied()
    }

    pub fn pending_count(&self) -> u32 {
        self.pending.len() as u32
    }

    /// Begin the next wave: shuffle its enemies and schedule the first spawn
    /// at `now_ms`. Returns the number of enemies queued.
    pub fn start_wave(&mut self, now_ms: f64, rng: &mut ChaCha8Rng) -> Result<u32, CommandError> {
        match self.status {
            WaveStatus::Spawning | WaveStatus::Clearing => return Err(CommandError::WaveAlreadyActive),
            WaveStatus::Complete => return Err(CommandError::NoMoreWaves),
            WaveStatus::Idle => {}
        }
        let wave = self.waves.get(self.index).ok_or(CommandError::NoMoreWaves)?;
        let mut order = wave.expand();
        order.shuffle(rng);
        self.pending = order.into();
        self.next_spawn_ms = now_ms;
        self.status = WaveStatus::Spawning;
        Ok(self.pending.len() as u32)
    }

    /// At most one spawn per tick, once its scheduled time has come.
    /// Moves to Clearing when the queue empties.
    pub fn tick(&mut self, now_ms: f64) -> Option<EnemyKind> {
        if self.status != WaveStatus::Spawning {
            return None;
        }
        let mut spawned = None;
        if now_ms >= self.next_spawn_ms {
            spawned = self.pending.pop_front();
            self.next_spawn_ms += self.spawn_interval_ms;
        }
        if self.pending.is_empty() {
            self.status = WaveStatus::Clearing;
        }
        spawned
    }

    /// Close the wave once spawning is done and nothing is left alive.
    /// Returns the 1-based number of the completed wave, exactly once per wave.
    pub fn is_wave_complete(&mut self, live_enemies: usize) -> Option<u32> {
        if self.status != WaveStatus::Clearing || live_enemies > 0 {
            return None;
        }
        let completed = self.wave_number();
        self.index += 1;
        self.status = if self.index >= self.waves.len() {
            WaveStatus::Complete
        } else {
            WaveStatus::Idle
        };
        Some(completed)
    }

    /// Resume from saved progress. `wave_number` is 1-based.
    /// Spawning with nothing left to spawn resumes as Clearing.
    pub fn restore(&mut self, wave_number: u32, status: WaveStatus, pending: Vec<EnemyKind>, now_ms: f64) {
        self.index = (wave_number.max(1) as usize - 1).min(self.waves.len());
        self.pending = pending.into();
        self.next_spawn_ms = now_ms;
        self.status = match status {
            _ if self.index >= self.waves.len() => WaveStatus::Complete,
            WaveStatus::Complete => WaveStatus::Complete,
            WaveStatus::Spawning if self.pending.is_empty() => WaveStatus::Clearing,
            WaveStatus::Spawning | WaveStatus::Clearing => status,
            WaveStatus::Idle => WaveStatus::Idle,
        };
        if self.status != WaveStatus::Spawning {
            self.pending.clear();
        }
    }
}
