//! Simulation configuration.
//!
//! Every field defaults to the tuning in `ramparts_core::constants`, so a
//! partial JSON document only overrides what it names.

use serde::{Deserialize, Serialize};

use ramparts_core::constants::*;
use ramparts_core::enums::Guidance;
use ramparts_core::types::{Playfield, Point};

use crate::path::PathGeometry;
use crate::wave::{default_waves, WaveDef};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Simulated milliseconds per tick at time scale 1.
    pub tick_ms: f64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    pub playfield: Playfield,
    /// Enemy route waypoints. Fewer than two points falls back to the default route.
    pub path: Vec<Point>,
    pub waves: Vec<WaveDef>,
    pub starting_gold: u32,
    pub starting_lives: u32,
    pub leak_penalty: u32,
    pub score_per_reward: u32,
    pub wave_bonus_base: u32,
    pub wave_bonus_step: u32,
    pub wave_bonus_score_multiplier: u32,
    pub spawn_interval_ms: f64,
    pub guidance: Guidance,
    pub projectile_speed: f64,
    pub path_clearance: f64,
    pub min_tower_separation: f64,
    pub placement_edge_margin: f64,
    pub leaderboard_capacity: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_ms: TICK_MS,
            time_scale: 1.0,
            playfield: Playfield::default(),
            path: PathGeometry::default().points().to_vec(),
            waves: default_waves(),
            starting_gold: STARTING_GOLD,
            starting_lives: STARTING_LIVES,
            leak_penalty: LEAK_PENALTY,
            score_per_reward: SCORE_PER_REWARD,
            wave_bonus_base: WAVE_BONUS_BASE,
            wave_bonus_step: WAVE_BONUS_STEP,
            wave_bonus_score_multiplier: WAVE_BONUS_SCORE_MULTIPLIER,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            guidance: Guidance::default(),
            projectile_speed: PROJECTILE_SPEED,
            path_clearance: PATH_CLEARANCE,
            min_tower_separation: MIN_TOWER_SEPARATION,
            placement_edge_margin: PLACEMENT_EDGE_MARGIN,
            leaderboard_capacity: LEADERBOARD_CAPACITY,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON config document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Config with a different seed and everything else default.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Route geometry, or the default route when the configured one is degenerate.
    pub fn path_geometry(&self) -> PathGeometry {
        PathGeometry::new(self.path.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ramparts_core::enums::EnemyKind;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SimConfig::from_json(r#"{"seed": 7, "starting_gold": 500}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.starting_gold, 500);
        assert_eq!(config.starting_lives, 100);
        assert_eq!(config.waves.len(), 8);
        assert_eq!(config.guidance, Guidance::Homing);
    }

    #[test]
    fn test_custom_waves_parse() {
        let config = SimConfig::from_json(
            r#"{"waves": [{"groups": [{"kind": "orc", "count": 3}]}]}"#,
        )
        .unwrap();
        assert_eq!(config.waves.len(), 1);
        assert_eq!(config.waves[0].groups[0].kind, EnemyKind::Orc);
        assert_eq!(config.waves[0].enemy_count(), 3);
    }

    #[test]
    fn test_degenerate_path_falls_back_to_default() {
        let config = SimConfig {
            path: vec![Point::new(1.0, 1.0)],
            ..SimConfig::default()
        };
        assert_eq!(config.path_geometry(), PathGeometry::default());
    }
}
