//! Simulation constants and tuning parameters.
//!
//! Times are simulated milliseconds, distances are playfield pixels and
//! speeds are pixels per simulated second.

/// Nominal tick rate (Hz) of the fixed-timestep driver.
pub const TICK_RATE: u32 = 60;

/// Milliseconds per tick at the nominal rate.
pub const TICK_MS: f64 = 1000.0 / TICK_RATE as f64;

/// Upper bound for the player-controlled time scale.
pub const MAX_TIME_SCALE: f64 = 4.0;

// --- Playfield ---

pub const PLAYFIELD_WIDTH: f64 = 800.0;
pub const PLAYFIELD_HEIGHT: f64 = 600.0;

/// Default enemy route, entering on the left edge and leaving on the right.
pub const DEFAULT_PATH: [(f64, f64); 8] = [
    (0.0, 300.0),
    (200.0, 300.0),
    (200.0, 150.0),
    (400.0, 150.0),
    (400.0, 450.0),
    (600.0, 450.0),
    (600.0, 300.0),
    (800.0, 300.0),
];

// --- Placement ---

/// Minimum distance between a tower centre and any path segment
/// (half the road width plus the tower footprint radius).
pub const PATH_CLEARANCE: f64 = 35.0;

/// Minimum distance between two tower centres.
pub const MIN_TOWER_SEPARATION: f64 = 35.0;

/// Tower centres must stay this far inside the playfield edges.
pub const PLACEMENT_EDGE_MARGIN: f64 = 15.0;

// --- Towers ---

pub const MIN_TOWER_LEVEL: u32 = 1;
pub const MAX_TOWER_LEVEL: u32 = 5;

/// Fraction of the total invested gold refunded on sale, as numerator / 10.
pub const SELL_REFUND_TENTHS: u32 = 7;

/// Angle (radians) between adjacent projectiles of a multi-shot volley.
pub const VOLLEY_SPREAD: f64 = 0.3;

// --- Projectiles ---

pub const PROJECTILE_SPEED: f64 = 300.0;
pub const PROJECTILE_RADIUS: f64 = 3.0;

// --- Enemies ---

/// Collision radius of every enemy body.
pub const ENEMY_HIT_RADIUS: f64 = 8.0;

// --- Economy ---

pub const STARTING_GOLD: u32 = 100;
pub const STARTING_LIVES: u32 = 100;

/// Lives lost per leaked enemy, independent of enemy kind.
pub const LEAK_PENALTY: u32 = 10;

/// Score granted per point of kill reward.
pub const SCORE_PER_REWARD: u32 = 10;

/// Wave completion bonus: base + step * completed wave number.
pub const WAVE_BONUS_BASE: u32 = 20;
pub const WAVE_BONUS_STEP: u32 = 5;

/// Score granted per point of wave completion bonus.
pub const WAVE_BONUS_SCORE_MULTIPLIER: u32 = 5;

// --- Waves ---

/// Simulated time between two spawns of the same wave.
pub const SPAWN_INTERVAL_MS: f64 = 800.0;

// --- Leaderboard ---

pub const LEADERBOARD_CAPACITY: usize = 10;
