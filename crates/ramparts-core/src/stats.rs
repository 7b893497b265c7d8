//! Per-kind base stats and the level-derived tower formulas.
//!
//! Derived stats are pure functions of (kind, level) and are never stored
//! on an entity. Everything with a floor is computed in integer arithmetic
//! so the result is exact.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{EnemyKind, TowerKind};

/// Level-1 stats of a tower kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    /// Gold required to place the tower.
    pub cost: u32,
    pub damage: u32,
    pub range: f64,
    pub fire_interval_ms: u32,
    /// Cost of the level 1 -> 2 upgrade; later levels scale by 1.5x each.
    pub upgrade_cost: u32,
}

/// Fixed stats of an enemy kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub health: u32,
    /// Movement along the path in pixels per second.
    pub speed: f64,
    /// Gold granted on kill.
    pub reward: u32,
}

impl TowerKind {
    pub fn stats(self) -> TowerStats {
        match self {
            TowerKind::Basic => TowerStats {
                cost: 20,
                damage: 25,
                range: 80.0,
                fire_interval_ms: 1000,
                upgrade_cost: 25,
            },
            TowerKind::Strong => TowerStats {
                cost: 50,
                damage: 50,
                range: 70.0,
                fire_interval_ms: 1500,
                upgrade_cost: 40,
            },
            TowerKind::Fast => TowerStats {
                cost: 30,
                damage: 15,
                range: 90.0,
                fire_interval_ms: 500,
                upgrade_cost: 30,
            },
            TowerKind::Sniper => TowerStats {
                cost: 80,
                damage: 100,
                range: 150.0,
                fire_interval_ms: 2500,
                upgrade_cost: 60,
            },
        }
    }
}

impl EnemyKind {
    pub fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Goblin => EnemyStats {
                health: 50,
                speed: 60.0,
                reward: 10,
            },
            EnemyKind::Orc => EnemyStats {
                health: 100,
                speed: 48.0,
                reward: 20,
            },
            EnemyKind::Troll => EnemyStats {
                health: 200,
                speed: 30.0,
                reward: 40,
            },
            EnemyKind::Dragon => EnemyStats {
                health: 500,
                speed: 18.0,
                reward: 100,
            },
        }
    }
}

/// Damage per projectile: base * (1 + 0.3 * (level - 1)), floored.
pub fn damage(kind: TowerKind, level: u32) -> u32 {
    let steps = level.saturating_sub(1);
    kind.stats().damage * (10 + 3 * steps) / 10
}

/// Targeting range: +40% from level 4 on.
pub fn range(kind: TowerKind, level: u32) -> f64 {
    let base = kind.stats().range;
    if level >= 4 {
        base * 1.4
    } else {
        base
    }
}

/// Minimum time between volleys: -20% at level 2 and another -20% at level 4.
pub fn fire_interval_ms(kind: TowerKind, level: u32) -> f64 {
    let mut interval = kind.stats().fire_interval_ms;
    if level >= 2 {
        interval = interval * 4 / 5;
    }
    if level >= 4 {
        interval = interval * 4 / 5;
    }
    interval as f64
}

/// Projectiles per volley: 1, 2 from level 3, 3 at level 5.
pub fn volley_size(level: u32) -> u32 {
    if level >= 5 {
        3
    } else if level >= 3 {
        2
    } else {
        1
    }
}

/// Cost of upgrading from `level` to `level + 1`: base * 1.5^(level - 1), floored.
/// Returns None at the level cap.
pub fn upgrade_cost(kind: TowerKind, level: u32) -> Option<u32> {
    if level >= MAX_TOWER_LEVEL {
        return None;
    }
    let steps = level.saturating_sub(1);
    let base = kind.stats().upgrade_cost as u64;
    Some((base * 3u64.pow(steps) / 2u64.pow(steps)) as u32)
}

/// Refund for a tower with `invested` total gold: 70%, floored.
pub fn sell_value(invested: u32) -> u32 {
    ((invested as u64 * SELL_REFUND_TENTHS as u64) / 10) as u32
}

/// Total gold sunk into a tower placed at level 1 and upgraded to `level`.
pub fn invested_through(kind: TowerKind, level: u32) -> u32 {
    let upgrades: u32 = (MIN_TOWER_LEVEL..level.min(MAX_TOWER_LEVEL))
        .filter_map(|l| upgrade_cost(kind, l))
        .sum();
    kind.stats().cost + upgrades
}
