use hecs::Entity;

use ramparts_core::constants::{MAX_TOWER_LEVEL, VOLLEY_SPREAD};
use ramparts_core::enums::TowerKind;
use ramparts_core::errors::CommandError;
use ramparts_core::stats;
use ramparts_core::types::Point;

/// A live enemy as seen by the targeting scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetCandidate {
    pub entity: Entity,
    pub position: Point,
}

/// A placed tower. Only kind, level and investment are stored; damage,
/// range, fire interval and volley size are derived on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Tower {
    pub kind: TowerKind,
    pub position: Point,
    level: u32,
    total_invested: u32,
    last_fire_ms: Option<f64>,
    /// Non-owning; resolves to nothing once the enemy is despawned.
    target: Option<Entity>,
}

impl Tower {
    /// Level-1 tower whose investment is its placement cost.
    pub fn new(kind: TowerKind, position: Point) -> Self {
        Self {
            kind,
            position,
            level: 1,
            total_invested: kind.stats().cost,
            last_fire_ms: None,
            target: None,
        }
    }

    /// Tower rebuilt from saved level and investment.
    pub fn with_progress(kind: TowerKind, position: Point, level: u32, total_invested: u32) -> Self {
        Self {
            level: level.clamp(1, MAX_TOWER_LEVEL),
            total_invested,
            ..Self::new(kind, position)
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn total_invested(&self) -> u32 {
        self.total_invested
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    pub fn damage(&self) -> u32 {
        stats::damage(self.kind, self.level)
    }

    pub fn range(&self) -> f64 {
        stats::range(self.kind, self.level)
    }

    pub fn fire_interval_ms(&self) -> f64 {
        stats::fire_interval_ms(self.kind, self.level)
    }

    pub fn volley_size(&self) -> u32 {
        stats::volley_size(self.level)
    }

    pub fn upgrade_cost(&self) -> Option<u32> {
        stats::upgrade_cost(self.kind, self.level)
    }

    pub fn sell_value(&self) -> u32 {
        stats::sell_value(self.total_invested)
    }

    /// Spend gold from `gold` to raise the level by one. Returns the cost paid.
    /// State is unchanged on error.
    pub fn upgrade(&mut self, gold: &mut u32) -> Result<u32, CommandError> {
        let cost = self.upgrade_cost().ok_or(CommandError::MaxLevel)?;
        if *gold < cost {
            return Err(CommandError::InsufficientGold {
                needed: cost,
                available: *gold,
            });
        }
        *gold -= cost;
        self.total_invested += cost;
        self.level += 1;
        Ok(cost)
    }

    /// Nearest candidate within range. Candidates are expected in spawn order;
    /// equal distances keep the earlier one.
    pub fn select_target(&self, candidates: &[TargetCandidate]) -> Option<Entity> {
        let range = self.range();
        let mut best: Option<(Entity, f64)> = None;
        for candidate in candidates {
            let distance = self.position.distance(candidate.position);
            if distance > range {
                continue;
            }
            if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                best = Some((candidate.entity, distance));
            }
        }
        best.map(|(entity, _)| entity)
    }

    /// Keep the current target while it is alive and in range, otherwise
    /// rescan. Returns the target and its position.
    pub fn acquire_target(&mut self, candidates: &[TargetCandidate]) -> Option<TargetCandidate> {
        let range = self.range();
        let current = self.target.and_then(|entity| {
            candidates
                .iter()
                .find(|c| c.entity == entity && self.position.distance(c.position) <= range)
        });
        let chosen = match current {
            Some(candidate) => Some(*candidate),
            None => self
                .select_target(candidates)
                .and_then(|entity| candidates.iter().find(|c| c.entity == entity).copied()),
        };
        self.target = chosen.map(|c| c.entity);
        chosen
    }

    /// Whether the fire interval has elapsed since the last volley.
    pub fn ready_to_fire(&self, now_ms: f64) -> bool {
        self.last_fire_ms
            .map_or(true, |last| now_ms - last >= self.fire_interval_ms())
    }

    pub fn mark_fired(&mut self, now_ms: f64) {
        self.last_fire_ms = Some(now_ms);
    }

    /// Launch headings (radians) for one volley aimed at `aim`, fanned
    /// symmetrically around the direct line when more than one projectile.
    pub fn volley_headings(&self, aim: Point) -> Vec<f64> {
        let delta = aim - self.position;
        let center = delta.y.atan2(delta.x);
        let count = self.volley_size();
        let mid = (count as f64 - 1.0) / 2.0;
        (0..count)
            .map(|i| center + (i as f64 - mid) * VOLLEY_SPREAD)
            .collect()
    }
}
