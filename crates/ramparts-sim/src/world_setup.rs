//! Entity spawn factories.
//!
//! Fresh spawns and restored saves go through the same constructors; restore
//! only overrides mutable state afterwards.

use hecs::{Entity, World};

use ramparts_core::enums::{EnemyKind, Guidance, TowerKind};
use ramparts_core::save::{EnemyRecord, TowerRecord};
use ramparts_core::stats;
use ramparts_core::types::Point;

use crate::entities::{Enemy, Projectile, SpawnOrder, Tower};
use crate::path::PathGeometry;

fn next(order: &mut u64) -> SpawnOrder {
    let current = SpawnOrder(*order);
    *order += 1;
    current
}

/// Spawn a full-health enemy at the path start.
pub fn spawn_enemy(world: &mut World, order: &mut u64, kind: EnemyKind) -> Entity {
    world.spawn((Enemy::new(kind), next(order)))
}

/// Spawn an enemy from a save record.
pub fn restore_enemy(world: &mut World, order: &mut u64, path: &PathGeometry, record: &EnemyRecord) -> Entity {
    let entity = spawn_enemy(world, order, record.kind);
    if let Ok(mut enemy) = world.get::<&mut Enemy>(entity) {
        enemy.restore(path, record.segment, record.progress, record.health);
    }
    entity
}

/// Spawn a level-1 tower.
pub fn spawn_tower(world: &mut World, order: &mut u64, kind: TowerKind, position: Point) -> Entity {
    world.spawn((Tower::new(kind, position), next(order)))
}

/// Spawn a tower from a save record. A missing investment is recomputed
/// from the cost of reaching the saved level.
pub fn restore_tower(world: &mut World, order: &mut u64, record: &TowerRecord) -> Entity {
    let level = record.level.clamp(1, ramparts_core::constants::MAX_TOWER_LEVEL);
    let invested = if record.total_invested == 0 {
        stats::invested_through(record.kind, level)
    } else {
        record.total_invested
    };
    let tower = Tower::with_progress(record.kind, Point::new(record.x, record.y), level, invested);
    world.spawn((tower, next(order)))
}

/// Build one projectile of a volley with the configured guidance.
pub fn build_projectile(
    guidance: Guidance,
    origin: Point,
    heading: f64,
    speed: f64,
    damage: u32,
    target: Entity,
) -> Projectile {
    match guidance {
        Guidance::Straight => Projectile::straight(origin, heading, speed, damage),
        Guidance::Homing => Projectile::homing(origin, heading, speed, damage, target),
    }
}

pub fn spawn_projectile(world: &mut World, order: &mut u64, projectile: Projectile) -> Entity {
    world.spawn((projectile, next(order)))
}
