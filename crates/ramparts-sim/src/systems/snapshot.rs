//! Snapshot system: queries the ECS world and builds a GameStateSnapshot.
//!
//! Read-only; never modifies the world.

use hecs::World;

use ramparts_core::enums::GamePhase;
use ramparts_core::events::{Alert, GameEvent};
use ramparts_core::state::*;
use ramparts_core::types::SimTime;

use crate::entities::{entity_id, Enemy, Projectile, Tower};
use crate::path::PathGeometry;
use crate::wave::WaveDirector;

use super::in_spawn_order;

#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    path: &PathGeometry,
    time: &SimTime,
    phase: GamePhase,
    run: &RunState,
    waves: &WaveDirector,
    events: Vec<GameEvent>,
    alerts: Vec<Alert>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        run: run.clone(),
        wave: WaveView {
            status: waves.status(),
            total_waves: waves.total_waves(),
            pending_spawns: waves.pending_count(),
        },
        towers: build_towers(world),
        enemies: build_enemies(world, path),
        projectiles: build_projectiles(world),
        events,
        alerts,
    }
}

fn build_towers(world: &World) -> Vec<TowerView> {
    in_spawn_order::<Tower>(world)
        .into_iter()
        .filter_map(|entity| {
            let tower = world.get::<&Tower>(entity).ok()?;
            Some(TowerView {
                id: entity_id(entity),
                kind: tower.kind,
                position: tower.position,
                level: tower.level(),
                damage: tower.damage(),
                range: tower.range(),
                fire_interval_ms: tower.fire_interval_ms(),
                upgrade_cost: tower.upgrade_cost(),
                sell_value: tower.sell_value(),
                target: tower
                    .target()
                    .filter(|target| world.contains(*target))
                    .map(entity_id),
            })
        })
        .collect()
}

fn build_enemies(world: &World, path: &PathGeometry) -> Vec<EnemyView> {
    in_spawn_order::<Enemy>(world)
        .into_iter()
        .filter_map(|entity| {
            let enemy = world.get::<&Enemy>(entity).ok()?;
            Some(EnemyView {
                id: entity_id(entity),
                kind: enemy.kind,
                position: enemy.position(path),
                health: enemy.health(),
                max_health: enemy.max_health(),
                segment: enemy.segment(),
                progress: enemy.progress(),
            })
        })
        .collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    in_spawn_order::<Projectile>(world)
        .into_iter()
        .filter_map(|entity| {
            let projectile = world.get::<&Projectile>(entity).ok()?;
            Some(ProjectileView {
                position: projectile.position,
                damage: projectile.damage,
                homing: projectile.is_homing(),
            })
        })
        .collect()
}
