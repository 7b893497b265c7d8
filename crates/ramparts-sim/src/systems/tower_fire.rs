//! Tower targeting and volley release.

use hecs::World;

use ramparts_core::enums::Guidance;
use ramparts_core::events::GameEvent;

use crate::entities::{entity_id, Enemy, TargetCandidate, Tower};
use crate::path::PathGeometry;
use crate::world_setup;

use super::in_spawn_order;

/// Live enemies with their current positions, in spawn order.
pub fn live_enemies(world: &World, path: &PathGeometry) -> Vec<TargetCandidate> {
    in_spawn_order::<Enemy>(world)
        .into_iter()
        .filter_map(|entity| {
            let enemy = world.get::<&Enemy>(entity).ok()?;
            enemy.is_alive().then(|| TargetCandidate {
                entity,
                position: enemy.position(path),
            })
        })
        .collect()
}

/// Let every tower refresh its target and fire when its interval has elapsed.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    path: &PathGeometry,
    now_ms: f64,
    guidance: Guidance,
    projectile_speed: f64,
    spawn_order: &mut u64,
    events: &mut Vec<GameEvent>,
) {
    let candidates = live_enemies(world, path);
    let mut launched = Vec::new();

    for entity in in_spawn_order::<Tower>(world) {
        let Ok(mut tower) = world.get::<&mut Tower>(entity) else {
            continue;
        };
        let Some(target) = tower.acquire_target(&candidates) else {
            continue;
        };
        if !tower.ready_to_fire(now_ms) {
            continue;
        }
        tower.mark_fired(now_ms);

        let headings = tower.volley_headings(target.position);
        for &heading in &headings {
            launched.push(world_setup::build_projectile(
                guidance,
                tower.position,
                heading,
                projectile_speed,
                tower.damage(),
                target.entity,
            ));
        }
        events.push(GameEvent::TowerFired {
            tower: entity_id(entity),
            target: entity_id(target.entity),
            projectiles: headings.len() as u32,
        });
    }

    for projectile in launched {
        world_setup::spawn_projectile(world, spawn_order, projectile);
    }
}
