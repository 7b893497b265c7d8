//! Enemy movement along the path and leak resolution.

use hecs::{Entity, World};

use ramparts_core::enums::EnemyState;
use ramparts_core::events::GameEvent;
use ramparts_core::state::RunState;

use crate::economy::Economy;
use crate::entities::{entity_id, Enemy};
use crate::path::PathGeometry;

use super::in_spawn_order;

/// Advance every live enemy by `speed * dt_secs`. Leaked enemies cost the
/// fixed penalty and are removed. Returns true as soon as lives run out;
/// enemies after that point do not move this tick.
pub fn run(
    world: &mut World,
    path: &PathGeometry,
    dt_secs: f64,
    economy: &Economy,
    run: &mut RunState,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) -> bool {
    despawn_buffer.clear();
    let mut defeated = false;

    for entity in in_spawn_order::<Enemy>(world) {
        let Ok(mut enemy) = world.get::<&mut Enemy>(entity) else {
            continue;
        };
        let distance = enemy.speed() * dt_secs;
        if enemy.advance(distance, path) != EnemyState::Leaked {
            continue;
        }
        let kind = enemy.kind;
        drop(enemy);

        despawn_buffer.push(entity);
        let lives_before = run.lives;
        defeated = economy.charge_leak(run);
        events.push(GameEvent::EnemyLeaked {
            enemy: entity_id(entity),
            kind,
            lives_lost: lives_before - run.lives,
        });
        tracing::debug!(enemy = %entity_id(entity), kind = kind.as_str(), lives = run.lives, "enemy_leaked");
        if defeated {
            break;
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    defeated
}
