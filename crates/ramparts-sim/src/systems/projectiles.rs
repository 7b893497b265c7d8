//! Projectile flight and hit resolution.
//!
//! A projectile hits at most one enemy. A kill removes the enemy from the
//! working set at once, so later projectiles this tick can neither hit it
//! nor home on it.

use hecs::{Entity, World};

use ramparts_core::events::GameEvent;
use ramparts_core::state::RunState;
use ramparts_core::types::Playfield;

use crate::economy::Economy;
use crate::entities::{entity_id, Enemy, Projectile};
use crate::path::PathGeometry;

use super::in_spawn_order;
use super::tower_fire::live_enemies;

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    path: &PathGeometry,
    playfield: &Playfield,
    dt_secs: f64,
    economy: &Economy,
    run: &mut RunState,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();
    let mut live = live_enemies(world, path);

    for entity in in_spawn_order::<Projectile>(world) {
        let Ok(mut projectile) = world.get::<&mut Projectile>(entity) else {
            continue;
        };

        match projectile.target() {
            Some(target) => match live.iter().find(|c| c.entity == target) {
                Some(candidate) => projectile.steer_towards(candidate.position, dt_secs),
                None => {
                    events.push(GameEvent::ProjectileMissed {
                        position: projectile.position,
                    });
                    despawn_buffer.push(entity);
                    continue;
                }
            },
            None => {
                projectile.advance(dt_secs);
                if !playfield.contains(projectile.position) {
                    events.push(GameEvent::ProjectileMissed {
                        position: projectile.position,
                    });
                    despawn_buffer.push(entity);
                    continue;
                }
            }
        }

        let Some(index) = live
            .iter()
            .position(|candidate| projectile.check_collision(candidate.position))
        else {
            continue;
        };
        let damage = projectile.damage;
        drop(projectile);
        despawn_buffer.push(entity);

        let victim = live[index].entity;
        let Ok(mut enemy) = world.get::<&mut Enemy>(victim) else {
            continue;
        };
        if !enemy.apply_damage(damage) {
            continue;
        }
        let (kind, reward) = (enemy.kind, enemy.reward());
        drop(enemy);

        economy.reward_kill(run, reward);
        live.remove(index);
        despawn_buffer.push(victim);
        events.push(GameEvent::EnemyKilled {
            enemy: entity_id(victim),
            kind,
            reward,
        });
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
