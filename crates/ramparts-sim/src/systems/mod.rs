//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` plus the run state they
//! touch. They never own state; iteration is always in spawn order.

pub mod movement;
pub mod projectiles;
pub mod snapshot;
pub mod tower_fire;

use hecs::{Component, Entity, World};

use crate::entities::SpawnOrder;

/// Entities carrying component `T`, oldest first.
pub fn in_spawn_order<T: Component>(world: &World) -> Vec<Entity> {
    let mut found: Vec<(SpawnOrder, Entity)> = world
        .query::<(&T, &SpawnOrder)>()
        .iter()
        .map(|(entity, (_, order))| (*order, entity))
        .collect();
    found.sort_by_key(|(order, _)| *order);
    found.into_iter().map(|(_, entity)| entity).collect()
}
