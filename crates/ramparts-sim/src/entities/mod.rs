//! ECS components for enemies, towers and projectiles.
//!
//! Each entity kind is a small state machine. The methods here only touch
//! the component itself; systems resolve interactions between entities and
//! apply economy side effects.

pub mod enemy;
pub mod projectile;
pub mod tower;

pub use enemy::Enemy;
pub use projectile::Projectile;
pub use tower::{TargetCandidate, Tower};

use hecs::Entity;
use ramparts_core::types::EntityId;

/// Monotonic creation index. Systems sort by it so iteration order is spawn
/// order regardless of how the ECS lays entities out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpawnOrder(pub u64);

/// Public id for an ECS handle.
pub fn entity_id(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

/// ECS handle for a public id. Ids that were never valid resolve to None;
/// ids of despawned entities resolve to a handle the world no longer contains.
pub fn entity_from_id(id: EntityId) -> Option<Entity> {
    Entity::from_bits(id.0)
}
