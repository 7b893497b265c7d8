use hecs::Entity;

use ramparts_core::constants::{ENEMY_HIT_RADIUS, PROJECTILE_RADIUS};
use ramparts_core::types::Point;

/// A munition in flight. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Point,
    /// Pixels per second.
    pub velocity: Point,
    pub damage: u32,
    /// Locked target of a homing projectile. Non-owning.
    target: Option<Entity>,
}

impl Projectile {
    /// Projectile flying along `heading` (radians) until it hits something or
    /// leaves the playfield.
    pub fn straight(origin: Point, heading: f64, speed: f64, damage: u32) -> Self {
        Self {
            position: origin,
            velocity: Point::from_angle(heading) * speed,
            damage,
            target: None,
        }
    }

    /// Projectile launched along `heading` that re-aims at `target` every tick.
    pub fn homing(origin: Point, heading: f64, speed: f64, damage: u32, target: Entity) -> Self {
        Self {
            target: Some(target),
            ..Self::straight(origin, heading, speed, damage)
        }
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    pub fn is_homing(&self) -> bool {
        self.target.is_some()
    }

    /// Straight-line move over `dt_secs`.
    pub fn advance(&mut self, dt_secs: f64) {
        self.position += self.velocity * dt_secs;
    }

    /// Turn towards `aim` and move over `dt_secs`. A step that would pass
    /// the aim point stops on it instead.
    pub fn steer_towards(&mut self, aim: Point, dt_secs: f64) {
        let speed = self.velocity.length();
        let offset = aim - self.position;
        let distance = offset.length();
        let step = speed * dt_secs;
        if distance <= step || distance == 0.0 {
            self.position = aim;
            if distance > 0.0 {
                self.velocity = offset / distance * speed;
            }
            return;
        }
        self.velocity = offset / distance * speed;
        self.position += self.velocity * dt_secs;
    }

    /// Whether the projectile overlaps an enemy body centred at `enemy`.
    pub fn check_collision(&self, enemy: Point) -> bool {
        self.position.distance(enemy) < PROJECTILE_RADIUS + ENEMY_HIT_RADIUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_projectile_keeps_heading() {
        let mut p = Projectile::straight(Point::ZERO, 0.0, 300.0, 10);
        p.advance(0.5);
        assert!(p.position.distance(Point::new(150.0, 0.0)) < 1e-9);
        assert!(!p.is_homing());
    }

    #[test]
    fn test_homing_projectile_turns_and_clamps_onto_target() {
        let mut world = hecs::World::new();
        let enemy = world.spawn(());
        let mut p = Projectile::homing(Point::ZERO, 0.0, 300.0, 10, enemy);
        assert!(p.is_homing());

        p.steer_towards(Point::new(0.0, 100.0), 0.1);
        assert!(p.position.distance(Point::new(0.0, 30.0)) < 1e-9);
        assert!((p.velocity.length() - 300.0).abs() < 1e-9);

        p.steer_towards(Point::new(0.0, 40.0), 0.1);
        assert_eq!(p.position, Point::new(0.0, 40.0));
    }

    #[test]
    fn test_collision_uses_combined_radii_exclusive() {
        let p = Projectile::straight(Point::ZERO, 0.0, 300.0, 10);
        assert!(p.check_collision(Point::new(10.9, 0.0)));
        assert!(!p.check_collision(Point::new(11.0, 0.0)));
    }
}
