use ramparts_core::enums::{EnemyKind, EnemyState};
use ramparts_core::types::Point;

use crate::path::PathGeometry;

/// One enemy walking the path.
///
/// Alive -> Dead (health exhausted) or Alive -> Leaked (walked off the last
/// segment). Health never increases and never leaves [0, max_health].
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    health: u32,
    max_health: u32,
    segment: usize,
    progress: f64,
    state: EnemyState,
}

impl Enemy {
    /// Fresh enemy at the path start with full health.
    pub fn new(kind: EnemyKind) -> Self {
        let health = kind.stats().health;
        Self {
            kind,
            health,
            max_health: health,
            segment: 0,
            progress: 0.0,
            state: EnemyState::Alive,
        }
    }

    /// Move a freshly constructed enemy to a saved location and health.
    /// Out-of-range values are clamped onto the path and into [1, max_health].
    pub fn restore(&mut self, path: &PathGeometry, segment: usize, progress: f64, health: Option<u32>) {
        self.segment = segment.min(path.last_segment());
        self.progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if let Some(health) = health {
            self.health = health.clamp(1, self.max_health);
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn segment(&self) -> usize {
        self.segment
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state == EnemyState::Alive
    }

    pub fn reward(&self) -> u32 {
        self.kind.stats().reward
    }

    pub fn speed(&self) -> f64 {
        self.kind.stats().speed
    }

    pub fn position(&self, path: &PathGeometry) -> Point {
        path.position_at(self.segment, self.progress)
    }

    /// Walk `distance` pixels along the path, carrying any overshoot into the
    /// following segments. Saturating the last segment leaks the enemy.
    pub fn advance(&mut self, distance: f64, path: &PathGeometry) -> EnemyState {
        if !self.is_alive() {
            return self.state;
        }
        let mut remaining = distance.max(0.0);
        loop {
            let length = path.segment_length(self.segment);
            let to_end = (1.0 - self.progress) * length;
            if remaining < to_end {
                self.progress += remaining / length;
                break;
            }
            remaining -= to_end;
            if self.segment >= path.last_segment() {
                self.progress = 1.0;
                self.state = EnemyState::Leaked;
                break;
            }
            self.segment += 1;
            self.progress = 0.0;
        }
        self.state
    }

    /// Subtract `amount` health. Returns true only for the hit that kills,
    /// so the kill reward can be granted exactly once.
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.state = EnemyState::Dead;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_path() -> PathGeometry {
        PathGeometry::new(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_enemy_starts_at_path_start_with_full_health() {
        let path = straight_path();
        let enemy = Enemy::new(EnemyKind::Orc);
        assert_eq!(enemy.health(), 100);
        assert_eq!(enemy.max_health(), 100);
        assert_eq!(enemy.position(&path), Point::new(0.0, 0.0));
        assert!(enemy.is_alive());
    }

    #[test]
    fn test_advance_carries_remainder_into_next_segment() {
        let path = straight_path();
        let mut enemy = Enemy::new(EnemyKind::Goblin);
        enemy.advance(60.0, &path);
        assert_eq!(enemy.segment(), 0);
        assert!((enemy.progress() - 0.6).abs() < 1e-12);

        enemy.advance(65.0, &path);
        assert_eq!(enemy.segment(), 1);
        assert!((enemy.progress() - 0.25).abs() < 1e-9);
        assert!(enemy.position(&path).distance(Point::new(100.0, 25.0)) < 1e-9);
    }

    #[test]
    fn test_saturating_last_segment_leaks() {
        let path = straight_path();
        let mut enemy = Enemy::new(EnemyKind::Goblin);
        assert_eq!(enemy.advance(199.0, &path), EnemyState::Alive);
        assert_eq!(enemy.advance(5.0, &path), EnemyState::Leaked);
        assert_eq!(enemy.segment(), 1);
        assert_eq!(enemy.progress(), 1.0);
        // Terminal: further movement is ignored.
        assert_eq!(enemy.advance(50.0, &path), EnemyState::Leaked);
    }

    #[test]
    fn test_skips_zero_length_segments() {
        let path = PathGeometry::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
        ])
        .unwrap();
        let mut enemy = Enemy::new(EnemyKind::Goblin);
        enemy.advance(15.0, &path);
        assert_eq!(enemy.segment(), 2);
        assert_eq!(enemy.position(&path), Point::new(15.0, 0.0));
    }

    #[test]
    fn test_lethal_damage_reported_exactly_once() {
        let mut enemy = Enemy::new(EnemyKind::Goblin);
        assert!(!enemy.apply_damage(30));
        assert_eq!(enemy.health(), 20);
        assert!(enemy.apply_damage(30));
        assert_eq!(enemy.health(), 0);
        assert_eq!(enemy.state(), EnemyState::Dead);
        assert!(!enemy.apply_damage(30));
        assert_eq!(enemy.health(), 0);
    }

    #[test]
    fn test_leaked_enemy_ignores_damage() {
        let path = straight_path();
        let mut enemy = Enemy::new(EnemyKind::Goblin);
        enemy.advance(500.0, &path);
        assert!(!enemy.apply_damage(100));
        assert_eq!(enemy.health(), 50);
    }

    #[test]
    fn test_restore_clamps_onto_path() {
        let path = straight_path();
        let mut enemy = Enemy::new(EnemyKind::Troll);
        enemy.restore(&path, 7, 3.0, Some(999));
        assert_eq!(enemy.segment(), 1);
        assert_eq!(enemy.progress(), 1.0);
        assert_eq!(enemy.health(), 200);

        let mut enemy = Enemy::new(EnemyKind::Troll);
        enemy.restore(&path, 0, f64::NAN, Some(0));
        assert_eq!(enemy.progress(), 0.0);
        assert_eq!(enemy.health(), 1);
    }
}
