//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D point or vector on the playfield (x = right, y = down, in pixels).
pub type Point = glam::DVec2;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in milliseconds.
    pub elapsed_ms: f64,
}

impl SimTime {
    /// Advance by one tick of `dt_ms` simulated milliseconds.
    pub fn advance(&mut self, dt_ms: f64) {
        self.tick += 1;
        self.elapsed_ms += dt_ms;
    }
}

/// Stable public handle for a simulation entity.
///
/// Wraps the bit pattern of a generation-tagged ECS handle, so an id kept
/// after its entity was removed resolves to "not found" instead of aliasing
/// whatever reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{:x}", self.0)
    }
}

/// Axis-aligned play area, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f64,
    pub height: f64,
}

impl Playfield {
    /// Whether `point` lies inside the rectangle (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }

    /// Whether `point` lies at least `margin` away from every edge.
    pub fn contains_with_margin(&self, point: Point, margin: f64) -> bool {
        point.x >= margin
            && point.x <= self.width - margin
            && point.y >= margin
            && point.y <= self.height - margin
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: crate::constants::PLAYFIELD_WIDTH,
            height: crate::constants::PLAYFIELD_HEIGHT,
        }
    }
}
