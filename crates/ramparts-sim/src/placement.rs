//! Tower placement validation.
//!
//! Checked in order: playfield margin, path clearance, spacing to other
//! towers. Gold is the caller's concern.

use ramparts_core::errors::PlacementError;
use ramparts_core::types::{Playfield, Point};

use crate::config::SimConfig;
use crate::path::PathGeometry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRules {
    pub playfield: Playfield,
    pub edge_margin: f64,
    pub path_clearance: f64,
    pub min_tower_separation: f64,
}

impl PlacementRules {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            playfield: config.playfield,
            edge_margin: config.placement_edge_margin,
            path_clearance: config.path_clearance,
            min_tower_separation: config.min_tower_separation,
        }
    }

    pub fn validate(
        &self,
        position: Point,
        path: &PathGeometry,
        towers: impl IntoIterator<Item = Point>,
    ) -> Result<(), PlacementError> {
        if !position.is_finite() || !self.playfield.contains_with_margin(position, self.edge_margin) {
            return Err(PlacementError::OutOfBounds);
        }
        if path.distance_to_path(position) < self.path_clearance {
            return Err(PlacementError::OnPath);
        }
        if towers
            .into_iter()
            .any(|tower| tower.distance(position) < self.min_tower_separation)
        {
            return Err(PlacementError::TooCloseToTower);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> PlacementRules {
        PlacementRules::from_config(&SimConfig::default())
    }

    #[test]
    fn test_open_ground_is_valid() {
        let path = PathGeometry::default();
        assert_eq!(rules().validate(Point::new(100.0, 200.0), &path, []), Ok(()));
    }

    #[test]
    fn test_rejects_positions_near_the_path() {
        let path = PathGeometry::default();
        assert_eq!(
            rules().validate(Point::new(100.0, 300.0), &path, []),
            Err(PlacementError::OnPath)
        );
        assert_eq!(
            rules().validate(Point::new(100.0, 266.0), &path, []),
            Err(PlacementError::OnPath)
        );
        assert_eq!(rules().validate(Point::new(100.0, 265.0), &path, []), Ok(()));
    }

    #[test]
    fn test_rejects_edges_and_non_finite() {
        let path = PathGeometry::default();
        assert_eq!(
            rules().validate(Point::new(14.0, 100.0), &path, []),
            Err(PlacementError::OutOfBounds)
        );
        assert_eq!(
            rules().validate(Point::new(f64::NAN, 100.0), &path, []),
            Err(PlacementError::OutOfBounds)
        );
    }

    #[test]
    fn test_rejects_crowding_other_towers() {
        let path = PathGeometry::default();
        let existing = [Point::new(100.0, 200.0)];
        assert_eq!(
            rules().validate(Point::new(120.0, 200.0), &path, existing),
            Err(PlacementError::TooCloseToTower)
        );
        assert_eq!(rules().validate(Point::new(135.0, 200.0), &path, existing), Ok(()));
    }

    #[test]
    fn test_bounds_checked_before_path() {
        let path = PathGeometry::default();
        assert_eq!(
            rules().validate(Point::new(5.0, 300.0), &path, []),
            Err(PlacementError::OutOfBounds)
        );
    }
}
