//! Static enemy route: a polyline of waypoints.

use ramparts_core::constants::DEFAULT_PATH;
use ramparts_core::types::Point;

/// Immutable polyline the enemies walk along. Always has at least one segment.
#[derive(Debug, Clone, PartialEq)]
pub struct PathGeometry {
    points: Vec<Point>,
    lengths: Vec<f64>,
}

impl PathGeometry {
    /// Build a path from waypoints. Returns None with fewer than two points.
    pub fn new(points: Vec<Point>) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let lengths = points.windows(2).map(|w| w[0].distance(w[1])).collect();
        Some(Self { points, lengths })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn segment_count(&self) -> usize {
        self.lengths.len()
    }

    pub fn last_segment(&self) -> usize {
        self.segment_count() - 1
    }

    pub fn segment_length(&self, segment: usize) -> f64 {
        self.lengths.get(segment).copied().unwrap_or(0.0)
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    pub fn total_length(&self) -> f64 {
        self.lengths.iter().sum()
    }

    /// Interpolated position on `segment` at `progress`, clamped to [0, 1].
    /// Segments past the end resolve to the final waypoint.
    pub fn position_at(&self, segment: usize, progress: f64) -> Point {
        if segment >= self.segment_count() {
            return self.end();
        }
        let t = progress.clamp(0.0, 1.0);
        self.points[segment].lerp(self.points[segment + 1], t)
    }

    /// Distance from `point` to the closest point of `segment`
    /// (perpendicular foot clamped to the segment's endpoints).
    pub fn distance_to_segment(&self, point: Point, segment: usize) -> f64 {
        let Some(&a) = self.points.get(segment) else {
            return f64::INFINITY;
        };
        let Some(&b) = self.points.get(segment + 1) else {
            return f64::INFINITY;
        };
        let ab = b - a;
        let len_sq = ab.length_squared();
        if len_sq == 0.0 {
            return point.distance(a);
        }
        let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
        point.distance(a + ab * t)
    }

    /// Distance from `point` to the nearest segment of the whole path.
    pub fn distance_to_path(&self, point: Point) -> f64 {
        (0..self.segment_count())
            .map(|segment| self.distance_to_segment(point, segment))
            .fold(f64::INFINITY, f64::min)
    }
}

impl Default for PathGeometry {
    fn default() -> Self {
        let points = DEFAULT_PATH
            .iter()
            .map(|&(x, y)| Point::new(x, y))
            .collect::<Vec<_>>();
        let lengths = points.windows(2).map(|w| w[0].distance(w[1])).collect();
        Self { points, lengths }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_path() -> PathGeometry {
        PathGeometry::new(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 50.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_single_point() {
        assert!(PathGeometry::new(vec![Point::ZERO]).is_none());
    }

    #[test]
    fn test_position_interpolates_and_clamps() {
        let path = l_path();
        assert_eq!(path.position_at(0, 0.25), Point::new(25.0, 0.0));
        assert_eq!(path.position_at(1, 0.5), Point::new(100.0, 25.0));
        assert_eq!(path.position_at(0, 1.7), Point::new(100.0, 0.0));
        assert_eq!(path.position_at(0, -3.0), Point::new(0.0, 0.0));
        assert_eq!(path.position_at(9, 0.0), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_distance_uses_perpendicular_or_endpoint() {
        let path = l_path();
        assert_eq!(path.distance_to_segment(Point::new(50.0, 10.0), 0), 10.0);
        assert_eq!(path.distance_to_segment(Point::new(-30.0, 40.0), 0), 50.0);
        assert_eq!(path.distance_to_path(Point::new(110.0, 30.0)), 10.0);
        assert_eq!(path.distance_to_segment(Point::ZERO, 5), f64::INFINITY);
    }

    #[test]
    fn test_zero_length_segment_measures_to_point() {
        let path = PathGeometry::new(vec![Point::new(10.0, 10.0), Point::new(10.0, 10.0)]).unwrap();
        assert_eq!(path.distance_to_segment(Point::new(13.0, 14.0), 0), 5.0);
        assert_eq!(path.segment_length(0), 0.0);
    }

    #[test]
    fn test_default_path_matches_layout() {
        let path = PathGeometry::default();
        assert_eq!(path.segment_count(), 7);
        assert_eq!(path.start(), Point::new(0.0, 300.0));
        assert_eq!(path.end(), Point::new(800.0, 300.0));
        assert_eq!(path.total_length(), 200.0 + 150.0 + 200.0 + 300.0 + 200.0 + 150.0 + 200.0);
    }
}
