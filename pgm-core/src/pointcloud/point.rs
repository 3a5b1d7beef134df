use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point { x, y, z }
    }
}

// The maximum and minimum coordinate values over a set of points.
// An empty set leaves min at f64::MAX and max at f64::MIN.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingVolume {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Default for BoundingVolume {
    fn default() -> Self {
        BoundingVolume {
            min: [f64::MAX, f64::MAX, f64::MAX],
            max: [f64::MIN, f64::MIN, f64::MIN],
        }
    }
}

impl BoundingVolume {
    pub fn expand(&mut self, point: &Point) {
        self.max[0] = self.max[0].max(point.x);
        self.max[1] = self.max[1].max(point.y);
        self.max[2] = self.max[2].max(point.z);
        self.min[0] = self.min[0].min(point.x);
        self.min[1] = self.min[1].min(point.y);
        self.min[2] = self.min[2].min(point.z);
    }

    pub fn from_points(points: &[Point]) -> Self {
        let mut volume = BoundingVolume::default();
        for point in points {
            volume.expand(point);
        }
        volume
    }
}

#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub point_count: usize,
    pub bounding_volume: BoundingVolume,
}

#[derive(Debug, Clone)]
pub struct PointCloud {
    pub points: Vec<Point>,
    pub metadata: Metadata,
}

impl PointCloud {
    pub fn new(points: Vec<Point>) -> Self {
        let bounding_volume = BoundingVolume::from_points(&points);
        let metadata = Metadata {
            point_count: points.len(),
            bounding_volume,
        };
        PointCloud { points, metadata }
    }

    /// Minimum elevation across all points. Computed once at construction.
    pub fn z_min(&self) -> f64 {
        self.metadata.bounding_volume.min[2]
    }

    /// Maximum elevation across all points. Computed once at construction.
    pub fn z_max(&self) -> f64 {
        self.metadata.bounding_volume.max[2]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_volume_tracks_z_extremes() {
        let points = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 1.0),
            Point::new(2.0, 2.0, 2.0),
            Point::new(3.0, 3.0, 3.0),
        ];
        let cloud = PointCloud::new(points);

        assert_eq!(cloud.z_min(), 0.0);
        assert_eq!(cloud.z_max(), 3.0);
        assert_eq!(cloud.metadata.point_count, 4);
        for point in cloud.iter() {
            assert!(cloud.z_min() <= point.z && point.z <= cloud.z_max());
        }
    }

    #[test]
    fn test_bounding_volume_negative_coordinates() {
        let cloud = PointCloud::new(vec![
            Point::new(-5.0, 2.0, -1.5),
            Point::new(3.0, -4.0, 2.5),
        ]);
        assert_eq!(cloud.metadata.bounding_volume.min, [-5.0, -4.0, -1.5]);
        assert_eq!(cloud.metadata.bounding_volume.max, [3.0, 2.0, 2.5]);
    }
}
