use std::collections::HashMap;

use crate::pointcloud::point::Point;

pub trait PointCloudDecimator {
    fn decimate(&self, points: &[Point]) -> Vec<Point>;
}

/// Keeps one representative point per voxel, the one closest to the voxel
/// center. Used to thin the display cloud for interactive preview.
pub struct VoxelDecimator {
    pub voxel_size: f64,
}

impl PointCloudDecimator for VoxelDecimator {
    fn decimate(&self, points: &[Point]) -> Vec<Point> {
        let voxel_size = self.voxel_size;
        let mut cells: HashMap<(i64, i64, i64), Vec<&Point>> = HashMap::new();

        for point in points {
            let index = self.voxel_index(point, voxel_size);
            cells.entry(index).or_default().push(point);
        }

        let mut decimated_points = Vec::with_capacity(cells.len());
        for (index, cell_points) in cells {
            let voxel_center = self.voxel_center(index, voxel_size);
            let closest = self.select_closest_point(cell_points, voxel_center);
            decimated_points.push(*closest);
        }

        decimated_points
    }
}

impl VoxelDecimator {
    fn voxel_index(&self, point: &Point, voxel_size: f64) -> (i64, i64, i64) {
        let x_idx = (point.x / voxel_size).floor() as i64;
        let y_idx = (point.y / voxel_size).floor() as i64;
        let z_idx = (point.z / voxel_size).floor() as i64;
        (x_idx, y_idx, z_idx)
    }

    fn voxel_center(&self, index: (i64, i64, i64), voxel_size: f64) -> (f64, f64, f64) {
        let (x_idx, y_idx, z_idx) = index;
        (
            (x_idx as f64 + 0.5) * voxel_size,
            (y_idx as f64 + 0.5) * voxel_size,
            (z_idx as f64 + 0.5) * voxel_size,
        )
    }

    fn select_closest_point<'a>(
        &self,
        points: Vec<&'a Point>,
        voxel_center: (f64, f64, f64),
    ) -> &'a Point {
        points
            .into_iter()
            .min_by(|a, b| {
                let dist_a = self.squared_distance(a, voxel_center);
                let dist_b = self.squared_distance(b, voxel_center);
                dist_a
                    .partial_cmp(&dist_b)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap()
    }

    fn squared_distance(&self, a: &Point, b: (f64, f64, f64)) -> f64 {
        (a.x - b.0).powi(2) + (a.y - b.1).powi(2) + (a.z - b.2).powi(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimate_collapses_points_in_same_voxel() {
        let points = vec![
            Point::new(0.01, 0.01, 0.01),
            Point::new(0.02, 0.02, 0.02),
            Point::new(0.9, 0.9, 0.9),
        ];
        let decimator = VoxelDecimator { voxel_size: 0.1 };
        let decimated = decimator.decimate(&points);
        assert_eq!(decimated.len(), 2);
    }

    #[test]
    fn test_decimate_keeps_point_closest_to_voxel_center() {
        let points = vec![Point::new(0.05, 0.05, 0.05), Point::new(0.001, 0.001, 0.001)];
        let decimator = VoxelDecimator { voxel_size: 0.1 };
        let decimated = decimator.decimate(&points);
        assert_eq!(decimated, vec![Point::new(0.05, 0.05, 0.05)]);
    }
}
