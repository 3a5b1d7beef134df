use crate::pointcloud::point::Point;

/// Returns the points whose elevation lies in `[min_z, max_z]` (inclusive).
/// An inverted range yields an empty subset rather than an error; clamping
/// or swapping the bounds is the caller's concern.
pub fn filter_slab(points: &[Point], min_z: f64, max_z: f64) -> Vec<Point> {
    points
        .iter()
        .filter(|p| p.z >= min_z && p.z <= max_z)
        .copied()
        .collect()
}
