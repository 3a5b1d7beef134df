use crate::error::SliceError;
use crate::pointcloud::point::{BoundingVolume, Point};

/// Upper bound on width * height. A too-small resolution over a large
/// bounding box trips this guard instead of exhausting memory.
pub const MAX_GRID_CELLS: usize = 250_000_000;

/// Per-cell hit counts over a horizontal grid, row 0 at maximum y so the
/// raster matches image convention (rows grow downward, map y grows upward).
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    pub width: usize,
    pub height: usize,
    pub resolution: f64,
    /// World coordinates of the lower-left grid corner (x_min, y_min).
    pub origin: [f64; 2],
    counts: Vec<u32>,
}

impl OccupancyGrid {
    pub fn count_at(&self, row: usize, col: usize) -> u32 {
        self.counts[row * self.width + col]
    }

    pub fn is_occupied(&self, row: usize, col: usize, min_occupied_points: u32) -> bool {
        self.count_at(row, col) >= min_occupied_points.max(1)
    }
}

/// Projects the filtered subset onto a horizontal grid of the given
/// resolution. An empty subset yields a degenerate 1x1 grid anchored at the
/// fallback bounds (the stored cloud's box) or the origin; it never fails.
pub fn rasterize(
    subset: &[Point],
    resolution: f64,
    fallback: Option<&BoundingVolume>,
) -> Result<OccupancyGrid, SliceError> {
    if !resolution.is_finite() || resolution <= 0.0 {
        return Err(SliceError::InvalidResolution(resolution));
    }

    if subset.is_empty() {
        let origin = match fallback {
            Some(volume) if volume.min[0] <= volume.max[0] => [volume.min[0], volume.min[1]],
            _ => [0.0, 0.0],
        };
        return Ok(OccupancyGrid {
            width: 1,
            height: 1,
            resolution,
            origin,
            counts: vec![0],
        });
    }

    let bounds = BoundingVolume::from_points(subset);
    let (min_x, min_y) = (bounds.min[0], bounds.min[1]);
    let (max_x, max_y) = (bounds.max[0], bounds.max[1]);

    let width_f = ((max_x - min_x) / resolution).ceil().max(1.0);
    let height_f = ((max_y - min_y) / resolution).ceil().max(1.0);
    if width_f * height_f > MAX_GRID_CELLS as f64 {
        return Err(SliceError::GridTooLarge {
            width: width_f as usize,
            height: height_f as usize,
        });
    }
    let width = width_f as usize;
    let height = height_f as usize;

    let mut counts = vec![0u32; width * height];
    for point in subset {
        // Clamping absorbs floating-point rounding at the max-x/min-y edge.
        let col = (((point.x - min_x) / resolution).floor() as usize).min(width - 1);
        let row = (((max_y - point.y) / resolution).floor() as usize).min(height - 1);
        let cell = &mut counts[row * width + col];
        *cell = cell.saturating_add(1);
    }

    Ok(OccupancyGrid {
        width,
        height,
        resolution,
        origin: [min_x, min_y],
        counts,
    })
}
