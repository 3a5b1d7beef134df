use crate::error::SliceError;
use crate::pointcloud::decimation::decimator::{PointCloudDecimator, VoxelDecimator};
use crate::pointcloud::filter::filter_slab;
use crate::pointcloud::point::{BoundingVolume, Point, PointCloud};

pub const DEFAULT_DISPLAY_VOXEL_SIZE: f64 = 0.1;

/// Owns the loaded point cloud and answers slab-filter queries against it.
/// One cloud per session; loading again replaces the previous cloud. The
/// store is synchronous and not internally synchronized, so concurrent
/// callers must serialize access themselves.
pub struct GeometryStore {
    cloud: Option<PointCloud>,
    display_points: Option<Vec<Point>>,
    display_voxel_size: f64,
}

impl Default for GeometryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryStore {
    pub fn new() -> Self {
        GeometryStore {
            cloud: None,
            display_points: None,
            display_voxel_size: DEFAULT_DISPLAY_VOXEL_SIZE,
        }
    }

    pub fn with_display_voxel_size(voxel_size: f64) -> Self {
        GeometryStore {
            cloud: None,
            display_points: None,
            display_voxel_size: voxel_size,
        }
    }

    /// Stores a new cloud, computing the overall z range and a voxel-thinned
    /// display copy in one pass each. Errors on an empty point sequence.
    pub fn load(&mut self, points: Vec<Point>) -> Result<(), SliceError> {
        if points.is_empty() {
            return Err(SliceError::EmptyCloud);
        }

        let cloud = PointCloud::new(points);

        let decimator = VoxelDecimator {
            voxel_size: self.display_voxel_size,
        };
        let display_points = decimator.decimate(&cloud.points);
        self.display_points = if display_points.is_empty() {
            None
        } else {
            Some(display_points)
        };

        self.cloud = Some(cloud);
        Ok(())
    }

    pub fn cloud(&self) -> Option<&PointCloud> {
        self.cloud.as_ref()
    }

    pub fn point_count(&self) -> usize {
        self.cloud
            .as_ref()
            .map(|c| c.metadata.point_count)
            .unwrap_or(0)
    }

    pub fn overall_z_min(&self) -> Option<f64> {
        self.cloud.as_ref().map(|c| c.z_min())
    }

    pub fn overall_z_max(&self) -> Option<f64> {
        self.cloud.as_ref().map(|c| c.z_max())
    }

    pub fn bounding_volume(&self) -> Option<&BoundingVolume> {
        self.cloud.as_ref().map(|c| &c.metadata.bounding_volume)
    }

    /// Slab filter over the raw cloud. Returns an empty subset when nothing
    /// is loaded or the range is inverted.
    pub fn filter(&self, min_z: f64, max_z: f64) -> Vec<Point> {
        match &self.cloud {
            Some(cloud) => filter_slab(&cloud.points, min_z, max_z),
            None => Vec::new(),
        }
    }

    /// Slab filter over the decimated display cloud, for interactive
    /// preview. `None` means there is nothing to draw.
    pub fn display_subset(&self, min_z: f64, max_z: f64) -> Option<Vec<Point>> {
        let display = self.display_points.as_ref()?;
        let filtered = filter_slab(display, min_z, max_z);
        if filtered.is_empty() {
            None
        } else {
            Some(filtered)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_store() -> GeometryStore {
        let mut store = GeometryStore::new();
        store
            .load(vec![
                Point::new(0.0, 0.0, 0.0),
                Point::new(1.0, 1.0, 1.0),
                Point::new(2.0, 2.0, 2.0),
                Point::new(3.0, 3.0, 3.0),
            ])
            .unwrap();
        store
    }

    #[test]
    fn test_load_computes_overall_z_range() {
        let store = loaded_store();
        assert_eq!(store.overall_z_min(), Some(0.0));
        assert_eq!(store.overall_z_max(), Some(3.0));
        assert_eq!(store.point_count(), 4);
    }

    #[test]
    fn test_load_rejects_empty_cloud() {
        let mut store = GeometryStore::new();
        assert!(matches!(store.load(vec![]), Err(SliceError::EmptyCloud)));
    }

    #[test]
    fn test_load_replaces_previous_cloud() {
        let mut store = loaded_store();
        store.load(vec![Point::new(5.0, 5.0, 5.0)]).unwrap();
        assert_eq!(store.point_count(), 1);
        assert_eq!(store.overall_z_min(), Some(5.0));
    }

    #[test]
    fn test_filter_matches_slab_bounds() {
        let store = loaded_store();
        let subset = store.filter(1.0, 2.0);
        assert_eq!(subset.len(), 2);
        assert!(subset.iter().all(|p| p.z >= 1.0 && p.z <= 2.0));
    }

    #[test]
    fn test_filter_without_cloud_is_empty() {
        let store = GeometryStore::new();
        assert!(store.filter(0.0, 10.0).is_empty());
    }

    #[test]
    fn test_display_subset_none_when_out_of_range() {
        let store = loaded_store();
        assert!(store.display_subset(10.0, 20.0).is_none());
        assert!(store.display_subset(0.0, 3.0).is_some());
    }
}
