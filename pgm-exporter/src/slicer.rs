use std::io;
use std::path::{Path, PathBuf};

use pgm_core::error::SliceError;
use pgm_core::grid::rasterize;
use pgm_core::pointcloud::point::Point;
use pgm_core::pointcloud::store::GeometryStore;

use crate::metadata::MapMetadata;
use crate::pgm::write_pgm;

pub const DEFAULT_MIN_OCCUPIED_POINTS: u32 = 1;

/// The capability set a front end needs: load a cloud, filter a slab for
/// preview, and convert a slab to a PGM/YAML map pair.
pub trait MapSlicer {
    fn load(&mut self, points: Vec<Point>) -> Result<(), SliceError>;

    fn filter(&self, min_z: f64, max_z: f64) -> Vec<Point>;

    #[allow(clippy::too_many_arguments)]
    fn convert(
        &self,
        min_z: f64,
        max_z: f64,
        resolution: f64,
        output_dir: &Path,
        output_filename: &str,
        occupied_thresh: f64,
        free_thresh: f64,
        negate: u8,
    ) -> Result<(PathBuf, PathBuf), SliceError>;
}

pub struct PgmSlicer {
    store: GeometryStore,
    pub min_occupied_points: u32,
}

impl Default for PgmSlicer {
    fn default() -> Self {
        Self::new()
    }
}

impl PgmSlicer {
    pub fn new() -> Self {
        PgmSlicer {
            store: GeometryStore::new(),
            min_occupied_points: DEFAULT_MIN_OCCUPIED_POINTS,
        }
    }

    pub fn with_store(store: GeometryStore) -> Self {
        PgmSlicer {
            store,
            min_occupied_points: DEFAULT_MIN_OCCUPIED_POINTS,
        }
    }

    pub fn store(&self) -> &GeometryStore {
        &self.store
    }
}

impl MapSlicer for PgmSlicer {
    fn load(&mut self, points: Vec<Point>) -> Result<(), SliceError> {
        self.store.load(points)
    }

    fn filter(&self, min_z: f64, max_z: f64) -> Vec<Point> {
        self.store.filter(min_z, max_z)
    }

    /// Composes filter -> rasterize -> encode. The PGM is written before the
    /// metadata, so a metadata failure surfaces with the PGM already on disk
    /// and the caller can clean up.
    fn convert(
        &self,
        min_z: f64,
        max_z: f64,
        resolution: f64,
        output_dir: &Path,
        output_filename: &str,
        occupied_thresh: f64,
        free_thresh: f64,
        negate: u8,
    ) -> Result<(PathBuf, PathBuf), SliceError> {
        if !output_dir.is_dir() {
            return Err(SliceError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("output directory does not exist: {}", output_dir.display()),
            )));
        }

        let subset = self.store.filter(min_z, max_z);
        let grid = rasterize(&subset, resolution, self.store.bounding_volume())?;

        let pgm_path = output_dir.join(output_filename);
        write_pgm(&pgm_path, &grid, negate, self.min_occupied_points)?;

        let yaml_path = pgm_path.with_extension("yaml");
        let metadata = MapMetadata {
            image: output_filename.to_string(),
            resolution,
            origin: grid.origin,
            negate,
            occupied_thresh,
            free_thresh,
        };
        metadata.write_yaml(&yaml_path)?;

        Ok((pgm_path, yaml_path))
    }
}
