use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use pgm_core::error::SliceError;

/// Companion map metadata, consumed by downstream map-loading tooling.
/// The thresholds are recorded for the consumer's own interpretation; the
/// raster itself stays binary occupied/free.
#[derive(Debug, Clone)]
pub struct MapMetadata {
    pub image: String,
    pub resolution: f64,
    pub origin: [f64; 2],
    pub negate: u8,
    pub occupied_thresh: f64,
    pub free_thresh: f64,
}

impl MapMetadata {
    pub fn write_yaml(&self, path: &Path) -> Result<(), SliceError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "image: {}", self.image)?;
        writeln!(writer, "resolution: {}", self.resolution)?;
        writeln!(
            writer,
            "origin: [{}, {}, 0.0]",
            self.origin[0], self.origin[1]
        )?;
        writeln!(writer, "negate: {}", self.negate)?;
        writeln!(writer, "occupied_thresh: {}", self.occupied_thresh)?;
        writeln!(writer, "free_thresh: {}", self.free_thresh)?;

        writer.flush()?;
        Ok(())
    }
}
