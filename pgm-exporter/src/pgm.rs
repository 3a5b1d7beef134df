use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use pgm_core::error::SliceError;
use pgm_core::grid::OccupancyGrid;

pub const OCCUPIED_VALUE: u8 = 0;
pub const FREE_VALUE: u8 = 254;

pub fn pixel_value(occupied: bool, negate: u8) -> u8 {
    if occupied != (negate != 0) {
        OCCUPIED_VALUE
    } else {
        FREE_VALUE
    }
}

/// Writes the grid as an ASCII ("P2") grayscale PGM. Occupied cells encode
/// as 0 and unoccupied cells as 254, swapped when `negate` is set.
pub fn write_pgm(
    path: &Path,
    grid: &OccupancyGrid,
    negate: u8,
    min_occupied_points: u32,
) -> Result<(), SliceError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P2")?;
    writeln!(writer, "{} {}", grid.width, grid.height)?;
    writeln!(writer, "255")?;

    for row in 0..grid.height {
        for col in 0..grid.width {
            let occupied = grid.is_occupied(row, col, min_occupied_points);
            if col > 0 {
                write!(writer, " ")?;
            }
            write!(writer, "{}", pixel_value(occupied, negate))?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}
