pub mod metadata;
pub mod pgm;
pub mod slicer;

pub use slicer::{MapSlicer, PgmSlicer};
