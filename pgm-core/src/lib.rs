pub mod error;
pub mod grid;
pub mod pointcloud;

pub use error::SliceError;
