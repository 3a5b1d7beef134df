use thiserror::Error;

#[derive(Debug, Error)]
pub enum SliceError {
    #[error("point cloud is empty")]
    EmptyCloud,

    #[error("resolution must be a positive number, got {0}")]
    InvalidResolution(f64),

    #[error("grid of {width}x{height} cells exceeds the maximum cell count; increase the resolution")]
    GridTooLarge { width: usize, height: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
