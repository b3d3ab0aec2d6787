use thiserror::Error;

use crate::starmap::Bounds;

#[derive(Error, Debug)]
pub enum StarpackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("No stars detected")]
    NoStarsDetected,

    #[error("Star map bounds differ: reference {reference}, candidate {candidate}")]
    BoundsMismatch { reference: Bounds, candidate: Bounds },

    #[error("Invalid star at ({x}, {y}) with size {size}")]
    InvalidStar { x: f64, y: f64, size: f64 },

    #[error("Alignment failed: no candidate offset was evaluated")]
    AlignmentFailed,

    #[error("Invalid brightness threshold: {0}")]
    InvalidThreshold(f64),

    #[error("Invalid search window: {0}")]
    InvalidSearchWindow(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Frame dimensions differ: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Frame index {index} out of range (total: {total})")]
    FrameIndexOutOfRange { index: usize, total: usize },

    #[error("Empty frame sequence")]
    EmptySequence,

    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

pub type Result<T> = std::result::Result<T, StarpackError>;
