//! Per-pixel reducers merging aligned frames into one image.

pub mod brightest;
pub mod mean;
pub mod median;

use crate::error::{Result, StarpackError};
use crate::frame::ColorFrame;

pub use brightest::brightest_stack;
pub use mean::mean_stack;
pub use median::median_stack;

/// Common `(height, width)` of a non-empty batch.
pub(crate) fn common_dim(frames: &[ColorFrame]) -> Result<(usize, usize)> {
    let first = frames.first().ok_or(StarpackError::EmptySequence)?;
    let expected = first.dim();
    for frame in &frames[1..] {
        if frame.dim() != expected {
            return Err(StarpackError::DimensionMismatch {
                expected,
                actual: frame.dim(),
            });
        }
    }
    Ok(expected)
}
