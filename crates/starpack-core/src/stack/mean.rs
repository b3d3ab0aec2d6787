use ndarray::Array2;

use crate::error::Result;
use crate::frame::{ColorFrame, Frame};

use super::common_dim;

/// Stack frames by computing the per-channel mean at each pixel.
pub fn mean_stack(frames: &[ColorFrame]) -> Result<ColorFrame> {
    let (h, w) = common_dim(frames)?;
    let [red, green, blue] = [0, 1, 2].map(|channel| {
        let mut sum = Array2::<f32>::zeros((h, w));
        for frame in frames {
            sum += &frame.channels()[channel].data;
        }
        sum /= frames.len() as f32;
        Frame::new(sum)
    });
    Ok(ColorFrame { red, green, blue })
}
