use ndarray::{Array2, ArrayViewMut1, Axis};
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::Result;
use crate::frame::{ColorFrame, Frame};

use super::common_dim;

/// Keep, at each pixel, the color of the frame with the highest luminance.
/// The earliest frame wins ties.
pub fn brightest_stack(frames: &[ColorFrame]) -> Result<ColorFrame> {
    let (h, w) = common_dim(frames)?;
    let mut picks = Array2::<usize>::zeros((h, w));

    let pick_row = |row: usize, mut out: ArrayViewMut1<usize>| {
        for (col, px) in out.iter_mut().enumerate() {
            let mut best = frames[0].luminance_at(row, col);
            for (i, frame) in frames.iter().enumerate().skip(1) {
                let lum = frame.luminance_at(row, col);
                if lum > best {
                    best = lum;
                    *px = i;
                }
            }
        }
    };

    if h * w >= PARALLEL_PIXEL_THRESHOLD && frames.len() > 1 {
        picks
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, out)| pick_row(row, out));
    } else {
        for (row, out) in picks.axis_iter_mut(Axis(0)).enumerate() {
            pick_row(row, out);
        }
    }

    let [red, green, blue] = [0, 1, 2].map(|channel| {
        Frame::new(Array2::from_shape_fn((h, w), |(row, col)| {
            frames[picks[[row, col]]].channels()[channel].data[[row, col]]
        }))
    });
    Ok(ColorFrame { red, green, blue })
}
