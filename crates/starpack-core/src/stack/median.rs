use ndarray::{Array2, ArrayViewMut1, Axis};
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::Result;
use crate::frame::{ColorFrame, Frame};

use super::common_dim;

/// Stack frames by computing the per-channel median at each pixel.
///
/// Uses `select_nth_unstable` for O(n) median without full sort.
pub fn median_stack(frames: &[ColorFrame]) -> Result<ColorFrame> {
    common_dim(frames)?;
    let [red, green, blue] = [0, 1, 2].map(|channel| {
        let planes: Vec<&Frame> = frames.iter().map(|f| f.channels()[channel]).collect();
        median_channel(&planes)
    });
    Ok(ColorFrame { red, green, blue })
}

fn median_channel(frames: &[&Frame]) -> Frame {
    let (h, w) = frames[0].data.dim();
    let n = frames.len();
    let mut result = Array2::<f32>::zeros((h, w));

    let median_row = |row: usize, mut out: ArrayViewMut1<f32>, pixel_values: &mut [f32]| {
        for (col, px) in out.iter_mut().enumerate() {
            for (i, frame) in frames.iter().enumerate() {
                pixel_values[i] = frame.data[[row, col]];
            }
            *px = compute_median(pixel_values);
        }
    };

    if h * w >= PARALLEL_PIXEL_THRESHOLD && n > 1 {
        // Row-parallel: each row allocates its own pixel_values
        result
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, out)| {
                let mut pixel_values = vec![0.0f32; n];
                median_row(row, out, &mut pixel_values);
            });
    } else {
        let mut pixel_values = vec![0.0f32; n];
        for (row, out) in result.axis_iter_mut(Axis(0)).enumerate() {
            median_row(row, out, &mut pixel_values);
        }
    }

    Frame::new(result)
}

fn compute_median(pixel_values: &mut [f32]) -> f32 {
    let n = pixel_values.len();
    if n == 1 {
        pixel_values[0]
    } else if n % 2 == 1 {
        let mid = n / 2;
        *pixel_values
            .select_nth_unstable_by(mid, |a, b| a.total_cmp(b))
            .1
    } else {
        let mid = n / 2;
        pixel_values.select_nth_unstable_by(mid, |a, b| a.total_cmp(b));
        pixel_values[..mid].select_nth_unstable_by(mid - 1, |a, b| a.total_cmp(b));
        (pixel_values[mid - 1] + pixel_values[mid]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::compute_median;

    #[test]
    fn median_odd_and_even() {
        assert_eq!(compute_median(&mut [3.0, 1.0, 2.0]), 2.0);
        assert_eq!(compute_median(&mut [4.0, 1.0, 3.0, 2.0]), 2.5);
    }
}
