//! Apply a found [`OffsetConfig`] to a raster frame.
//!
//! The frame is translated by the integer offset and then rotated about
//! `(width / 2, height / 2)`, the same pivot [`crate::starmap::StarMap::rotate`]
//! uses, so a frame moves exactly as its star map did during the search.
//! Output dimensions equal the input; uncovered pixels are 0.

use ndarray::{Array2, Axis};
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::frame::{ColorFrame, Frame, OffsetConfig};

/// Translate, then rotate if needed, every channel of `frame`.
pub fn transform_frame(frame: &ColorFrame, offset: &OffsetConfig) -> ColorFrame {
    ColorFrame {
        red: transform_channel(&frame.red, offset),
        green: transform_channel(&frame.green, offset),
        blue: transform_channel(&frame.blue, offset),
    }
}

pub fn transform_channel(frame: &Frame, offset: &OffsetConfig) -> Frame {
    let translated = translate(frame, offset.x, offset.y);
    if offset.rotation_degrees == 0.0 {
        translated
    } else {
        rotate(&translated, offset.rotation_degrees)
    }
}

/// Move content by `(dx, dy)` pixels: output `(x, y)` takes input
/// `(x - dx, y - dy)`.
pub fn translate(frame: &Frame, dx: i32, dy: i32) -> Frame {
    let (h, w) = frame.data.dim();
    let source = |row: usize, col: usize| -> f32 {
        let src_r = row as i64 - dy as i64;
        let src_c = col as i64 - dx as i64;
        if src_r >= 0 && src_r < h as i64 && src_c >= 0 && src_c < w as i64 {
            frame.data[[src_r as usize, src_c as usize]]
        } else {
            0.0
        }
    };
    Frame::new(fill(h, w, source))
}

/// Rotate content by `degrees` about the frame center, bilinear sampled.
pub fn rotate(frame: &Frame, degrees: f64) -> Frame {
    let (h, w) = frame.data.dim();
    let cx = w as f64 / 2.0;
    let cy = h as f64 / 2.0;
    let (sin, cos) = degrees.to_radians().sin_cos();

    let source = |row: usize, col: usize| -> f32 {
        // Inverse rotation: where did this output pixel come from?
        let rx = col as f64 - cx;
        let ry = row as f64 - cy;
        let src_x = cos * rx + sin * ry + cx;
        let src_y = -sin * rx + cos * ry + cy;
        bilinear_sample(&frame.data, src_y, src_x)
    };
    Frame::new(fill(h, w, source))
}

/// Build an `h` x `w` array from a per-pixel function, row-parallel for
/// large frames.
fn fill<F>(h: usize, w: usize, value: F) -> Array2<f32>
where
    F: Fn(usize, usize) -> f32 + Sync,
{
    let mut result = Array2::<f32>::zeros((h, w));
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        result
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, mut out)| {
                for (col, px) in out.iter_mut().enumerate() {
                    *px = value(row, col);
                }
            });
    } else {
        for ((row, col), px) in result.indexed_iter_mut() {
            *px = value(row, col);
        }
    }
    result
}

/// Bilinear sample at fractional `(y, x)`; outside the frame reads as 0.
pub fn bilinear_sample(data: &Array2<f32>, y: f64, x: f64) -> f32 {
    let (h, w) = data.dim();

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    let fx = (x - x0 as f64) as f32;
    let fy = (y - y0 as f64) as f32;

    let sample = |r: i64, c: i64| -> f32 {
        if r >= 0 && r < h as i64 && c >= 0 && c < w as i64 {
            data[[r as usize, c as usize]]
        } else {
            0.0
        }
    };

    let v00 = sample(y0, x0);
    let v10 = sample(y0, x1);
    let v01 = sample(y1, x0);
    let v11 = sample(y1, x1);

    v00 * (1.0 - fx) * (1.0 - fy)
        + v10 * fx * (1.0 - fy)
        + v01 * (1.0 - fx) * fy
        + v11 * fx * fy
}
