//! Diagnostic rasters for star maps.

use image::{Rgb, RgbImage};
use rayon::prelude::*;

use crate::error::{Result, StarpackError};

use super::map::{Bounds, StarMap};
use super::pair::StarMapPair;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
const RED: Rgb<u8> = Rgb([255, 0, 0]);

impl StarMap {
    /// White canvas with the stars drawn as black discs.
    pub fn render(&self) -> Result<RgbImage> {
        paint(self.bounds, |x, y| {
            if self.intersects(x, y) {
                BLACK
            } else {
                WHITE
            }
        })
    }
}

impl StarMapPair<'_> {
    /// Green where both maps agree on star/background, red where they differ.
    pub fn visualize_difference(&self) -> Result<RgbImage> {
        paint(self.reference.bounds, |x, y| {
            if self.is_overlap(x, y) {
                GREEN
            } else {
                RED
            }
        })
    }
}

/// Evaluate `color` for every pixel of `bounds`, one row per task.
fn paint<F>(bounds: Bounds, color: F) -> Result<RgbImage>
where
    F: Fn(f64, f64) -> Rgb<u8> + Sync,
{
    let (width, height) = (bounds.width(), bounds.height());
    if width <= 0 || height <= 0 {
        return Err(StarpackError::InvalidDimensions {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
        });
    }

    let mut img = RgbImage::new(width as u32, height as u32);
    let row_len = width as usize * 3;
    img.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(row, pixels)| {
            let y = (bounds.min_y + row as i32) as f64;
            for (col, px) in pixels.chunks_exact_mut(3).enumerate() {
                let x = (bounds.min_x + col as i32) as f64;
                px.copy_from_slice(&color(x, y).0);
            }
        });
    Ok(img)
}
