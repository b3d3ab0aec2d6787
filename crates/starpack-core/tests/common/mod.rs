#![allow(dead_code)]

use ndarray::Array2;

use starpack_core::frame::{ColorFrame, Frame};

/// Gray frame of `width` x `height` with a square blob of value 1.0 and
/// half-side `radius` centered on each `(x, y)`.
pub fn star_frame(width: usize, height: usize, stars: &[(usize, usize, usize)]) -> ColorFrame {
    let mut data = Array2::<f32>::zeros((height, width));
    for &(x, y, radius) in stars {
        for row in y.saturating_sub(radius)..=(y + radius).min(height - 1) {
            for col in x.saturating_sub(radius)..=(x + radius).min(width - 1) {
                data[[row, col]] = 1.0;
            }
        }
    }
    ColorFrame::from_gray(Frame::new(data))
}

/// Uniform color frame.
pub fn flat_frame(width: usize, height: usize, rgb: [f32; 3]) -> ColorFrame {
    let channel = |v: f32| Frame::new(Array2::from_elem((height, width), v));
    ColorFrame {
        red: channel(rgb[0]),
        green: channel(rgb[1]),
        blue: channel(rgb[2]),
    }
}
