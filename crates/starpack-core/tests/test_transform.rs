use ndarray::Array2;

use starpack_core::align::transform::{rotate, translate};
use starpack_core::align::{bilinear_sample, transform_frame};
use starpack_core::frame::{ColorFrame, Frame, OffsetConfig};
use starpack_core::starmap::{Bounds, Star, StarMap};

fn gradient(h: usize, w: usize) -> Frame {
    Frame::new(Array2::from_shape_fn((h, w), |(r, c)| {
        (r * w + c) as f32 / (h * w) as f32
    }))
}

#[test]
fn test_translate_moves_content() {
    let frame = gradient(6, 8);
    let moved = translate(&frame, 2, 1);
    assert_eq!(moved.data.dim(), (6, 8));
    assert_eq!(moved.data[[3, 5]], frame.data[[2, 3]]);
    assert_eq!(moved.data[[5, 7]], frame.data[[4, 5]]);
    // Uncovered border is zero
    assert_eq!(moved.data[[0, 4]], 0.0);
    assert_eq!(moved.data[[3, 1]], 0.0);
}

#[test]
fn test_translate_negative() {
    let frame = gradient(5, 5);
    let moved = translate(&frame, -1, -2);
    assert_eq!(moved.data[[0, 0]], frame.data[[2, 1]]);
    assert_eq!(moved.data[[4, 4]], 0.0);
}

#[test]
fn test_rotate_quarter_turn() {
    let mut data = Array2::<f32>::zeros((4, 4));
    data[[1, 2]] = 1.0;
    let rotated = rotate(&Frame::new(data), 90.0);
    // (x=2, y=1) turns to (x=3, y=2) about (2, 2)
    assert!((rotated.data[[2, 3]] - 1.0).abs() < 1e-5);
    assert!(rotated.data[[1, 2]].abs() < 1e-5);
}

#[test]
fn test_raster_and_star_map_rotate_the_same_way() {
    let (w, h) = (40, 30);
    let star = Star::new(28.0, 9.0, 1.0);
    let mut data = Array2::<f32>::zeros((h, w));
    data[[star.y as usize, star.x as usize]] = 1.0;
    let frame = ColorFrame::from_gray(Frame::new(data));

    let offset = OffsetConfig::new(-3, 4, 6.0);
    let moved = StarMap::new(Bounds::from_dimensions(w, h), vec![star])
        .offset(offset.x as f64, offset.y as f64)
        .rotate(offset.rotation_degrees);
    let transformed = transform_frame(&frame, &offset);

    // The brightest output pixel sits next to where the star map moved the star.
    let (mut best, mut best_rc) = (0.0f32, (0, 0));
    for ((r, c), &v) in transformed.red.data.indexed_iter() {
        if v > best {
            best = v;
            best_rc = (r, c);
        }
    }
    assert!(best > 0.0);
    assert!((best_rc.1 as f64 - moved.stars[0].x).abs() <= 1.0);
    assert!((best_rc.0 as f64 - moved.stars[0].y).abs() <= 1.0);
}

#[test]
fn test_identity_transform_preserves_frame() {
    let frame = ColorFrame::from_gray(gradient(8, 8));
    let out = transform_frame(&frame, &OffsetConfig::default());
    assert_eq!(out.red.data, frame.red.data);
    assert_eq!(out.blue.data, frame.blue.data);
}

#[test]
fn test_transform_keeps_dimensions_for_large_frames() {
    let frame = ColorFrame::from_gray(gradient(300, 260));
    let out = transform_frame(&frame, &OffsetConfig::new(10, -5, 3.0));
    assert_eq!(out.dim(), (300, 260));
}

#[test]
fn test_bilinear_sample() {
    let mut data = Array2::<f32>::zeros((2, 2));
    data[[0, 1]] = 1.0;
    assert!((bilinear_sample(&data, 0.0, 0.5) - 0.5).abs() < 1e-6);
    assert!((bilinear_sample(&data, 0.0, 1.0) - 1.0).abs() < 1e-6);
    assert_eq!(bilinear_sample(&data, -5.0, -5.0), 0.0);
}
