use rayon::prelude::*;
use tracing::debug;

use crate::consts::{MAX_AUTO_THRESHOLD_STEPS, PARALLEL_PIXEL_THRESHOLD};
use crate::frame::ColorFrame;
use crate::starmap::Star;

use super::config::DetectionConfig;

/// Every pixel whose HSV value exceeds `threshold`, as single-pixel stars in
/// row-major order.
pub fn bright_pixels(frame: &ColorFrame, threshold: f64) -> Vec<Star> {
    let (h, w) = frame.dim();
    let scan_row = |row: usize| -> Vec<Star> {
        (0..w)
            .filter(|&col| frame.value_at(row, col) as f64 > threshold)
            .map(|col| Star::pixel(col, row))
            .collect()
    };

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().flat_map_iter(scan_row).collect()
    } else {
        (0..h).flat_map(scan_row).collect()
    }
}

/// Thresholds tried in automatic mode, from `auto_start` down to
/// `auto_floor` inclusive. Computed from a step index so the values do not
/// drift. Never yields more than `MAX_AUTO_THRESHOLD_STEPS + 1` values.
pub fn auto_thresholds(config: &DetectionConfig) -> impl Iterator<Item = f64> {
    let start = config.auto_start;
    let step = config.auto_step;
    let steps = ((start - config.auto_floor) / step + 1e-9)
        .floor()
        .clamp(0.0, MAX_AUTO_THRESHOLD_STEPS) as usize;
    (0..=steps).map(move |i| start - i as f64 * step)
}

/// Rescan the whole frame at decreasing thresholds until at least
/// `min_raw_points` bright pixels are found or the floor is reached.
///
/// Returns the pixels from the last scan and the threshold that produced them.
pub fn auto_bright_pixels(frame: &ColorFrame, config: &DetectionConfig) -> (Vec<Star>, f64) {
    let mut points = Vec::new();
    let mut used = config.auto_start;
    for threshold in auto_thresholds(config) {
        used = threshold;
        points = bright_pixels(frame, threshold);
        debug!(threshold, points = points.len(), "Threshold scan");
        if points.len() >= config.min_raw_points {
            break;
        }
    }
    (points, used)
}
