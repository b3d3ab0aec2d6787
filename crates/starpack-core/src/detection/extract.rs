use tracing::{debug, warn};

use crate::error::{Result, StarpackError};
use crate::frame::ColorFrame;
use crate::starmap::{Bounds, StarMap};

use super::cluster::compress;
use super::config::{DetectionConfig, ThresholdMode};
use super::threshold::{auto_bright_pixels, bright_pixels};

/// Star map of one frame plus the threshold that produced it.
#[derive(Clone, Debug)]
pub struct Extraction {
    pub star_map: StarMap,
    /// Threshold actually used; pass it as `ThresholdMode::Fixed` when
    /// extracting other frames so their maps are comparable.
    pub threshold: f64,
    /// Bright pixels found before clustering.
    pub raw_points: usize,
}

/// Detect bright pixels, cluster them into stars and keep the largest
/// `config.max_stars` of them.
///
/// `threshold` overrides `config.threshold`; the remaining fields of
/// `config` drive the automatic scan and pruning.
pub fn extract_star_map(
    frame: &ColorFrame,
    threshold: ThresholdMode,
    config: &DetectionConfig,
) -> Result<Extraction> {
    threshold.validate()?;
    config.validate()?;
    let (h, w) = frame.dim();
    if h == 0 || w == 0 {
        return Err(StarpackError::InvalidDimensions {
            width: w as u32,
            height: h as u32,
        });
    }

    let (points, used) = match threshold {
        ThresholdMode::Auto => auto_bright_pixels(frame, config),
        ThresholdMode::Fixed(t) => (bright_pixels(frame, t), t),
    };
    let raw_points = points.len();

    let raw = StarMap::new(Bounds::from_dimensions(w, h), points);
    let clustered = compress(&raw);
    debug!(
        raw_points,
        clusters = clustered.len(),
        threshold = used,
        "Clustered bright pixels"
    );

    if clustered.is_empty() {
        warn!(threshold = used, "No pixels above threshold");
        return Err(StarpackError::NoStarsDetected);
    }

    Ok(Extraction {
        star_map: clustered.largest(config.max_stars),
        threshold: used,
        raw_points,
    })
}
