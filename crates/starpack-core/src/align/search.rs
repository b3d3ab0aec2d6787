//! Exhaustive translation + rotation search between two star maps.
//!
//! Translations are visited along a square spiral out from `(0, 0)`; for
//! each translation every configured rotation is tried in ascending order.
//! The first configuration reaching the highest best-pair overlap wins, so
//! ties resolve toward small offsets and toward negative rotations.

use tracing::debug;

use crate::error::{Result, StarpackError};
use crate::frame::OffsetConfig;
use crate::starmap::{best_pair_score, Star, StarMap};

use super::config::SearchConfig;
use super::spiral::Spiral;

/// Best transform found by [`find_offset`] and its score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Alignment {
    pub offset: OffsetConfig,
    pub score: f64,
}

impl Alignment {
    pub fn identity(score: f64) -> Self {
        Self {
            offset: OffsetConfig::default(),
            score,
        }
    }
}

/// Precomputed trigonometry for one tried rotation.
struct Rotation {
    degrees: i32,
    sin: f64,
    cos: f64,
}

impl Rotation {
    fn new(degrees: i32) -> Self {
        let (sin, cos) = (degrees as f64).to_radians().sin_cos();
        Self { degrees, sin, cos }
    }
}

/// Find the offset and rotation that best superimpose `candidate` onto
/// `reference`.
///
/// Each tried configuration scores
/// `reference.best_pair_overlap(&candidate.offset(dx, dy).rotate(deg))`.
/// Applying the returned [`OffsetConfig`] to the candidate's frame moves it
/// onto the reference frame.
pub fn find_offset(
    reference: &StarMap,
    candidate: &StarMap,
    config: &SearchConfig,
) -> Result<Alignment> {
    config.validate()?;
    reference.ensure_same_bounds(candidate)?;
    if reference.is_empty() || candidate.is_empty() {
        return Err(StarpackError::NoStarsDetected);
    }
    reference.validate()?;
    candidate.validate()?;

    let (cx, cy) = candidate.bounds.center();
    let rotations: Vec<Rotation> = config.rotations().map(Rotation::new).collect();
    let mut moved: Vec<Star> = candidate.stars.clone();
    let mut best: Option<Alignment> = None;
    let mut evaluated = 0usize;

    let window = Spiral::new(config.spiral_steps()).filter(|&(x, y)| config.in_window(x, y));
    for (dx, dy) in window {
        for rotation in &rotations {
            for (dst, src) in moved.iter_mut().zip(&candidate.stars) {
                let shifted = src.translated(dx as f64, dy as f64);
                *dst = if rotation.degrees == 0 {
                    shifted
                } else {
                    shifted.rotated(cx, cy, rotation.cos, rotation.sin)
                };
            }

            let score = best_pair_score(&reference.stars, &moved);
            evaluated += 1;
            if best.map_or(true, |b| score > b.score) {
                best = Some(Alignment {
                    offset: OffsetConfig::new(dx, dy, rotation.degrees as f64),
                    score,
                });
            }
        }
    }

    let best = best.ok_or(StarpackError::AlignmentFailed)?;
    debug!(
        evaluated,
        dx = best.offset.x,
        dy = best.offset.y,
        rotation = best.offset.rotation_degrees,
        score = best.score,
        "Offset search finished"
    );
    Ok(best)
}
