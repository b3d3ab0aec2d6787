use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::detection::{extract_star_map, Extraction, ThresholdMode};
use crate::error::{Result, StarpackError};
use crate::frame::ColorFrame;
use crate::starmap::StarMap;

use super::config::AlignmentConfig;
use super::search::{find_offset, Alignment};
use super::transform::transform_frame;

/// Alignment result for one frame of a batch. A failed frame does not fail
/// the batch; the caller decides whether to skip it.
#[derive(Debug)]
pub struct FrameAlignment {
    pub frame_index: usize,
    /// Star map extracted from this frame, if extraction succeeded.
    pub star_map: Option<StarMap>,
    pub outcome: Result<Alignment>,
}

/// Alignment of a whole batch against its reference frame.
#[derive(Debug)]
pub struct BatchAlignment {
    pub reference_index: usize,
    /// Threshold found for the reference and reused for every other frame.
    pub threshold: f64,
    pub reference_map: StarMap,
    /// One entry per input frame, in input order.
    pub frames: Vec<FrameAlignment>,
}

impl BatchAlignment {
    pub fn aligned_count(&self) -> usize {
        self.frames.iter().filter(|f| f.outcome.is_ok()).count()
    }
}

/// Align every frame to `frames[reference_idx]`.
///
/// The reference map is extracted with `config.detection.threshold`; every
/// other frame is extracted at the threshold the reference ended up with, so
/// all maps are comparable. Frames are searched concurrently on a pool of at
/// most `config.max_concurrent_frames` threads. `on_frame_done` receives the
/// number of frames finished so far.
pub fn align_frames<F>(
    frames: &[ColorFrame],
    reference_idx: usize,
    config: &AlignmentConfig,
    on_frame_done: F,
) -> Result<BatchAlignment>
where
    F: Fn(usize) + Send + Sync,
{
    if frames.is_empty() {
        return Err(StarpackError::EmptySequence);
    }
    if reference_idx >= frames.len() {
        return Err(StarpackError::FrameIndexOutOfRange {
            index: reference_idx,
            total: frames.len(),
        });
    }
    config.validate()?;

    let reference_frame = &frames[reference_idx];
    for frame in frames {
        if frame.dim() != reference_frame.dim() {
            return Err(StarpackError::DimensionMismatch {
                expected: reference_frame.dim(),
                actual: frame.dim(),
            });
        }
    }

    let reference =
        extract_star_map(reference_frame, config.detection.threshold, &config.detection)?;
    let self_score = reference.star_map.best_pair_overlap(&reference.star_map)?;
    info!(
        threshold = reference.threshold,
        stars = reference.star_map.len(),
        raw_points = reference.raw_points,
        "Reference star map extracted"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.max_concurrent_frames)
        .build()
        .map_err(|e| StarpackError::Pipeline(format!("failed to build alignment pool: {e}")))?;

    let counter = AtomicUsize::new(0);
    let results: Vec<FrameAlignment> = pool.install(|| {
        frames
            .par_iter()
            .enumerate()
            .map(|(i, frame)| {
                let (star_map, outcome) = if i == reference_idx {
                    (
                        Some(reference.star_map.clone()),
                        Ok(Alignment::identity(self_score)),
                    )
                } else {
                    match extract_candidate(frame, &reference, config) {
                        Ok(candidate) => {
                            let outcome = find_offset(
                                &reference.star_map,
                                &candidate.star_map,
                                &config.search,
                            );
                            (Some(candidate.star_map), outcome)
                        }
                        Err(e) => (None, Err(e)),
                    }
                };
                match &outcome {
                    Ok(a) => debug!(frame = i, offset = %a.offset, score = a.score, "Frame aligned"),
                    Err(e) => warn!(frame = i, error = %e, "Frame alignment failed"),
                }
                let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
                on_frame_done(done);
                FrameAlignment {
                    frame_index: i,
                    star_map,
                    outcome,
                }
            })
            .collect()
    });

    Ok(BatchAlignment {
        reference_index: reference_idx,
        threshold: reference.threshold,
        reference_map: reference.star_map,
        frames: results,
    })
}

/// Extract one frame at the reference threshold and search its offset.
pub fn align_to_reference(
    frame: &ColorFrame,
    reference: &Extraction,
    config: &AlignmentConfig,
) -> Result<Alignment> {
    let candidate = extract_candidate(frame, reference, config)?;
    find_offset(&reference.star_map, &candidate.star_map, &config.search)
}

fn extract_candidate(
    frame: &ColorFrame,
    reference: &Extraction,
    config: &AlignmentConfig,
) -> Result<Extraction> {
    extract_star_map(
        frame,
        ThresholdMode::Fixed(reference.threshold),
        &config.detection,
    )
}

/// Transform every successfully aligned frame; failed frames are dropped.
/// Returns `(frame_index, aligned_frame)` pairs in input order.
pub fn apply_alignments(
    frames: &[ColorFrame],
    batch: &BatchAlignment,
) -> Vec<(usize, ColorFrame)> {
    batch
        .frames
        .par_iter()
        .filter_map(|fa| {
            let frame = frames.get(fa.frame_index)?;
            match &fa.outcome {
                Ok(a) if a.offset.is_identity() => Some((fa.frame_index, frame.clone())),
                Ok(a) => Some((fa.frame_index, transform_frame(frame, &a.offset))),
                Err(e) => {
                    warn!(frame = fa.frame_index, error = %e, "Skipping unaligned frame");
                    None
                }
            }
        })
        .collect()
}
