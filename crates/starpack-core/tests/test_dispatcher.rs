mod common;

use std::sync::atomic::{AtomicUsize, Ordering};

use starpack_core::align::{
    align_frames, align_to_reference, apply_alignments, AlignmentConfig, SearchConfig,
};
use starpack_core::detection::{extract_star_map, DetectionConfig, ThresholdMode};
use starpack_core::error::StarpackError;

use common::star_frame;

const W: usize = 64;
const H: usize = 64;

fn stars(dx: i32, dy: i32) -> Vec<(usize, usize, usize)> {
    [(20, 20), (40, 28), (28, 44)]
        .iter()
        .map(|&(x, y)| ((x + dx) as usize, (y + dy) as usize, 1))
        .collect()
}

fn small_config(workers: usize) -> AlignmentConfig {
    AlignmentConfig {
        detection: DetectionConfig::default(),
        search: SearchConfig {
            half_window: 4,
            min_rotation: -2,
            max_rotation: 2,
            rotation_step: 1,
        },
        max_concurrent_frames: workers,
    }
}

#[test]
fn test_batch_aligns_every_frame() {
    let frames = vec![
        star_frame(W, H, &stars(0, 0)),
        star_frame(W, H, &stars(-2, 1)),
        star_frame(W, H, &stars(1, 3)),
    ];
    let done = AtomicUsize::new(0);
    let batch = align_frames(&frames, 0, &small_config(2), |n| {
        done.fetch_max(n, Ordering::Relaxed);
    })
    .unwrap();

    assert_eq!(done.load(Ordering::Relaxed), 3);
    assert_eq!(batch.reference_index, 0);
    assert!((batch.threshold - 0.90).abs() < 1e-12);
    assert_eq!(batch.reference_map.len(), 3);
    assert_eq!(batch.frames.len(), 3);
    assert_eq!(batch.aligned_count(), 3);

    let reference = &batch.frames[0];
    let identity = reference.outcome.as_ref().unwrap();
    assert!(identity.offset.is_identity());
    assert_eq!(identity.score, 1.0);

    for (i, fa) in batch.frames.iter().enumerate() {
        assert_eq!(fa.frame_index, i);
        let alignment = fa.outcome.as_ref().unwrap();
        assert!(alignment.score >= 1.0);
        assert!(alignment.offset.x > -4 && alignment.offset.x <= 4);
        assert!(alignment.offset.y > -4 && alignment.offset.y <= 4);
        assert_eq!(fa.star_map.as_ref().unwrap().len(), 3);
    }
}

#[test]
fn test_failed_frame_does_not_fail_batch() {
    let frames = vec![
        star_frame(W, H, &stars(0, 0)),
        star_frame(W, H, &[]),
        star_frame(W, H, &stars(2, 2)),
    ];
    let batch = align_frames(&frames, 0, &small_config(0), |_| {}).unwrap();

    assert_eq!(batch.aligned_count(), 2);
    assert!(matches!(
        batch.frames[1].outcome,
        Err(StarpackError::NoStarsDetected)
    ));
    assert!(batch.frames[1].star_map.is_none());

    let aligned = apply_alignments(&frames, &batch);
    let indices: Vec<usize> = aligned.iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![0, 2]);
    assert_eq!(aligned[0].1.red.data, frames[0].red.data);
    assert_eq!(aligned[1].1.dim(), (H, W));
}

#[test]
fn test_non_zero_reference_index() {
    let frames = vec![
        star_frame(W, H, &stars(1, 1)),
        star_frame(W, H, &stars(0, 0)),
    ];
    let batch = align_frames(&frames, 1, &small_config(1), |_| {}).unwrap();
    assert_eq!(batch.reference_index, 1);
    assert!(batch.frames[1].outcome.as_ref().unwrap().offset.is_identity());
    assert!(batch.frames[0].outcome.is_ok());
}

#[test]
fn test_blank_reference_fails_batch() {
    let frames = vec![star_frame(W, H, &[]), star_frame(W, H, &stars(0, 0))];
    let result = align_frames(&frames, 0, &small_config(0), |_| {});
    assert!(matches!(result, Err(StarpackError::NoStarsDetected)));
}

#[test]
fn test_reference_out_of_range() {
    let frames = vec![star_frame(W, H, &stars(0, 0))];
    let result = align_frames(&frames, 1, &small_config(0), |_| {});
    assert!(matches!(
        result,
        Err(StarpackError::FrameIndexOutOfRange { index: 1, total: 1 })
    ));
}

#[test]
fn test_empty_batch() {
    let result = align_frames(&[], 0, &small_config(0), |_| {});
    assert!(matches!(result, Err(StarpackError::EmptySequence)));
}

#[test]
fn test_dimension_mismatch() {
    let frames = vec![
        star_frame(W, H, &stars(0, 0)),
        star_frame(W + 1, H, &stars(0, 0)),
    ];
    let result = align_frames(&frames, 0, &small_config(0), |_| {});
    assert!(matches!(result, Err(StarpackError::DimensionMismatch { .. })));
}

#[test]
fn test_invalid_config_rejected() {
    let frames = vec![star_frame(W, H, &stars(0, 0))];
    let mut config = small_config(0);
    config.search.rotation_step = 0;
    let result = align_frames(&frames, 0, &config, |_| {});
    assert!(matches!(result, Err(StarpackError::InvalidSearchWindow(_))));
}

#[test]
fn test_align_to_reference_reuses_threshold() {
    let config = small_config(0);
    let reference = extract_star_map(
        &star_frame(W, H, &stars(0, 0)),
        ThresholdMode::Auto,
        &config.detection,
    )
    .unwrap();
    let alignment =
        align_to_reference(&star_frame(W, H, &stars(-1, -1)), &reference, &config).unwrap();
    assert!(alignment.score >= 1.0);

    let blank = align_to_reference(&star_frame(W, H, &[]), &reference, &config);
    assert!(matches!(blank, Err(StarpackError::NoStarsDetected)));
}
