use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::align::{align_frames, apply_alignments, BatchAlignment};
use crate::error::{Result, StarpackError};
use crate::frame::ColorFrame;
use crate::io::image_io::{
    collect_image_files, load_color_images, save_color_image, save_rgb_image,
};
use crate::stack::{brightest_stack, mean_stack, median_stack};
use crate::starmap::StarMapPair;

use super::config::{PipelineConfig, StackMethod};
use super::types::{FrameReport, NoOpReporter, PipelineReport, PipelineStage, ProgressReporter};

/// Run the full processing pipeline with a thread-safe progress reporter.
///
/// Frames that cannot be aligned are left out of the stack and listed in
/// the report; only a failure on the reference frame aborts the run.
pub fn run_pipeline_reported(
    config: &PipelineConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<PipelineReport> {
    let files = collect_image_files(&config.inputs)?;
    if files.is_empty() {
        return Err(StarpackError::EmptySequence);
    }

    reporter.begin_stage(PipelineStage::Reading, Some(files.len()));
    info!(files = files.len(), "Loading images");
    let frames = load_color_images(&files)?;
    reporter.finish_stage();

    let (to_stack, reports, threshold) = if config.align && frames.len() > 1 {
        let (aligned, reports, threshold) = align_stage(config, &frames, &files, &reporter)?;
        (aligned, reports, Some(threshold))
    } else {
        let reports = files
            .iter()
            .enumerate()
            .map(|(i, path)| FrameReport {
                frame_index: i,
                path: path.clone(),
                offset: Some(Default::default()),
                score: None,
                error: None,
            })
            .collect();
        (frames, reports, None)
    };

    reporter.begin_stage(PipelineStage::Stacking, Some(to_stack.len()));
    info!(frames = to_stack.len(), method = %config.stacking.method, "Stacking");
    let stacked = match config.stacking.method {
        StackMethod::Mean => mean_stack(&to_stack)?,
        StackMethod::Median => median_stack(&to_stack)?,
        StackMethod::Brightest => brightest_stack(&to_stack)?,
    };
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::Writing, None);
    save_color_image(&stacked, &config.output)?;
    info!(path = %config.output.display(), "Output written");
    reporter.finish_stage();

    Ok(PipelineReport {
        frames: reports,
        threshold,
        stacked_frames: to_stack.len(),
        output: config.output.clone(),
    })
}

/// Run the full processing pipeline without progress reporting.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineReport> {
    run_pipeline_reported(config, Arc::new(NoOpReporter))
}

fn align_stage(
    config: &PipelineConfig,
    frames: &[ColorFrame],
    files: &[PathBuf],
    reporter: &Arc<dyn ProgressReporter>,
) -> Result<(Vec<ColorFrame>, Vec<FrameReport>, f64)> {
    reporter.begin_stage(PipelineStage::Alignment, Some(frames.len()));
    let batch = align_frames(frames, config.reference_index, &config.alignment, |done| {
        reporter.advance(done)
    })?;
    reporter.finish_stage();
    info!(
        aligned = batch.aligned_count(),
        total = frames.len(),
        threshold = batch.threshold,
        "Alignment complete"
    );

    if let Some(ref dir) = config.difference_dir {
        write_difference_images(&batch, dir)?;
    }

    reporter.begin_stage(PipelineStage::Transforming, Some(batch.aligned_count()));
    let aligned: Vec<ColorFrame> = apply_alignments(frames, &batch)
        .into_iter()
        .map(|(_, frame)| frame)
        .collect();
    reporter.finish_stage();

    let reports = batch
        .frames
        .iter()
        .map(|fa| {
            let (offset, score, error) = match &fa.outcome {
                Ok(a) => (Some(a.offset), Some(a.score), None),
                Err(e) => (None, None, Some(e.to_string())),
            };
            FrameReport {
                frame_index: fa.frame_index,
                path: files[fa.frame_index].clone(),
                offset,
                score,
                error,
            }
        })
        .collect();

    Ok((aligned, reports, batch.threshold))
}

/// For every aligned frame, write the star map difference against the
/// reference before and after applying the found offset.
fn write_difference_images(batch: &BatchAlignment, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    for fa in &batch.frames {
        if fa.frame_index == batch.reference_index {
            continue;
        }
        let (Some(candidate), Ok(alignment)) = (&fa.star_map, &fa.outcome) else {
            warn!(frame = fa.frame_index, "No star map to visualize");
            continue;
        };
        let offset = alignment.offset;
        let corrected = candidate
            .offset(offset.x as f64, offset.y as f64)
            .rotate(offset.rotation_degrees);

        let before = StarMapPair::new(&batch.reference_map, candidate)?.visualize_difference()?;
        let after = StarMapPair::new(&batch.reference_map, &corrected)?.visualize_difference()?;
        save_rgb_image(&before, &dir.join(format!("difference_{:03}.png", fa.frame_index)))?;
        save_rgb_image(
            &after,
            &dir.join(format!("difference_{:03}_after.png", fa.frame_index)),
        )?;
    }
    Ok(())
}
