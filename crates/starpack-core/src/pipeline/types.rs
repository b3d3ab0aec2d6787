use std::path::PathBuf;

use crate::frame::OffsetConfig;

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Reading,
    Alignment,
    Transforming,
    Stacking,
    Writing,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reading => write!(f, "Reading frames"),
            Self::Alignment => write!(f, "Aligning stars"),
            Self::Transforming => write!(f, "Transforming frames"),
            Self::Stacking => write!(f, "Stacking"),
            Self::Writing => write!(f, "Writing output"),
        }
    }
}

/// What happened to one input frame.
#[derive(Clone, Debug)]
pub struct FrameReport {
    pub frame_index: usize,
    pub path: PathBuf,
    /// Offset applied before stacking; `None` if the frame was skipped.
    pub offset: Option<OffsetConfig>,
    pub score: Option<f64>,
    /// Why the frame was skipped.
    pub error: Option<String>,
}

/// Summary of a finished pipeline run.
#[derive(Clone, Debug)]
pub struct PipelineReport {
    pub frames: Vec<FrameReport>,
    /// Threshold chosen on the reference frame, when aligning.
    pub threshold: Option<f64>,
    pub stacked_frames: usize,
    pub output: PathBuf,
}

impl PipelineReport {
    pub fn skipped(&self) -> impl Iterator<Item = &FrameReport> {
        self.frames.iter().filter(|f| f.error.is_some())
    }
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started. `total_items` is the number of
    /// work items in this stage (e.g., frame count), if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed. Items finish
    /// concurrently, so `items_done` values can arrive out of order.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `run_pipeline` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
