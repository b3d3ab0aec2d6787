use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use starpack_core::align::{AlignmentConfig, SearchConfig};
use starpack_core::detection::{DetectionConfig, ThresholdMode};
use starpack_core::io::image_io::collect_image_files;
use starpack_core::pipeline::config::{PipelineConfig, StackMethod, StackingConfig};
use starpack_core::pipeline::run_pipeline_reported;

use crate::progress::BarReporter;
use crate::summary::{print_pipeline_summary, print_report};

#[derive(Clone, ValueEnum)]
pub enum StackMethodArg {
    Mean,
    Median,
    Brightest,
}

impl From<&StackMethodArg> for StackMethod {
    fn from(arg: &StackMethodArg) -> Self {
        match arg {
            StackMethodArg::Mean => StackMethod::Mean,
            StackMethodArg::Median => StackMethod::Median,
            StackMethodArg::Brightest => StackMethod::Brightest,
        }
    }
}

#[derive(Args)]
pub struct StackArgs {
    /// Input images or directories of images
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Stacking method
    #[arg(long, value_enum, default_value = "mean")]
    pub method: StackMethodArg,

    /// Stack without aligning stars first
    #[arg(long)]
    pub no_align: bool,

    /// Index of the reference frame
    #[arg(long, default_value = "0")]
    pub reference: usize,

    /// Brightness threshold in (0, 1); 0 picks one from the reference
    #[arg(long, default_value = "0")]
    pub threshold: f64,

    /// Half width of the translation search window in pixels
    #[arg(long, default_value = "500")]
    pub half_window: i32,

    /// Frames aligned concurrently (0 = one per CPU)
    #[arg(short, long, default_value = "0")]
    pub jobs: usize,

    /// Write star map difference images into this directory
    #[arg(long)]
    pub diff_dir: Option<PathBuf>,

    /// Output file path
    #[arg(short, long, default_value = "output.tiff")]
    pub output: PathBuf,
}

pub fn run(args: &StackArgs) -> Result<()> {
    let config = PipelineConfig {
        inputs: args.inputs.clone(),
        output: args.output.clone(),
        align: !args.no_align,
        reference_index: args.reference,
        alignment: AlignmentConfig {
            detection: DetectionConfig {
                threshold: ThresholdMode::from_value(args.threshold),
                ..Default::default()
            },
            search: SearchConfig {
                half_window: args.half_window,
                ..Default::default()
            },
            max_concurrent_frames: args.jobs,
        },
        stacking: StackingConfig {
            method: StackMethod::from(&args.method),
        },
        difference_dir: args.diff_dir.clone(),
    };
    run_config(&config)
}

/// Print a summary, run the pipeline with a progress bar and report per-frame results.
pub fn run_config(config: &PipelineConfig) -> Result<()> {
    let files = collect_image_files(&config.inputs)?;
    if files.is_empty() {
        bail!("No input images found");
    }
    print_pipeline_summary(config, files.len());

    let reporter = Arc::new(BarReporter::new()?);
    let report = run_pipeline_reported(config, reporter.clone())?;
    reporter.finish();

    print_report(&report);
    Ok(())
}
