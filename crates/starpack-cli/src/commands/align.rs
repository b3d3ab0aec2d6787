use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use starpack_core::align::{find_offset, SearchConfig};
use starpack_core::detection::{extract_star_map, DetectionConfig, ThresholdMode};
use starpack_core::io::image_io::{load_color_image, save_rgb_image};
use starpack_core::starmap::StarMapPair;

#[derive(Args)]
pub struct AlignArgs {
    /// Reference image
    pub reference: PathBuf,

    /// Image to align to the reference
    pub target: PathBuf,

    /// Brightness threshold in (0, 1); 0 picks one from the reference
    #[arg(long, default_value = "0")]
    pub threshold: f64,

    /// Half width of the translation search window in pixels
    #[arg(long, default_value = "500")]
    pub half_window: i32,

    /// Largest rotation tried, in degrees, in either direction
    #[arg(long, default_value = "10")]
    pub max_rotation: i32,

    /// Write difference.png and difference_after.png into this directory
    #[arg(long)]
    pub diff_dir: Option<PathBuf>,
}

pub fn run(args: &AlignArgs) -> Result<()> {
    let reference = load_color_image(&args.reference)
        .with_context(|| format!("Failed to load {}", args.reference.display()))?;
    let target = load_color_image(&args.target)
        .with_context(|| format!("Failed to load {}", args.target.display()))?;

    let detection = DetectionConfig::default();
    let reference_map = extract_star_map(
        &reference,
        ThresholdMode::from_value(args.threshold),
        &detection,
    )
    .context("Reference image")?;
    let target_map = extract_star_map(
        &target,
        ThresholdMode::Fixed(reference_map.threshold),
        &detection,
    )
    .context("Target image")?;

    println!(
        "Threshold {:.2}: {} reference stars, {} target stars",
        reference_map.threshold,
        reference_map.star_map.len(),
        target_map.star_map.len()
    );

    let search = SearchConfig {
        half_window: args.half_window,
        min_rotation: -args.max_rotation,
        max_rotation: args.max_rotation,
        ..Default::default()
    };
    let alignment = find_offset(&reference_map.star_map, &target_map.star_map, &search)?;
    println!("Offset:  {}", alignment.offset);
    println!("Score:   {:.4}", alignment.score);

    if let Some(ref dir) = args.diff_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let offset = alignment.offset;
        let corrected = target_map
            .star_map
            .offset(offset.x as f64, offset.y as f64)
            .rotate(offset.rotation_degrees);

        let before = StarMapPair::new(&reference_map.star_map, &target_map.star_map)?;
        let after = StarMapPair::new(&reference_map.star_map, &corrected)?;
        println!(
            "Mismatch: {:.3}% before, {:.3}% after",
            before.difference() * 100.0,
            after.difference() * 100.0
        );
        save_rgb_image(&before.visualize_difference()?, &dir.join("difference.png"))?;
        save_rgb_image(&after.visualize_difference()?, &dir.join("difference_after.png"))?;
        println!("Difference images saved to {}", dir.display());
    }
    Ok(())
}
