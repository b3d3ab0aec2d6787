use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use starpack_core::detection::{extract_star_map, DetectionConfig, ThresholdMode};
use starpack_core::io::image_io::{load_color_image, save_rgb_image};

#[derive(Args)]
pub struct StarmapArgs {
    /// Input image
    pub file: PathBuf,

    /// Brightness threshold in (0, 1); 0 picks one automatically
    #[arg(long, default_value = "0")]
    pub threshold: f64,

    /// Number of largest stars to keep
    #[arg(long, default_value = "10")]
    pub max_stars: usize,

    /// Write a rendering of the star map (PNG)
    #[arg(long)]
    pub render: Option<PathBuf>,
}

pub fn run(args: &StarmapArgs) -> Result<()> {
    let frame = load_color_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let config = DetectionConfig {
        max_stars: args.max_stars,
        ..Default::default()
    };
    let extraction = extract_star_map(&frame, ThresholdMode::from_value(args.threshold), &config)?;

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", frame.width(), frame.height());
    println!("Threshold:   {:.2}", extraction.threshold);
    println!("Raw points:  {}", extraction.raw_points);
    println!("Stars:       {}", extraction.star_map.len());
    for (i, star) in extraction.star_map.stars.iter().enumerate() {
        println!(
            "  {:>2}  x={:>9.2}  y={:>9.2}  size={:.2}",
            i + 1,
            star.x,
            star.y,
            star.size
        );
    }

    if let Some(ref path) = args.render {
        save_rgb_image(&extraction.star_map.render()?, path)?;
        println!("Rendering saved to {}", path.display());
    }
    Ok(())
}
