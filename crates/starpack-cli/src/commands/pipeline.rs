use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use starpack_core::pipeline::config::PipelineConfig;
use tracing::debug;

use super::stack::run_config;

#[derive(Args)]
pub struct RunArgs {
    /// Pipeline config file (TOML)
    pub config: PathBuf,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let contents = std::fs::read_to_string(&args.config)
        .with_context(|| format!("Failed to read config {}", args.config.display()))?;
    let config: PipelineConfig = toml::from_str(&contents).context("Invalid pipeline config")?;
    debug!(path = %args.config.display(), inputs = config.inputs.len(), "Loaded pipeline config");
    run_config(&config)
}
