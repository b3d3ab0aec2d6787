mod commands;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "starpack", about = "Star-aligned night sky image stacking")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect stars in an image
    Starmap(commands::starmap::StarmapArgs),
    /// Find the offset aligning one image to another
    Align(commands::align::AlignArgs),
    /// Align and stack images
    Stack(commands::stack::StackArgs),
    /// Run a pipeline described by a TOML config
    Run(commands::pipeline::RunArgs),
    /// Print a default pipeline config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Starmap(args) => commands::starmap::run(args),
        Commands::Align(args) => commands::align::run(args),
        Commands::Stack(args) => commands::stack::run(args),
        Commands::Run(args) => commands::pipeline::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
