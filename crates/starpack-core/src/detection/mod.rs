pub mod cluster;
pub mod config;
pub mod extract;
pub mod threshold;

pub use cluster::compress;
pub use config::{DetectionConfig, ThresholdMode};
pub use extract::{extract_star_map, Extraction};
