use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::align::AlignmentConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Image files or directories of images.
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    /// Align frames on their stars before stacking.
    #[serde(default = "default_align")]
    pub align: bool,
    /// Index (after directory expansion) of the frame the others align to.
    #[serde(default)]
    pub reference_index: usize,
    #[serde(default)]
    pub alignment: AlignmentConfig,
    #[serde(default)]
    pub stacking: StackingConfig,
    /// Write before/after star map difference images here.
    #[serde(default)]
    pub difference_dir: Option<PathBuf>,
}

fn default_align() -> bool {
    true
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: PathBuf::from("output.tiff"),
            align: true,
            reference_index: 0,
            alignment: AlignmentConfig::default(),
            stacking: StackingConfig::default(),
            difference_dir: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StackingConfig {
    #[serde(default)]
    pub method: StackMethod,
}

/// Per-pixel reducer used to merge aligned frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackMethod {
    #[default]
    Mean,
    Median,
    Brightest,
}

impl fmt::Display for StackMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mean => write!(f, "Mean"),
            Self::Median => write!(f, "Median"),
            Self::Brightest => write!(f, "Brightest"),
        }
    }
}
