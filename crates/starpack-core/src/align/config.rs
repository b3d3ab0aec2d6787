use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_MAX_ROTATION, DEFAULT_MIN_ROTATION, DEFAULT_ROTATION_STEP, DEFAULT_SEARCH_HALF_WINDOW,
};
use crate::detection::DetectionConfig;
use crate::error::{Result, StarpackError};

/// Bounds of the translation + rotation search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Translations `dx`, `dy` are tried in `(-half_window, half_window]`.
    #[serde(default = "default_half_window")]
    pub half_window: i32,
    /// Smallest rotation in whole degrees.
    #[serde(default = "default_min_rotation")]
    pub min_rotation: i32,
    /// Largest rotation in whole degrees (inclusive).
    #[serde(default = "default_max_rotation")]
    pub max_rotation: i32,
    #[serde(default = "default_rotation_step")]
    pub rotation_step: i32,
}

fn default_half_window() -> i32 {
    DEFAULT_SEARCH_HALF_WINDOW
}
fn default_min_rotation() -> i32 {
    DEFAULT_MIN_ROTATION
}
fn default_max_rotation() -> i32 {
    DEFAULT_MAX_ROTATION
}
fn default_rotation_step() -> i32 {
    DEFAULT_ROTATION_STEP
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            half_window: DEFAULT_SEARCH_HALF_WINDOW,
            min_rotation: DEFAULT_MIN_ROTATION,
            max_rotation: DEFAULT_MAX_ROTATION,
            rotation_step: DEFAULT_ROTATION_STEP,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.half_window < 0 {
            return Err(StarpackError::InvalidSearchWindow(format!(
                "half window must not be negative, got {}",
                self.half_window
            )));
        }
        if self.rotation_step <= 0 {
            return Err(StarpackError::InvalidSearchWindow(format!(
                "rotation step must be positive, got {}",
                self.rotation_step
            )));
        }
        if self.min_rotation > self.max_rotation {
            return Err(StarpackError::InvalidSearchWindow(format!(
                "rotation range {}..={} is empty",
                self.min_rotation, self.max_rotation
            )));
        }
        Ok(())
    }

    /// True if `(x, y)` lies in the translation window.
    pub fn in_window(&self, x: i32, y: i32) -> bool {
        let h = self.half_window;
        -h < x && x <= h && -h < y && y <= h
    }

    /// Number of spiral steps walked: the side of the window, squared.
    pub fn spiral_steps(&self) -> usize {
        let side = 2 * self.half_window.max(0) as usize;
        side * side
    }

    /// Rotations tried for each translation, ascending.
    pub fn rotations(&self) -> impl Iterator<Item = i32> {
        (self.min_rotation..=self.max_rotation).step_by(self.rotation_step.max(1) as usize)
    }
}

/// Configuration for aligning a batch of frames to a reference.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignmentConfig {
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub search: SearchConfig,
    /// Frames aligned at the same time. 0 uses one per available CPU.
    #[serde(default)]
    pub max_concurrent_frames: usize,
}

impl AlignmentConfig {
    pub fn validate(&self) -> Result<()> {
        self.detection.validate()?;
        self.search.validate()
    }
}
