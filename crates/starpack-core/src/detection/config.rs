use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_AUTO_THRESHOLD_FLOOR, DEFAULT_AUTO_THRESHOLD_START, DEFAULT_AUTO_THRESHOLD_STEP,
    DEFAULT_MAX_STARS, DEFAULT_MIN_RAW_POINTS, MAX_AUTO_THRESHOLD_STEPS,
};
use crate::error::{Result, StarpackError};

/// How the brightness (HSV value) cut-off for star pixels is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum ThresholdMode {
    /// Lower the threshold step by step until enough bright pixels are found.
    #[default]
    Auto,
    /// Scan once at this threshold in (0.0, 1.0).
    Fixed(f64),
}

impl ThresholdMode {
    /// Map a raw threshold value to a mode; `0.0` means automatic.
    pub fn from_value(value: f64) -> Self {
        if value == 0.0 {
            Self::Auto
        } else {
            Self::Fixed(value)
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Auto => Ok(()),
            Self::Fixed(v) if v > 0.0 && v < 1.0 => Ok(()),
            Self::Fixed(v) => Err(StarpackError::InvalidThreshold(v)),
        }
    }
}

impl fmt::Display for ThresholdMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "Auto"),
            Self::Fixed(v) => write!(f, "Fixed ({v:.2})"),
        }
    }
}

/// Configuration for star extraction from a single frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Threshold used for the reference frame. Other frames reuse whatever
    /// threshold the reference ended up with.
    #[serde(default)]
    pub threshold: ThresholdMode,
    /// First threshold tried in automatic mode.
    #[serde(default = "default_auto_start")]
    pub auto_start: f64,
    /// Decrement between automatic scans.
    #[serde(default = "default_auto_step")]
    pub auto_step: f64,
    /// Lowest threshold tried in automatic mode.
    #[serde(default = "default_auto_floor")]
    pub auto_floor: f64,
    /// Automatic mode stops once this many bright pixels are found.
    #[serde(default = "default_min_raw_points")]
    pub min_raw_points: usize,
    /// Number of largest stars kept after clustering.
    #[serde(default = "default_max_stars")]
    pub max_stars: usize,
}

fn default_auto_start() -> f64 {
    DEFAULT_AUTO_THRESHOLD_START
}
fn default_auto_step() -> f64 {
    DEFAULT_AUTO_THRESHOLD_STEP
}
fn default_auto_floor() -> f64 {
    DEFAULT_AUTO_THRESHOLD_FLOOR
}
fn default_min_raw_points() -> usize {
    DEFAULT_MIN_RAW_POINTS
}
fn default_max_stars() -> usize {
    DEFAULT_MAX_STARS
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            threshold: ThresholdMode::default(),
            auto_start: DEFAULT_AUTO_THRESHOLD_START,
            auto_step: DEFAULT_AUTO_THRESHOLD_STEP,
            auto_floor: DEFAULT_AUTO_THRESHOLD_FLOOR,
            min_raw_points: DEFAULT_MIN_RAW_POINTS,
            max_stars: DEFAULT_MAX_STARS,
        }
    }
}

impl DetectionConfig {
    pub fn validate(&self) -> Result<()> {
        self.threshold.validate()?;
        for v in [self.auto_start, self.auto_floor] {
            ThresholdMode::Fixed(v).validate()?;
        }
        if self.auto_step.is_nan() || self.auto_step <= 0.0 {
            return Err(StarpackError::InvalidThreshold(self.auto_step));
        }
        if self.auto_floor > self.auto_start {
            return Err(StarpackError::InvalidThreshold(self.auto_floor));
        }
        if (self.auto_start - self.auto_floor) / self.auto_step > MAX_AUTO_THRESHOLD_STEPS {
            return Err(StarpackError::InvalidThreshold(self.auto_step));
        }
        Ok(())
    }
}
