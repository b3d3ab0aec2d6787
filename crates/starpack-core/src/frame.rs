use ndarray::Array2;

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::error::{Result, StarpackError};

/// A single image channel.
/// Pixel values are f32 in [0.0, 1.0].
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
}

impl Frame {
    pub fn new(data: Array2<f32>) -> Self {
        Self { data }
    }

    pub fn zeros(width: usize, height: usize) -> Self {
        Self::new(Array2::zeros((height, width)))
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

/// Color image composed of separate channel frames.
#[derive(Clone, Debug)]
pub struct ColorFrame {
    pub red: Frame,
    pub green: Frame,
    pub blue: Frame,
}

impl ColorFrame {
    /// Build a color frame, checking that all channels share dimensions.
    pub fn new(red: Frame, green: Frame, blue: Frame) -> Result<Self> {
        let expected = red.data.dim();
        for channel in [&green, &blue] {
            if channel.data.dim() != expected {
                return Err(StarpackError::DimensionMismatch {
                    expected,
                    actual: channel.data.dim(),
                });
            }
        }
        Ok(Self { red, green, blue })
    }

    /// Gray frame replicated to all three channels.
    pub fn from_gray(frame: Frame) -> Self {
        Self {
            red: frame.clone(),
            green: frame.clone(),
            blue: frame,
        }
    }

    pub fn width(&self) -> usize {
        self.red.width()
    }

    pub fn height(&self) -> usize {
        self.red.height()
    }

    /// `(height, width)`, matching `ndarray`'s `dim()`.
    pub fn dim(&self) -> (usize, usize) {
        self.red.data.dim()
    }

    /// HSV value (brightness) of one pixel: the largest channel.
    pub fn value_at(&self, row: usize, col: usize) -> f32 {
        self.red.data[[row, col]]
            .max(self.green.data[[row, col]])
            .max(self.blue.data[[row, col]])
    }

    /// BT.601 luminance of one pixel.
    pub fn luminance_at(&self, row: usize, col: usize) -> f32 {
        LUMINANCE_R * self.red.data[[row, col]]
            + LUMINANCE_G * self.green.data[[row, col]]
            + LUMINANCE_B * self.blue.data[[row, col]]
    }

    pub fn channels(&self) -> [&Frame; 3] {
        [&self.red, &self.green, &self.blue]
    }
}

/// Rigid transform aligning a frame to the reference frame: an integer
/// translation followed by a rotation about the frame center.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OffsetConfig {
    pub x: i32,
    pub y: i32,
    pub rotation_degrees: f64,
}

impl OffsetConfig {
    pub fn new(x: i32, y: i32, rotation_degrees: f64) -> Self {
        Self {
            x,
            y,
            rotation_degrees,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.x == 0 && self.y == 0 && self.rotation_degrees == 0.0
    }
}

impl std::fmt::Display for OffsetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "dx={} dy={} rotation={:.1}\u{b0}",
            self.x, self.y, self.rotation_degrees
        )
    }
}
