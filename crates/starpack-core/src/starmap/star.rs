//! A single star: a centroid in pixel coordinates plus a radius-like size.

use crate::consts::{NEIGHBOR_INFLATION, RAW_STAR_SIZE};
use crate::error::{Result, StarpackError};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    /// Grows with the square root of the number of pixels merged into the star.
    pub size: f64,
}

impl Star {
    pub fn new(x: f64, y: f64, size: f64) -> Self {
        Self { x, y, size }
    }

    /// A single detected bright pixel.
    pub fn pixel(x: usize, y: usize) -> Self {
        Self::new(x as f64, y as f64, RAW_STAR_SIZE)
    }

    pub fn distance(&self, other: &Star) -> f64 {
        self.distance_to(other.x, other.y)
    }

    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }

    /// Similarity of two stars derived from the distance between their centers.
    ///
    /// Coincident centers score exactly 1.0 and stars whose circles do not
    /// touch score 0.0. Touching stars score `(a.size + b.size) / d`, which
    /// exceeds 1.0 for close, non-coincident pairs: treat the value as a
    /// score, not as a fraction of shared area.
    pub fn overlap(&self, other: &Star) -> f64 {
        let d = self.distance(other);
        if d == 0.0 {
            return 1.0;
        }
        let reach = self.size + other.size;
        if d > reach {
            return 0.0;
        }
        reach / d
    }

    /// True when this star, grown by one pixel, touches `other`.
    pub fn is_neighbor(&self, other: &Star) -> bool {
        let inflated = Star {
            size: self.size + NEIGHBOR_INFLATION,
            ..*self
        };
        inflated.overlap(other) > 0.0
    }

    /// True when `(x, y)` lies strictly inside the star's radius.
    pub fn intersects(&self, x: f64, y: f64) -> bool {
        self.distance_to(x, y) - self.size < 0.0
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.size)
    }

    /// Rotate the center about `(cx, cy)` given precomputed `cos`/`sin`.
    pub(crate) fn rotated(&self, cx: f64, cy: f64, cos: f64, sin: f64) -> Self {
        let rx = self.x - cx;
        let ry = self.y - cy;
        Self::new(cos * rx - sin * ry + cx, sin * rx + cos * ry + cy, self.size)
    }

    pub fn validate(&self) -> Result<()> {
        if self.x.is_finite() && self.y.is_finite() && self.size.is_finite() && self.size >= 0.0 {
            Ok(())
        } else {
            Err(StarpackError::InvalidStar {
                x: self.x,
                y: self.y,
                size: self.size,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_stars_score_above_one() {
        let a = Star::new(0.0, 0.0, 2.0);
        let b = Star::new(4.0, 0.0, 2.0);
        assert_eq!(a.overlap(&b), 1.0);

        let c = Star::new(1.0, 0.0, 2.0);
        assert_eq!(a.overlap(&c), 4.0);
    }

    #[test]
    fn neighbor_reaches_one_pixel_further() {
        let a = Star::pixel(0, 0);
        assert!(a.is_neighbor(&Star::pixel(3, 0)));
        assert!(!a.is_neighbor(&Star::pixel(4, 0)));
    }

    #[test]
    fn intersects_is_strict() {
        let s = Star::new(5.0, 5.0, 2.0);
        assert!(s.intersects(6.0, 5.0));
        assert!(!s.intersects(7.0, 5.0));
    }

    #[test]
    fn validate_rejects_negative_size() {
        assert!(Star::new(0.0, 0.0, -1.0).validate().is_err());
        assert!(Star::new(f64::NAN, 0.0, 1.0).validate().is_err());
        assert!(Star::new(1.0, 2.0, 0.0).validate().is_ok());
    }
}
