use std::fmt;

use crate::error::{Result, StarpackError};

use super::star::Star;

/// Image-space rectangle a star map's coordinates are relative to.
/// `max_x`/`max_y` are exclusive, as for image dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounds of a `width` x `height` image anchored at the origin.
    pub fn from_dimensions(width: usize, height: usize) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    /// Pivot used for rotations. Frames are anchored at the origin, so this
    /// is half of the maximum corner.
    pub fn center(&self) -> (f64, f64) {
        (self.max_x as f64 / 2.0, self.max_y as f64 / 2.0)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})-({},{})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

/// The star pattern of one frame.
///
/// Transforms never mutate in place: `offset` and `rotate` return new maps.
#[derive(Clone, Debug, PartialEq)]
pub struct StarMap {
    pub bounds: Bounds,
    pub stars: Vec<Star>,
}

impl StarMap {
    pub fn new(bounds: Bounds, stars: Vec<Star>) -> Self {
        Self { bounds, stars }
    }

    pub fn empty(bounds: Bounds) -> Self {
        Self::new(bounds, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Copy of the map with every star moved by `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64) -> StarMap {
        let stars = self.stars.iter().map(|s| s.translated(dx, dy)).collect();
        StarMap::new(self.bounds, stars)
    }

    /// Copy of the map with every star rotated by `degrees` about the
    /// center of the bounds. With y growing downward, positive angles turn
    /// from +x toward +y.
    pub fn rotate(&self, degrees: f64) -> StarMap {
        if degrees == 0.0 {
            return self.clone();
        }
        let (cx, cy) = self.bounds.center();
        let (sin, cos) = degrees.to_radians().sin_cos();
        let stars = self
            .stars
            .iter()
            .map(|s| s.rotated(cx, cy, cos, sin))
            .collect();
        StarMap::new(self.bounds, stars)
    }

    /// True if `(x, y)` lies inside any star.
    pub fn intersects(&self, x: f64, y: f64) -> bool {
        self.stars.iter().any(|s| s.intersects(x, y))
    }

    /// Sum of pairwise overlaps between the two maps, divided by the number
    /// of stars in `self`.
    pub fn overlap(&self, other: &StarMap) -> Result<f64> {
        self.ensure_same_bounds(other)?;
        if self.is_empty() {
            return Err(StarpackError::NoStarsDetected);
        }
        let total: f64 = self
            .stars
            .iter()
            .flat_map(|a| other.stars.iter().map(move |b| a.overlap(b)))
            .sum();
        Ok(total / self.len() as f64)
    }

    /// Highest overlap of any single pair of stars across the two maps.
    ///
    /// This is the alignment objective. It rewards one well-matched pair
    /// rather than congruence of the whole pattern, so a single bright star
    /// can dominate the score.
    pub fn best_pair_overlap(&self, other: &StarMap) -> Result<f64> {
        self.ensure_same_bounds(other)?;
        if self.is_empty() || other.is_empty() {
            return Err(StarpackError::NoStarsDetected);
        }
        Ok(best_pair_score(&self.stars, &other.stars))
    }

    /// The `n` largest stars by size, largest first. Equal sizes keep their
    /// current relative order.
    pub fn largest(&self, n: usize) -> StarMap {
        let mut stars = self.stars.clone();
        stars.sort_by(|a, b| b.size.total_cmp(&a.size));
        stars.truncate(n);
        StarMap::new(self.bounds, stars)
    }

    pub fn validate(&self) -> Result<()> {
        self.stars.iter().try_for_each(Star::validate)
    }

    pub fn ensure_same_bounds(&self, other: &StarMap) -> Result<()> {
        if self.bounds != other.bounds {
            return Err(StarpackError::BoundsMismatch {
                reference: self.bounds,
                candidate: other.bounds,
            });
        }
        Ok(())
    }
}

/// Maximum pairwise overlap; 0.0 when either side is empty.
pub(crate) fn best_pair_score(reference: &[Star], candidate: &[Star]) -> f64 {
    let mut best = 0.0;
    for a in reference {
        for b in candidate {
            let overlap = a.overlap(b);
            if overlap > best {
                best = overlap;
            }
        }
    }
    best
}
