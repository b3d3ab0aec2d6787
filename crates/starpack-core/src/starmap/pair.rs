use crate::error::Result;

use super::map::StarMap;

/// A reference map and a candidate map compared pixel by pixel or star by
/// star. Borrows both maps; construction guarantees equal bounds.
#[derive(Clone, Copy, Debug)]
pub struct StarMapPair<'a> {
    pub reference: &'a StarMap,
    pub candidate: &'a StarMap,
}

impl<'a> StarMapPair<'a> {
    pub fn new(reference: &'a StarMap, candidate: &'a StarMap) -> Result<Self> {
        reference.ensure_same_bounds(candidate)?;
        Ok(Self {
            reference,
            candidate,
        })
    }

    /// Alignment objective for this pair; see [`StarMap::best_pair_overlap`].
    pub fn best_pair_overlap(&self) -> Result<f64> {
        self.reference.best_pair_overlap(self.candidate)
    }

    /// True when both maps agree on whether `(x, y)` is inside a star.
    pub fn is_overlap(&self, x: f64, y: f64) -> bool {
        self.reference.intersects(x, y) == self.candidate.intersects(x, y)
    }

    /// Fraction of pixels in the bounds on which the two maps disagree.
    pub fn difference(&self) -> f64 {
        let bounds = self.reference.bounds;
        let total = bounds.width().max(0) as u64 * bounds.height().max(0) as u64;
        if total == 0 {
            return 0.0;
        }
        let mut mismatched = 0u64;
        for y in bounds.min_y..bounds.max_y {
            for x in bounds.min_x..bounds.max_x {
                if !self.is_overlap(x as f64, y as f64) {
                    mismatched += 1;
                }
            }
        }
        mismatched as f64 / total as f64
    }
}
