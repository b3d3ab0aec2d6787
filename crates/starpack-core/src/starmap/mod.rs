//! Star maps: the comparable star-pattern fingerprint of a frame.

mod map;
mod pair;
mod render;
mod star;

pub use map::{Bounds, StarMap};
pub(crate) use map::best_pair_score;
pub use pair::StarMapPair;
pub use star::Star;
