//! Merge adjacent bright pixels into stars.
//!
//! Clustering is first-fit on input order: a pixel joins the first open
//! cluster it touches, even if it also touches later ones, and clusters are
//! never merged with each other. Depending on order, pixels of one physical
//! star can therefore end up in two clusters, and a second pass over the
//! output may merge further.

use crate::starmap::{Star, StarMap};

/// Open cluster of raw detections.
#[derive(Clone, Debug)]
struct Cluster {
    members: Vec<Star>,
}

impl Cluster {
    fn new(first: Star) -> Self {
        Self {
            members: vec![first],
        }
    }

    fn is_close_to(&self, star: &Star) -> bool {
        self.members.iter().any(|m| m.is_neighbor(star))
    }

    /// Mean position of the members, with size `sqrt(member count)`.
    fn centroid(&self) -> Star {
        let n = self.members.len() as f64;
        let (sum_x, sum_y) = self
            .members
            .iter()
            .fold((0.0, 0.0), |(sx, sy), s| (sx + s.x, sy + s.y));
        Star::new(sum_x / n, sum_y / n, n.sqrt())
    }
}

/// Replace each group of neighboring stars with one centroid star.
pub fn compress(map: &StarMap) -> StarMap {
    let mut clusters: Vec<Cluster> = Vec::new();

    for star in &map.stars {
        match clusters.iter().position(|c| c.is_close_to(star)) {
            Some(idx) => clusters[idx].members.push(*star),
            None => clusters.push(Cluster::new(*star)),
        }
    }

    let stars = clusters.iter().map(Cluster::centroid).collect();
    StarMap::new(map.bounds, stars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_of_square() {
        let mut cluster = Cluster::new(Star::pixel(0, 0));
        cluster.members.push(Star::pixel(2, 0));
        cluster.members.push(Star::pixel(0, 2));
        cluster.members.push(Star::pixel(2, 2));
        let c = cluster.centroid();
        assert_eq!((c.x, c.y, c.size), (1.0, 1.0, 2.0));
    }

    #[test]
    fn cluster_matches_any_member() {
        let mut cluster = Cluster::new(Star::pixel(0, 0));
        cluster.members.push(Star::pixel(3, 0));
        assert!(cluster.is_close_to(&Star::pixel(6, 0)));
        assert!(!cluster.is_close_to(&Star::pixel(10, 0)));
    }
}
