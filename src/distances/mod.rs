mod euclideandistance;

pub use euclideandistance::distance_sq;

use crate::memory::*;

/// Index of the centroid closest to **p**.
///
/// Centroids are scanned from index 0 upward and the best candidate is only replaced on a strict
/// improvement, so ties resolve to the lowest index.
#[inline(always)]
pub fn nearest_centroid<T: Primitive>(p: &Point<T>, centroids: &[Centroid<T>]) -> usize {
    let mut best_idx = 0;
    let mut best_dist = distance_sq(p, &centroids[0]);
    for (idx, c) in centroids.iter().enumerate().skip(1) {
        let d = distance_sq(p, c);
        if d < best_dist {
            best_dist = d;
            best_idx = idx;
        }
    }
    best_idx
}
