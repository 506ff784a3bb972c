//! Lloyd iteration, and the strategies its centroid-update step can accumulate cluster sums with.

pub(crate) mod directatomic;
pub(crate) mod lloyd;
pub(crate) mod localmerge;

use crate::memory::*;
use crate::KMeansError;
use std::fmt;
use std::str::FromStr;

/// Selects how the per-cluster sums of the centroid-update step are accumulated across workers.
/// Both strategies produce the same centroids up to floating-point summation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccumulationStrategy {
    /// Every point's contribution is applied with an atomic read-modify-write against shared
    /// accumulators. O(N) synchronization events per iteration.
    DirectAtomic,
    /// Every worker accumulates its share of the points into private sums without synchronization,
    /// and then merges them into the shared sums inside a critical section, once per iteration.
    LocalMerge
}
impl AccumulationStrategy {
    pub(crate) fn accumulate<T: Primitive>(self, points: &[Point<T>], k: usize) -> ClusterSums {
        match self {
            AccumulationStrategy::DirectAtomic => directatomic::accumulate(points, k),
            AccumulationStrategy::LocalMerge => localmerge::accumulate(points, k)
        }
    }
}
impl fmt::Display for AccumulationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AccumulationStrategy::DirectAtomic => "atomic",
            AccumulationStrategy::LocalMerge => "local"
        })
    }
}
impl FromStr for AccumulationStrategy {
    type Err = KMeansError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "atomic" | "direct-atomic" => Ok(AccumulationStrategy::DirectAtomic),
            "local" | "local-merge" => Ok(AccumulationStrategy::LocalMerge),
            other => Err(KMeansError::Configuration(format!(
                "unknown accumulation strategy '{}' (expected 'atomic' or 'local')", other
            )))
        }
    }
}


/// Per-cluster coordinate sums and point counts of one update pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterSums {
    pub sum_x: Vec<f64>,
    pub sum_y: Vec<f64>,
    pub count: Vec<usize>
}
impl ClusterSums {
    pub(crate) fn new(k: usize) -> Self {
        Self { sum_x: vec![0.0; k], sum_y: vec![0.0; k], count: vec![0; k] }
    }

    #[inline(always)]
    pub(crate) fn add<T: Primitive>(&mut self, p: &Point<T>) {
        if let Some(c) = p.cluster {
            self.sum_x[c] += p.x.as_f64();
            self.sum_y[c] += p.y.as_f64();
            self.count[c] += 1;
        }
    }

    pub(crate) fn merge(&mut self, other: &ClusterSums) {
        for j in 0..self.count.len() {
            self.sum_x[j] += other.sum_x[j];
            self.sum_y[j] += other.sum_y[j];
            self.count[j] += other.count[j];
        }
    }

    /// Move every non-empty cluster's centroid to the mean of its points. Centroids of empty clusters
    /// keep their coordinates. Returns the amount of empty clusters.
    pub(crate) fn apply<T: Primitive>(&self, centroids: &mut [Centroid<T>]) -> usize {
        let mut empty = 0;
        for (j, c) in centroids.iter_mut().enumerate() {
            if self.count[j] == 0 {
                empty += 1;
                continue;
            }
            let n = self.count[j] as f64;
            c.x = T::lit(self.sum_x[j] / n);
            c.y = T::lit(self.sum_y[j] / n);
        }
        empty
    }
}
