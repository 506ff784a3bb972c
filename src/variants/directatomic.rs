use super::ClusterSums;
use crate::{helpers, memory::*};
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// f64 accumulator updated with a compare-and-swap loop over its bit pattern.
#[derive(Default)]
struct AtomicF64(AtomicU64);
impl AtomicF64 {
    #[inline(always)]
    fn fetch_add(&self, v: f64) {
        let mut current = self.0.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + v).to_bits();
            match self.0.compare_exchange_weak(current, next, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => return,
                Err(observed) => current = observed
            }
        }
    }
    fn into_inner(self) -> f64 {
        f64::from_bits(self.0.into_inner())
    }
}

/// Shared accumulators every worker writes into directly, one atomic operation per point and field.
struct SharedSums {
    sum_x: Vec<AtomicF64>,
    sum_y: Vec<AtomicF64>,
    count: Vec<AtomicUsize>
}
impl SharedSums {
    fn new(k: usize) -> Self {
        Self {
            sum_x: (0..k).map(|_| AtomicF64::default()).collect(),
            sum_y: (0..k).map(|_| AtomicF64::default()).collect(),
            count: (0..k).map(|_| AtomicUsize::new(0)).collect()
        }
    }
    fn into_sums(self) -> ClusterSums {
        ClusterSums {
            sum_x: self.sum_x.into_iter().map(AtomicF64::into_inner).collect(),
            sum_y: self.sum_y.into_iter().map(AtomicF64::into_inner).collect(),
            count: self.count.into_iter().map(AtomicUsize::into_inner).collect()
        }
    }
}

/// Accumulate on the current rayon pool, applying each point's contribution atomically.
pub(crate) fn accumulate<T: Primitive>(points: &[Point<T>], k: usize) -> ClusterSums {
    let shared = SharedSums::new(k);
    let work_packet_size = helpers::work_packet_size(points.len(), rayon::current_num_threads());
    points.par_iter()
        .with_min_len(work_packet_size)
        .for_each(|p| {
            if let Some(c) = p.cluster {
                shared.sum_x[c].fetch_add(p.x.as_f64());
                shared.sum_y[c].fetch_add(p.y.as_f64());
                shared.count[c].fetch_add(1, Ordering::Relaxed);
            }
        });
    // the parallel iterator has joined: no worker holds a reference anymore
    shared.into_sums()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_f64_concurrent_adds() {
        let acc = AtomicF64::default();
        let pool = rayon::ThreadPoolBuilder::new().num_threads(8).build().unwrap();
        pool.install(|| (0..100_000).into_par_iter().for_each(|_| acc.fetch_add(0.5)));
        assert_eq!(acc.into_inner(), 50_000.0);
    }

    #[test]
    fn sums_match_sequential() {
        let points: Vec<Point<f64>> = (0..1000)
            .map(|i| Point { x: i as f64, y: (2 * i) as f64, cluster: Some(i % 3) })
            .collect();
        let mut should = ClusterSums::new(3);
        points.iter().for_each(|p| should.add(p));

        let pool = rayon::ThreadPoolBuilder::new().num_threads(3).build().unwrap();
        // integral values below 2^53: every summation order is exact
        assert_eq!(pool.install(|| accumulate(&points, 3)), should);
    }
}
