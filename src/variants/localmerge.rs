use super::ClusterSums;
use crate::{helpers, memory::*};
use rayon::prelude::*;
use std::sync::{Mutex, PoisonError};

/// Accumulate on the current rayon pool. The points are split into one contiguous share per worker;
/// each share is summed into private accumulators, which are then merged into the shared result under
/// a mutex: one critical section per worker, not per point.
pub(crate) fn accumulate<T: Primitive>(points: &[Point<T>], k: usize) -> ClusterSums {
    let shared = Mutex::new(ClusterSums::new(k));
    let share_len = helpers::work_packet_size(points.len(), rayon::current_num_threads());
    points.par_chunks(share_len)
        .for_each(|share| {
            let mut local = ClusterSums::new(k);
            share.iter().for_each(|p| local.add(p));
            shared.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .merge(&local);
        });
    shared.into_inner().unwrap_or_else(PoisonError::into_inner)
}
