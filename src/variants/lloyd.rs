use crate::{ConvergenceController, IterationReport, KMeans, KMeansHooks, KMeansState, RunStatus, memory::*};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Drive assignment and update passes until the [`ConvergenceController`] reaches a terminal state.
///
/// Each pass runs to completion on the engine's pool before the next one starts, so centroids are
/// never read while they are being written.
pub(crate) fn calculate<T: Primitive>(kmean: &KMeans, store: &mut PointStore<T>, hooks: &KMeansHooks<'_, T>) -> KMeansState<T> {
    let config = kmean.config();
    if store.len() != config.num_points || store.k() != config.k {
        debug!(points = store.len(), k = store.k(), configured_points = config.num_points, configured_k = config.k,
            "store size differs from the configuration, clustering the store as given");
    }
    (hooks.init_done)(store.centroids());

    let mut controller = ConvergenceController::new(config.max_iterations);
    let run_start = Instant::now();
    let status = loop {
        let started = run_start.elapsed();
        let changed = kmean.update_cluster_assignments(store);
        let sums = kmean.accumulate(store);
        let empty_clusters = sums.apply(&mut store.centroids);
        let status = controller.next(changed);
        let finished = run_start.elapsed();

        debug!(iteration = controller.iteration_count(), changed, empty_clusters,
            elapsed_ms = (finished - started).as_secs_f64() * 1e3, "iteration done");
        if empty_clusters > 0 {
            debug!(empty_clusters, "empty clusters keep their previous centroid");
        }
        (hooks.iteration_done)(&IterationReport {
            iteration: controller.iteration_count(),
            started,
            finished,
            changed,
            centroids: store.centroids(),
            counts: &sums.count
        });

        if status.is_terminal() {
            break status;
        }
    };
    let elapsed = run_start.elapsed();

    if status == RunStatus::IterationLimitReached {
        warn!(max_iterations = config.max_iterations, "labels still changing at the iteration limit");
    }
    info!(%status, iterations = controller.iteration_count(), elapsed_s = elapsed.as_secs_f64(),
        threads = config.num_threads, strategy = %config.strategy, points = store.len(), k = store.k(),
        "k-means finished");

    KMeansState {
        k: store.k(),
        centroids: store.centroids().to_vec(),
        centroid_frequency: store.cluster_frequencies(),
        iterations: controller.iteration_count(),
        status,
        elapsed
    }
}
