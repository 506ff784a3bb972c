use crate::{distances, helpers, memory::*, variants::ClusterSums, Result, RunConfig, RunStatus};
use rayon::prelude::*;
use std::time::Duration;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&[Centroid<T>]);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&IterationReport<'_, T>);

/// Callbacks to get status information from a running k-means calculation, e.g. to write a run log.
/// The engine itself never owns any output handle.
///
/// For a more detailed information about all possible options, have a look at [`KMeansHooksBuilder`].
pub struct KMeansHooks<'a, T: Primitive> {
    /// Callback that is called with the initial centroids, before the first iteration
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>
}
impl<'a, T: Primitive> Default for KMeansHooks<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_| {}
        }
    }
}
impl<'a, T: Primitive> KMeansHooks<'a, T> {
    /// Use the [`KMeansHooksBuilder`] to build a [`KMeansHooks`] instance.
    pub fn build() -> KMeansHooksBuilder<'a, T> {
        KMeansHooksBuilder { hooks: KMeansHooks::default() }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansHooks<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KMeansHooks")
    }
}

pub struct KMeansHooksBuilder<'a, T: Primitive> {
    hooks: KMeansHooks<'a, T>
}
impl<'a, T: Primitive> KMeansHooksBuilder<'a, T> {
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.hooks.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.hooks.iteration_done = iteration_done; self
    }
    /// Return the internally built hooks structure.
    pub fn build(self) -> KMeansHooks<'a, T> { self.hooks }
}


/// Snapshot handed to [`KMeansHooks`] after every iteration.
///
/// ## Fields
/// - **iteration**: 1-based index of the iteration that just completed
/// - **started** / **finished**: Offsets of the iteration's start and end from the start of the run
/// - **changed**: Whether the assignment pass changed any label
/// - **centroids**: Centroids after the update pass
/// - **counts**: Amount of points per cluster in this iteration
#[derive(Clone, Copy, Debug)]
pub struct IterationReport<'r, T: Primitive> {
    pub iteration: usize,
    pub started: Duration,
    pub finished: Duration,
    pub changed: bool,
    pub centroids: &'r [Centroid<T>],
    pub counts: &'r [usize]
}
impl<'r, T: Primitive> IterationReport<'r, T> {
    pub fn duration(&self) -> Duration {
        self.finished.saturating_sub(self.started)
    }
}


/// Final state of a k-means calculation. The labels themselves stay in the [`PointStore`].
///
/// ## Fields
/// - **k**: The amount of clusters
/// - **centroids**: Final cluster centers
/// - **centroid_frequency**: Amount of points labeled with each cluster at the end of the run
/// - **iterations**: Amount of completed iterations
/// - **status**: Terminal state the run ended in
/// - **elapsed**: Wall-clock duration of the iteration loop (setup and generation excluded)
#[derive(Clone, Debug)]
pub struct KMeansState<T: Primitive> {
    pub k: usize,
    pub centroids: Vec<Centroid<T>>,
    pub centroid_frequency: Vec<usize>,
    pub iterations: usize,
    pub status: RunStatus,
    pub elapsed: Duration
}


/// Entrypoint of this crate's API-Surface.
///
/// An instance validates a [`RunConfig`] and owns the fixed-size worker pool all of the run's parallel
/// work executes on. Create a new instance to run with a different amount of workers.
pub struct KMeans {
    config: RunConfig,
    pool: rayon::ThreadPool
}
impl KMeans {
    /// Create a new engine instance. Fails with [`crate::KMeansError::Configuration`] before anything
    /// is allocated, if the configuration is invalid.
    pub fn new(config: RunConfig) -> Result<Self> {
        config.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.num_threads)
            .thread_name(|idx| format!("kmeans-worker-{}", idx))
            .build()?;
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &RunConfig { &self.config }

    /// Generate the configured amount of points and K initial centroids from **seed**, using the
    /// engine's workers.
    pub fn generate<T: Primitive>(&self, seed: u64) -> Result<PointStore<T>> {
        self.pool.install(|| PointStore::initialize_seeded(self.config.num_points, self.config.k, seed))
    }

    /// Assignment pass: label every point with its nearest centroid.
    /// ## Returns
    /// **true** if any point's label differs from its label before the pass.
    pub fn update_cluster_assignments<T: Primitive>(&self, store: &mut PointStore<T>) -> bool {
        let (points, centroids) = (&mut store.points, &store.centroids);
        self.pool.install(|| {
            // manually calculate work-packet size, because rayon does not do static scheduling (which is more apropriate here)
            let work_packet_size = helpers::work_packet_size(points.len(), rayon::current_num_threads());
            points.par_iter_mut()
                .with_min_len(work_packet_size)
                .map(|p| {
                    let best = Some(distances::nearest_centroid(p, centroids));
                    let changed = p.cluster != best;
                    p.cluster = best;
                    changed
                })
                .reduce(|| false, |a, b| a || b)
        })
    }

    /// Accumulate the per-cluster sums of the current labels with the configured strategy.
    pub fn accumulate<T: Primitive>(&self, store: &PointStore<T>) -> ClusterSums {
        let (points, k, strategy) = (&store.points, store.k(), self.config.strategy);
        self.pool.install(|| strategy.accumulate(points, k))
    }

    /// Update pass: move every centroid to the mean of its points. Centroids of empty clusters are
    /// left unchanged.
    /// ## Returns
    /// Amount of points per cluster.
    pub fn update_centroids<T: Primitive>(&self, store: &mut PointStore<T>) -> Vec<usize> {
        let sums = self.accumulate(store);
        sums.apply(&mut store.centroids);
        sums.count
    }

    /// Lloyd's k-means: alternate assignment and update passes on **store** until no label changes
    /// or the configured iteration cap is reached.
    ///
    /// The point count and K of the run are those of **store**. The engine's `num_points` and `k`
    /// only size the stores created by [`KMeans::generate`]; the iteration cap, worker count and
    /// strategy always come from the engine's configuration.
    ///
    /// ## Example
    /// ```rust
    /// use kmeans_scaling::*;
    ///
    /// let config = RunConfig::default().with_num_points(20_000).with_k(4).with_num_threads(2);
    /// let kmean = KMeans::new(config).unwrap();
    /// let mut store = kmean.generate::<f64>(1337).unwrap();
    /// let result = kmean.kmeans_lloyd(&mut store, &KMeansHooks::default());
    ///
    /// println!("{} after {} iterations", result.status, result.iterations);
    /// println!("Centroids: {:?}", result.centroids);
    /// ```
    pub fn kmeans_lloyd<T: Primitive>(&self, store: &mut PointStore<T>, hooks: &KMeansHooks<'_, T>) -> KMeansState<T> {
        crate::variants::lloyd::calculate(self, store, hooks)
    }
}
