use crate::{KMeans, KMeansError, KMeansHooks, Primitive, Result, RunConfig, RunStatus};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// How the [`ScalingHarness`] varies the problem across its runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalingMode {
    /// A single run with the base configuration
    None,
    /// Fixed point count, increasing worker count
    Strong,
    /// Point count growing proportionally with the worker count
    Weak
}
impl fmt::Display for ScalingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScalingMode::None => "none",
            ScalingMode::Strong => "strong",
            ScalingMode::Weak => "weak"
        })
    }
}
impl FromStr for ScalingMode {
    type Err = KMeansError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "0" => Ok(ScalingMode::None),
            "strong" | "1" => Ok(ScalingMode::Strong),
            "weak" | "2" => Ok(ScalingMode::Weak),
            other => Err(KMeansError::Configuration(format!(
                "unknown scaling mode '{}' (expected 'none', 'strong' or 'weak')", other
            )))
        }
    }
}

/// Measurement of one complete run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalingSample {
    pub threads: usize,
    pub num_points: usize,
    pub iterations: usize,
    pub status: RunStatus,
    /// Duration of the iteration loop only
    pub elapsed: Duration
}

/// Worker counts `1, 2, 4, …` up to (and including, if a power of two) **max_threads**.
pub fn thread_progression(max_threads: usize) -> impl Iterator<Item = usize> {
    std::iter::successors(Some(1usize), |t| t.checked_mul(2))
        .take_while(move |&t| t <= max_threads)
}

/// Repeats independent k-means runs across worker counts.
///
/// Every run gets its own engine, pool, point set and centroids. Run `i` of a sweep is seeded with
/// `seed + i`. The first failing run aborts the whole sweep.
#[derive(Clone, Debug)]
pub struct ScalingHarness {
    base: RunConfig,
    max_threads: usize,
    seed: u64
}
impl ScalingHarness {
    /// ## Arguments
    /// - **base**: Configuration of the non-scaled run; its point count is `N0` of the sweeps
    /// - **max_threads**: Largest worker count a sweep goes up to
    /// - **seed**: Base seed, usually derived from the wall-clock time at invocation
    pub fn new(base: RunConfig, max_threads: usize, seed: u64) -> Self {
        Self { base, max_threads, seed }
    }

    /// Configurations of all runs **mode** performs, in execution order.
    pub fn configurations(&self, mode: ScalingMode) -> Result<Vec<RunConfig>> {
        self.base.validate()?;
        if mode != ScalingMode::None && self.max_threads == 0 {
            return Err(KMeansError::Configuration("max_threads must be greater than 0".to_string()));
        }
        match mode {
            ScalingMode::None => Ok(vec![self.base]),
            ScalingMode::Strong => Ok(thread_progression(self.max_threads)
                .map(|t| self.base.with_num_threads(t))
                .collect()),
            ScalingMode::Weak => thread_progression(self.max_threads)
                .map(|t| -> Result<RunConfig> {
                    let num_points = self.base.num_points.checked_mul(t).ok_or_else(|| KMeansError::Configuration(
                        format!("{} points times {} threads overflows", self.base.num_points, t)))?;
                    Ok(self.base.with_num_threads(t).with_num_points(num_points))
                })
                .collect()
        }
    }

    /// Execute every run of **mode** and collect its measurements.
    pub fn run<T: Primitive>(&self, mode: ScalingMode) -> Result<Vec<ScalingSample>> {
        let configs = self.configurations(mode)?;
        let mut samples = Vec::with_capacity(configs.len());
        for (run_idx, config) in configs.into_iter().enumerate() {
            let sample = Self::run_single::<T>(config, self.run_seed(run_idx))?;
            info!(%mode, threads = sample.threads, points = sample.num_points, iterations = sample.iterations,
                elapsed_s = sample.elapsed.as_secs_f64(), "scaling sample");
            samples.push(sample);
        }
        Ok(samples)
    }

    /// Seed of run **run_idx** of a sweep. Chunk generators are drawn from a generator seeded with it, so neighbouring
    /// runs do not share any point chunk.
    pub fn run_seed(&self, run_idx: usize) -> u64 {
        self.seed.wrapping_add(run_idx as u64)
    }

    /// One independent run: fresh engine, fresh points and centroids from **seed**.
    pub fn run_single<T: Primitive>(config: RunConfig, seed: u64) -> Result<ScalingSample> {
        let kmean = KMeans::new(config)?;
        let mut store = kmean.generate::<T>(seed)?;
        let res = kmean.kmeans_lloyd(&mut store, &KMeansHooks::default());
        Ok(ScalingSample {
            threads: config.num_threads,
            num_points: config.num_points,
            iterations: res.iterations,
            status: res.status,
            elapsed: res.elapsed
        })
    }
}
