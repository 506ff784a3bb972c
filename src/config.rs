use crate::{AccumulationStrategy, KMeansError, Result};

/// Configuration of one clustering run. Immutable for the duration of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Number of points to generate
    pub num_points: usize,

    /// Number of clusters (K)
    pub k: usize,

    /// Maximum number of assignment/update iterations
    pub max_iterations: usize,

    /// Size of the worker pool the run executes on
    pub num_threads: usize,

    /// How the centroid-update step accumulates per-cluster sums
    pub strategy: AccumulationStrategy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            num_points: 10_000_000,
            k: 50,
            max_iterations: 150,
            num_threads: default_num_threads(),
            strategy: AccumulationStrategy::LocalMerge,
        }
    }
}

impl RunConfig {
    /// Set the number of points
    pub fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }

    /// Set the number of clusters
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the iteration cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the worker pool size
    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    /// Set the accumulation strategy
    pub fn with_strategy(mut self, strategy: AccumulationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Reject parameters no run can be started with. Called before anything is allocated.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            (self.num_points, "num_points"),
            (self.k, "k"),
            (self.max_iterations, "max_iterations"),
            (self.num_threads, "num_threads"),
        ];
        match checks.iter().find(|(value, _)| *value == 0) {
            Some((_, name)) => Err(KMeansError::Configuration(format!("{} must be greater than 0", name))),
            None => Ok(()),
        }
    }
}

/// Maximum parallelism reported by the hardware, or 1 if it cannot be determined.
pub fn default_num_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = RunConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.num_threads >= 1);
    }

    #[test]
    fn zero_fields_are_rejected() {
        let base = RunConfig::default();
        for config in [
            base.with_num_points(0),
            base.with_k(0),
            base.with_max_iterations(0),
            base.with_num_threads(0),
        ] {
            match config.validate() {
                Err(KMeansError::Configuration(msg)) => assert!(msg.contains("greater than 0")),
                other => panic!("expected configuration error, got {:?}", other),
            }
        }
    }

    #[test]
    fn builder() {
        let config = RunConfig::default()
            .with_num_points(6)
            .with_k(2)
            .with_max_iterations(10)
            .with_num_threads(3)
            .with_strategy(AccumulationStrategy::DirectAtomic);
        assert_eq!(config.num_points, 6);
        assert_eq!(config.k, 2);
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.num_threads, 3);
        assert_eq!(config.strategy, AccumulationStrategy::DirectAtomic);
    }
}
