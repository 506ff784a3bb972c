use thiserror::Error;

/// Error types of the clustering engine and its scaling harness.
///
/// There is no recoverable error class: configuration is rejected before any work
/// begins, and resource failures abort the run (or the whole sweep).
#[derive(Error, Debug)]
pub enum KMeansError {
    /// Invalid run parameters (zero points, clusters, iterations or threads)
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Point or centroid storage could not be obtained
    #[error("Could not allocate {what} ({requested} elements)")]
    Allocation { what: &'static str, requested: usize },

    /// The worker pool for a run could not be started
    #[error("Could not start worker pool: {0}")]
    WorkerPool(String),
}

impl KMeansError {
    /// Distinct non-zero process status for each error class.
    pub fn exit_code(&self) -> u8 {
        match self {
            KMeansError::Configuration(_) => 2,
            KMeansError::Allocation { .. } => 3,
            KMeansError::WorkerPool(_) => 4,
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for KMeansError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        KMeansError::WorkerPool(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, KMeansError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_and_nonzero() {
        let codes = [
            KMeansError::Configuration("k".into()).exit_code(),
            KMeansError::Allocation { what: "points", requested: 1 }.exit_code(),
            KMeansError::WorkerPool("spawn".into()).exit_code(),
        ];
        assert!(codes.iter().all(|&c| c != 0));
        assert_ne!(codes[0], codes[1]);
        assert_ne!(codes[1], codes[2]);
        assert_ne!(codes[0], codes[2]);
    }
}
