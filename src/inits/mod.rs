//! Sources of the initial point set and centroids of a run.

pub(crate) mod precomputed;
pub(crate) mod randomsample;
