use crate::memory::*;
use crate::{KMeansError, Result};

/// Check precomputed input before it is handed to a [`PointStore`]: both collections must be non-empty,
/// and labels that are already set have to reference an existing centroid.
pub(crate) fn validate<T: Primitive>(points: &[Point<T>], centroids: &[Centroid<T>]) -> Result<()> {
    if points.is_empty() {
        return Err(KMeansError::Configuration("precomputed input contains no points".to_string()));
    }
    if centroids.is_empty() {
        return Err(KMeansError::Configuration("precomputed input contains no centroids".to_string()));
    }
    if let Some(idx) = points.iter().position(|p| p.cluster.map_or(false, |c| c >= centroids.len())) {
        return Err(KMeansError::Configuration(format!(
            "point {} is labeled with a cluster outside of [0, {})", idx, centroids.len()
        )));
    }
    Ok(())
}
