//! Centroid Initializer

use super::centroid::Centroid;
use super::sampling::SampleSource;
use crate::error::{ClusterError, ClusterResult};
use crate::logic::features::FeatureVector;

/// Seed `k` centroids from independently sampled feature indices.
///
/// Sampling is with replacement, so two centroids may start on the same point.
pub fn initialize_centroids<S: SampleSource + ?Sized>(
    features: &[FeatureVector],
    k: usize,
    source: &mut S,
) -> ClusterResult<Vec<Centroid>> {
    if k == 0 {
        return Err(ClusterError::InvalidConfig(
            "cluster count must be a positive integer".to_string(),
        ));
    }
    if features.is_empty() || k > features.len() {
        return Err(ClusterError::InsufficientData {
            requested: k,
            available: features.len(),
        });
    }

    let n = features.len();
    let centroids = (0..k)
        .map(|_| Centroid::new(features[source.sample_index(n) % n]))
        .collect();

    Ok(centroids)
}
