//! Clustering Engine - two-phase k-means refinement
//!
//! CORE LOGIC - deterministic given centroid order and positions.
//! Always runs the configured number of iterations; no early exit.

use serde::Serialize;

use super::centroid::Centroid;
use crate::logic::features::FeatureVector;

// ============================================================================
// RESULT TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IterationStats {
    /// 1-based
    pub iteration: usize,
    /// Points whose centroid changed (all points on the first iteration)
    pub reassigned: usize,
    /// Centroids that kept their position for lack of members
    pub empty_centroids: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusteringSummary {
    pub iterations: usize,
    /// Final centroid index per feature
    pub assignments: Vec<usize>,
    pub history: Vec<IterationStats>,
    /// First iteration from which assignments never changed again
    pub stable_since: Option<usize>,
    /// Sum of squared distances to the assigned centroid
    pub inertia: f64,
}

// ============================================================================
// PHASES
// ============================================================================

/// Index of the closest centroid. Ties go to the lowest index.
pub fn nearest_centroid(point: &FeatureVector, centroids: &[Centroid]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (index, centroid) in centroids.iter().enumerate() {
        let dist = point.distance_to(&centroid.position);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((index, dist)),
        }
    }

    best.map(|(index, _)| index)
}

/// Assignment phase: rebuild every centroid's member set from scratch
pub fn assign_points(features: &[FeatureVector], centroids: &mut [Centroid]) -> Vec<usize> {
    for centroid in centroids.iter_mut() {
        centroid.reset();
    }

    let mut assignments = Vec::with_capacity(features.len());
    for (index, point) in features.iter().enumerate() {
        if let Some(best) = nearest_centroid(point, centroids) {
            centroids[best].add_point(index);
            assignments.push(best);
        }
    }
    assignments
}

/// Update phase. Returns the number of centroids left in place (no members).
pub fn update_centroids(features: &[FeatureVector], centroids: &mut [Centroid]) -> usize {
    let mut unchanged = 0;
    for centroid in centroids.iter_mut() {
        if !centroid.recalculate_position(features) {
            unchanged += 1;
        }
    }
    unchanged
}

pub fn compute_inertia(
    features: &[FeatureVector],
    centroids: &[Centroid],
    assignments: &[usize],
) -> f64 {
    features
        .iter()
        .zip(assignments.iter())
        .map(|(point, &c)| point.squared_distance_to(&centroids[c].position))
        .sum()
}

// ============================================================================
// LOOP
// ============================================================================

/// Run exactly `iterations` assignment + update rounds in place
pub fn run_iterations(
    features: &[FeatureVector],
    centroids: &mut [Centroid],
    iterations: usize,
) -> ClusteringSummary {
    let mut previous: Option<Vec<usize>> = None;
    let mut history = Vec::with_capacity(iterations);
    let mut stable_since = None;

    for iteration in 1..=iterations {
        let assignments = assign_points(features, centroids);

        let reassigned = match &previous {
            Some(prev) => prev
                .iter()
                .zip(assignments.iter())
                .filter(|(a, b)| a != b)
                .count(),
            None => assignments.len(),
        };

        if previous.is_some() && reassigned == 0 {
            stable_since.get_or_insert(iteration);
        } else {
            stable_since = None;
        }

        let empty_centroids = update_centroids(features, centroids);

        tracing::debug!(
            "Iteration {}/{}: {} reassigned, {} empty centroids",
            iteration,
            iterations,
            reassigned,
            empty_centroids
        );

        history.push(IterationStats {
            iteration,
            reassigned,
            empty_centroids,
        });
        previous = Some(assignments);
    }

    let assignments = previous.unwrap_or_default();
    let inertia = compute_inertia(features, centroids, &assignments);

    ClusteringSummary {
        iterations,
        assignments,
        history,
        stable_since,
        inertia,
    }
}
