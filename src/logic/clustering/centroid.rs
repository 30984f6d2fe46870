//! Centroid - cluster position plus its current members

use crate::logic::features::FeatureVector;

/// Members are indices into the run's feature arena and are rebuilt every iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct Centroid {
    pub position: FeatureVector,
    assigned: Vec<usize>,
}

impl Centroid {
    pub fn new(position: FeatureVector) -> Self {
        Self {
            position,
            assigned: Vec::new(),
        }
    }

    pub fn assigned(&self) -> &[usize] {
        &self.assigned
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    /// Clear members before a new assignment phase
    pub fn reset(&mut self) {
        self.assigned.clear();
    }

    pub fn add_point(&mut self, feature_index: usize) {
        self.assigned.push(feature_index);
    }

    /// Move to the mean of the assigned points.
    ///
    /// Returns `false` when there are no members; the position is left as is.
    pub fn recalculate_position(&mut self, features: &[FeatureVector]) -> bool {
        if self.assigned.is_empty() {
            return false;
        }

        match FeatureVector::mean(self.assigned.iter().map(|&i| &features[i])) {
            Some(mean) => {
                self.position = mean;
                true
            }
            None => false,
        }
    }
}
