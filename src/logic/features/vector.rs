//! Feature Vector - fixed-dimension point in feature space
//!
//! The dimension is a type-level constant, so every vector in a run has the
//! same length and distance is always defined.

use serde::{Deserialize, Serialize};

use super::layout::{FEATURE_COUNT, FEATURE_LAYOUT};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Values in FEATURE_LAYOUT order
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn zero() -> Self {
        Self { values: [0.0; FEATURE_COUNT] }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        super::layout::feature_index(name).and_then(|i| self.get(i))
    }

    /// Euclidean distance
    pub fn distance_to(&self, other: &FeatureVector) -> f64 {
        self.squared_distance_to(other).sqrt()
    }

    pub fn squared_distance_to(&self, other: &FeatureVector) -> f64 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| {
                let diff = a - b;
                diff * diff
            })
            .sum()
    }

    /// Coordinate-wise arithmetic mean. `None` for an empty input.
    pub fn mean<'a, I>(points: I) -> Option<FeatureVector>
    where
        I: IntoIterator<Item = &'a FeatureVector>,
    {
        let mut sum = [0.0f64; FEATURE_COUNT];
        let mut count = 0usize;

        for point in points {
            for (acc, v) in sum.iter_mut().zip(point.values.iter()) {
                *acc += v;
            }
            count += 1;
        }

        if count == 0 {
            return None;
        }

        for acc in sum.iter_mut() {
            *acc /= count as f64;
        }
        Some(FeatureVector { values: sum })
    }

    /// JSON object keyed by feature name, for debug logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::Value::Object(
            FEATURE_LAYOUT
                .iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), serde_json::json!(value)))
                .collect(),
        )
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = FeatureVector::new([0.0, 0.0]);
        let b = FeatureVector::new([3.0, 4.0]);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_mean() {
        let points = [
            FeatureVector::new([0.0, 0.0]),
            FeatureVector::new([2.0, 0.0]),
            FeatureVector::new([4.0, 0.0]),
        ];
        assert_eq!(FeatureVector::mean(&points), Some(FeatureVector::new([2.0, 0.0])));
        let empty: [FeatureVector; 0] = [];
        assert_eq!(FeatureVector::mean(&empty), None);
    }

    #[test]
    fn test_get_by_name() {
        let v = FeatureVector::new([1.5, 300.0]);
        assert_eq!(v.get_by_name("log_value"), Some(1.5));
        assert_eq!(v.get_by_name("time_bucket"), Some(300.0));
        assert_eq!(v.get_by_name("missing"), None);

        let log = v.to_log_entry();
        assert_eq!(log["time_bucket"], 300.0);
    }
}
