//! Transaction Feature Extraction

use super::layout::{LOG_VALUE_INDEX, TIME_BUCKET_INDEX, TIME_BUCKET_MODULUS};
use super::vector::FeatureVector;
use crate::logic::transaction::TransactionRecord;

/// Maps one transaction to a point in feature space
pub trait FeatureExtractor {
    fn extract(&self, tx: &TransactionRecord) -> FeatureVector;
}

/// [ln(value + 1), timestamp mod 100000]
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueTimeExtractor;

impl ValueTimeExtractor {
    /// Compresses heavy-tailed values; 0 maps to 0
    pub fn log_value(value: f64) -> f64 {
        value.ln_1p()
    }

    pub fn time_bucket(timestamp: u64) -> f64 {
        (timestamp % TIME_BUCKET_MODULUS) as f64
    }
}

impl FeatureExtractor for ValueTimeExtractor {
    fn extract(&self, tx: &TransactionRecord) -> FeatureVector {
        let mut vector = FeatureVector::zero();
        vector.values[LOG_VALUE_INDEX] = Self::log_value(tx.value);
        vector.values[TIME_BUCKET_INDEX] = Self::time_bucket(tx.timestamp);
        vector
    }
}

/// Same length and order as `records`
pub fn extract_all<E: FeatureExtractor + ?Sized>(
    extractor: &E,
    records: &[TransactionRecord],
) -> Vec<FeatureVector> {
    records.iter().map(|tx| extractor.extract(tx)).collect()
}
