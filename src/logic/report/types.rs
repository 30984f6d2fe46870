//! Report Types
//!
//! Serializable run result. No rendering logic here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::features::LayoutInfo;
use crate::logic::transaction::TransactionType;

/// Member counts per transaction type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeBreakdown {
    pub transfer: usize,
    pub contract_call: usize,
    pub unknown: usize,
}

impl TypeBreakdown {
    pub fn record(&mut self, tx_type: TransactionType) {
        match tx_type {
            TransactionType::Transfer => self.transfer += 1,
            TransactionType::ContractCall => self.contract_call += 1,
            TransactionType::Unknown => self.unknown += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.transfer + self.contract_call + self.unknown
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentroidSummary {
    pub index: usize,
    pub position: Vec<f64>,
    pub members: usize,
    pub breakdown: TypeBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub clusters: usize,
    pub iterations: usize,
    pub transactions: usize,
    pub skipped_entries: usize,
    pub stable_since: Option<usize>,
    pub inertia: f64,
    pub layout: LayoutInfo,
    pub centroids: Vec<CentroidSummary>,
}
