//! Report Module - final centroid listing
//!
//! `build_report` snapshots the run; `render_text` gives the human listing
//! (4 decimal places), `to_json_pretty` the structured form.

pub mod types;


use chrono::Utc;
use uuid::Uuid;

use crate::logic::clustering::{Centroid, ClusteringSummary};
use crate::logic::features::LayoutInfo;
use crate::logic::transaction::TransactionRecord;

pub use types::{CentroidSummary, ClusterReport, TypeBreakdown};

/// Decimal places in the text listing
pub const COORDINATE_PRECISION: usize = 4;

/// Snapshot final centroids. Read-only over the run state.
pub fn build_report(
    transactions: &[TransactionRecord],
    centroids: &[Centroid],
    summary: Option<&ClusteringSummary>,
    skipped_entries: usize,
) -> ClusterReport {
    let summaries = centroids
        .iter()
        .enumerate()
        .map(|(index, centroid)| {
            let mut breakdown = TypeBreakdown::default();
            for &member in centroid.assigned() {
                if let Some(tx) = transactions.get(member) {
                    breakdown.record(tx.tx_type);
                }
            }

            CentroidSummary {
                index,
                position: centroid.position.as_slice().to_vec(),
                members: centroid.len(),
                breakdown,
            }
        })
        .collect();

    ClusterReport {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        clusters: centroids.len(),
        iterations: summary.map_or(0, |s| s.iterations),
        transactions: transactions.len(),
        skipped_entries,
        stable_since: summary.and_then(|s| s.stable_since),
        inertia: summary.map_or(0.0, |s| s.inertia),
        layout: LayoutInfo::current(),
        centroids: summaries,
    }
}

impl CentroidSummary {
    /// `Centroid 0: (0.0000, 12345.0000) members=3`
    pub fn render_line(&self) -> String {
        let coords = self
            .position
            .iter()
            .map(|v| format!("{:.*}", COORDINATE_PRECISION, v))
            .collect::<Vec<_>>()
            .join(", ");

        format!("Centroid {}: ({}) members={}", self.index, coords, self.members)
    }
}

impl ClusterReport {
    /// One line per centroid, newline-terminated
    pub fn render_text(&self) -> String {
        self.centroids
            .iter()
            .map(|c| c.render_line() + "\n")
            .collect()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl std::fmt::Display for ClusterReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render_text())
    }
}
