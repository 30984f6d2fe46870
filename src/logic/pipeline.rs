//! Transaction Clusterer - pipeline orchestrator
//!
//! Owns the run's arenas (transactions, features, centroids) and drives
//! load → extract → initialize → iterate → report strictly in sequence.

use std::path::Path;

use crate::config::ClusterConfig;
use crate::error::{ClusterError, ClusterResult};
use crate::logic::clustering::{
    initialize_centroids, run_iterations, seeded_rng, Centroid, ClusteringSummary, SampleSource,
};
use crate::logic::features::{extract_all, FeatureExtractor, FeatureVector, ValueTimeExtractor};
use crate::logic::report::{build_report, ClusterReport};
use crate::logic::transaction::{
    load_transactions, LoadMode, LoadedBatch, TransactionRecord, TransactionType,
};

#[derive(Debug, Clone)]
pub struct TransactionClusterer {
    clusters: usize,
    iterations: usize,
    transactions: Vec<TransactionRecord>,
    skipped: usize,
    features: Vec<FeatureVector>,
    centroids: Vec<Centroid>,
    summary: Option<ClusteringSummary>,
}

impl TransactionClusterer {
    pub fn new(clusters: usize, iterations: usize) -> ClusterResult<Self> {
        if clusters == 0 {
            return Err(ClusterError::InvalidConfig(
                "cluster count must be a positive integer".to_string(),
            ));
        }
        if iterations == 0 {
            return Err(ClusterError::InvalidConfig(
                "iteration count must be a positive integer".to_string(),
            ));
        }

        Ok(Self {
            clusters,
            iterations,
            transactions: Vec::new(),
            skipped: 0,
            features: Vec::new(),
            centroids: Vec::new(),
            summary: None,
        })
    }

    pub fn from_config(config: &ClusterConfig) -> ClusterResult<Self> {
        Self::new(config.clusters, config.iterations)
    }

    // ------------------------------------------------------------------------
    // Stages
    // ------------------------------------------------------------------------

    pub fn load_transactions(&mut self, path: &Path, mode: LoadMode) -> ClusterResult<usize> {
        let batch = load_transactions(path, mode)?;
        Ok(self.set_batch(batch))
    }

    /// Replace the dataset. Derived state from a previous run is dropped.
    pub fn set_batch(&mut self, batch: LoadedBatch) -> usize {
        self.transactions = batch.records;
        self.skipped = batch.skipped;
        self.features.clear();
        self.centroids.clear();
        self.summary = None;
        self.transactions.len()
    }

    pub fn set_transactions(&mut self, transactions: Vec<TransactionRecord>) -> usize {
        self.set_batch(LoadedBatch { records: transactions, skipped: 0 })
    }

    pub fn extract_features(&mut self) -> usize {
        self.extract_features_with(&ValueTimeExtractor)
    }

    pub fn extract_features_with<E: FeatureExtractor + ?Sized>(&mut self, extractor: &E) -> usize {
        self.features = extract_all(extractor, &self.transactions);
        self.features.len()
    }

    pub fn initialize_centroids<S: SampleSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> ClusterResult<()> {
        self.centroids = initialize_centroids(&self.features, self.clusters, source)?;
        self.summary = None;
        Ok(())
    }

    /// Run the configured number of iterations
    pub fn cluster(&mut self) -> &ClusteringSummary {
        self.cluster_for(self.iterations)
    }

    pub fn cluster_for(&mut self, iterations: usize) -> &ClusteringSummary {
        self.summary
            .insert(run_iterations(&self.features, &mut self.centroids, iterations))
    }

    pub fn report(&self) -> ClusterReport {
        build_report(
            &self.transactions,
            &self.centroids,
            self.summary.as_ref(),
            self.skipped,
        )
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn transactions(&self) -> &[TransactionRecord] {
        &self.transactions
    }

    pub fn features(&self) -> &[FeatureVector] {
        &self.features
    }

    pub fn centroids(&self) -> &[Centroid] {
        &self.centroids
    }

    pub fn summary(&self) -> Option<&ClusteringSummary> {
        self.summary.as_ref()
    }

    /// Entries dropped by a lenient load
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn contract_calls(&self) -> usize {
        self.transactions
            .iter()
            .filter(|tx| tx.tx_type == TransactionType::ContractCall)
            .count()
    }
}

/// Full run from configuration
pub fn run_pipeline(config: &ClusterConfig) -> ClusterResult<ClusterReport> {
    config.validate()?;

    tracing::info!(
        "Initializing transaction clusterer (k={}, iterations={})",
        config.clusters,
        config.iterations
    );
    let mut clusterer = TransactionClusterer::from_config(config)?;

    let mode = if config.lenient { LoadMode::Lenient } else { LoadMode::Strict };
    let count = clusterer.load_transactions(&config.input, mode)?;
    tracing::info!(
        "Transactions loaded: {} ({} contract calls, {} skipped) from {}",
        count,
        clusterer.contract_calls(),
        clusterer.skipped(),
        config.input.display()
    );

    let extracted = clusterer.extract_features();
    tracing::info!("Features extracted: {}", extracted);

    let mut rng = seeded_rng(config.seed);
    clusterer.initialize_centroids(&mut rng)?;
    match config.seed {
        Some(seed) => tracing::info!("Centroids initialized (seed {})", seed),
        None => tracing::info!("Centroids initialized"),
    }
    for (i, c) in clusterer.centroids().iter().enumerate() {
        tracing::debug!("Initial centroid {}: {}", i, c.position.to_log_entry());
    }

    let summary = clusterer.cluster();
    match summary.stable_since {
        Some(iteration) => tracing::info!(
            "Clustering complete: {} iterations, assignments stable since iteration {}",
            summary.iterations,
            iteration
        ),
        None => tracing::info!(
            "Clustering complete: {} iterations, assignments still changing",
            summary.iterations
        ),
    }

    let report = clusterer.report();
    tracing::info!("Done (run {})", report.run_id);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::transaction::Address;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::fs;

    fn tx(value: f64, timestamp: u64) -> TransactionRecord {
        TransactionRecord {
            from: Address("0xsender".to_string()),
            to: Address("0xrecipient".to_string()),
            value,
            timestamp,
            tx_type: TransactionType::Transfer,
        }
    }

    fn two_value_groups() -> Vec<TransactionRecord> {
        [0.0, 0.0, 0.0, 100.0, 100.0, 100.0]
            .iter()
            .map(|&v| tx(v, 1_700_000_000))
            .collect()
    }

    #[test]
    fn test_rejects_zero_parameters() {
        assert!(TransactionClusterer::new(0, 15).is_err());
        assert!(TransactionClusterer::new(2, 0).is_err());
    }

    #[test]
    fn test_value_groups_separate_for_any_seed() {
        let high = 101f64.ln();

        for seed in 0..64 {
            let mut clusterer = TransactionClusterer::new(2, 15).unwrap();
            clusterer.set_transactions(two_value_groups());
            clusterer.extract_features();
            clusterer.initialize_centroids(&mut StdRng::seed_from_u64(seed)).unwrap();
            clusterer.cluster();

            let mut firsts: Vec<f64> = clusterer
                .centroids()
                .iter()
                .map(|c| c.position.values[0])
                .collect();
            firsts.sort_by(|a, b| a.total_cmp(b));

            assert!(firsts[0].abs() < 1e-9, "seed {}: low centroid at {}", seed, firsts[0]);
            assert!((firsts[1] - high).abs() < 1e-9, "seed {}: high centroid at {}", seed, firsts[1]);

            // Each centroid holds exactly one value group
            let assignments = &clusterer.summary().unwrap().assignments;
            assert_eq!(assignments[0], assignments[1]);
            assert_eq!(assignments[1], assignments[2]);
            assert_eq!(assignments[3], assignments[4]);
            assert_eq!(assignments[4], assignments[5]);
            assert_ne!(assignments[0], assignments[3]);
        }
    }

    #[test]
    fn test_initialize_before_extract_is_insufficient() {
        let mut clusterer = TransactionClusterer::new(2, 15).unwrap();
        clusterer.set_transactions(two_value_groups());

        let err = clusterer
            .initialize_centroids(&mut StdRng::seed_from_u64(0))
            .unwrap_err();
        assert_eq!(err.kind(), "insufficient_data");
    }

    #[test]
    fn test_transactions_unchanged_by_clustering() {
        let records = two_value_groups();
        let mut clusterer = TransactionClusterer::new(2, 15).unwrap();
        clusterer.set_transactions(records.clone());
        clusterer.extract_features();
        let features = clusterer.features().to_vec();

        clusterer.initialize_centroids(&mut StdRng::seed_from_u64(3)).unwrap();
        clusterer.cluster();

        assert_eq!(clusterer.transactions(), records.as_slice());
        assert_eq!(clusterer.features(), features.as_slice());
    }

    #[test]
    fn test_run_pipeline_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eth_tx_data.json");
        fs::write(
            &path,
            r#"[
                {"from": "0x1", "to": "0x2", "value": "0", "timestamp": "1700000000"},
                {"from": "0x1", "to": "0x2", "value": "0", "timestamp": "1700000000", "input": "0x"},
                {"from": "0x3", "to": "0x4", "value": "100", "timestamp": "1700000000", "input": "0xa9059cbb"},
                {"from": "0x3", "to": "0x4", "value": "100", "timestamp": "1700000000"}
            ]"#,
        )
        .unwrap();

        let config = ClusterConfig {
            input: path,
            clusters: 2,
            iterations: 15,
            seed: Some(11),
            ..Default::default()
        };

        let report = run_pipeline(&config).unwrap();
        assert_eq!(report.transactions, 4);
        assert_eq!(report.centroids.len(), 2);
        assert_eq!(report.centroids.iter().map(|c| c.members).sum::<usize>(), 4);
        assert_eq!(
            report.centroids.iter().map(|c| c.breakdown.contract_call).sum::<usize>(),
            1
        );
        assert!(report.stable_since.is_some());
    }

    #[test]
    fn test_load_stage_replaces_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.json");
        fs::write(
            &path,
            r#"[
                {"from": "0x1", "to": "0x2", "value": "1", "timestamp": "10", "input": "0xabcdef"},
                {"from": "0x1", "to": "0x2", "value": "nope", "timestamp": "10"},
                {"from": "0x3", "to": "0x4", "value": "2", "timestamp": "20"}
            ]"#,
        )
        .unwrap();

        let mut clusterer = TransactionClusterer::new(1, 5).unwrap();
        clusterer.set_transactions(two_value_groups());
        clusterer.extract_features();

        let loaded = clusterer.load_transactions(&path, LoadMode::Lenient).unwrap();
        assert_eq!(loaded, 2);
        assert_eq!(clusterer.skipped(), 1);
        assert_eq!(clusterer.contract_calls(), 1);
        assert!(clusterer.features().is_empty());

        assert_eq!(
            clusterer.load_transactions(&path, LoadMode::Strict).unwrap_err().kind(),
            "parse"
        );
    }

    #[test]
    fn test_run_pipeline_k_above_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.json");
        fs::write(&path, r#"[{"from": "0x1", "to": "0x2", "value": "5", "timestamp": "9"}]"#)
            .unwrap();

        let config = ClusterConfig {
            input: path,
            clusters: 2,
            ..Default::default()
        };

        assert!(matches!(
            run_pipeline(&config),
            Err(ClusterError::InsufficientData { requested: 2, available: 1 })
        ));
    }

    #[test]
    fn test_run_pipeline_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClusterConfig {
            input: dir.path().join("absent.json"),
            ..Default::default()
        };

        assert_eq!(run_pipeline(&config).unwrap_err().kind(), "load");
    }
}
