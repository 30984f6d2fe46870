//! Chain Cluster
//!
//! Unsupervised grouping of blockchain transactions by behavior.
//!
//! ```text
//! raw JSON batch ──► TransactionRecord ──► FeatureVector [ln(v+1), t mod 100000]
//!                                              │
//!                          k centroids ◄───────┘ (sampled with replacement)
//!                               │
//!                 assign (nearest, lowest index on ties) ◄─┐
//!                 update (mean; empty keeps position) ─────┘ × iterations
//!                               │
//!                          ClusterReport (text / JSON)
//! ```

pub mod config;
pub mod error;
pub mod logic;

pub use config::{ClusterConfig, OutputFormat};
pub use error::{ClusterError, ClusterResult};
pub use logic::pipeline::{run_pipeline, TransactionClusterer};
pub use logic::report::ClusterReport;
