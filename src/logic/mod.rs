//! Logic Module - Clustering pipeline
//!
//! - `transaction/` - Batch loading, parsing, classification
//! - `features/` - Feature layout and extraction
//! - `clustering/` - Centroids, seeding, k-means loop
//! - `report/` - Final centroid listing
//! - `pipeline` - Orchestrator owning one run's state

pub mod transaction;
pub mod features;
pub mod clustering;
pub mod report;
pub mod pipeline;
