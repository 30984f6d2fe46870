//! Clustering Module - k-means over feature vectors
//!
//! # Architecture
//! - `centroid.rs`: `Centroid` (position + member indices)
//! - `sampling.rs`: injectable `SampleSource`, seeded `StdRng`
//! - `init.rs`: random seeding of `k` centroids
//! - `engine.rs`: assignment / update phases and the fixed-count loop
//!
//! Euclidean distance only. Single-threaded.

pub mod centroid;
pub mod sampling;
pub mod init;
pub mod engine;


pub use centroid::Centroid;
pub use sampling::{seeded_rng, SampleSource};
pub use init::initialize_centroids;
pub use engine::{
    assign_points, nearest_centroid, run_iterations, update_centroids, ClusteringSummary,
    IterationStats,
};
