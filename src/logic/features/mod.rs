//! Features Module - Feature Extraction Engine
//!
//! Turns parsed transactions into fixed-dimension vectors for clustering.
//! Layout (names, order, constants) lives in `layout.rs` only.

pub mod layout;
pub mod vector;
pub mod extractor;


pub use layout::{LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT};
pub use vector::FeatureVector;
pub use extractor::{extract_all, FeatureExtractor, ValueTimeExtractor};
