//! Feature Layout - Centralized Feature Definition
//!
//! ## Rules:
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Change a transform constant → increment FEATURE_VERSION
//!
//! Reports carry version + hash so runs over different layouts are never compared.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT
// ============================================================================

/// Feature names in the exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    "log_value",   // 0: ln(value + 1)
    "time_bucket", // 1: timestamp mod TIME_BUCKET_MODULUS
];

/// Must match FEATURE_LAYOUT.len()
pub const FEATURE_COUNT: usize = 2;

/// Timestamps fold into [0, TIME_BUCKET_MODULUS)
pub const TIME_BUCKET_MODULUS: u64 = 100_000;

pub const LOG_VALUE_INDEX: usize = 0;
pub const TIME_BUCKET_INDEX: usize = 1;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over version, modulus and ordered feature names
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);
    hasher.update(&TIME_BUCKET_MODULUS.to_le_bytes());

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}
