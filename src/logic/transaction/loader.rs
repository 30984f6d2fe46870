//! Transaction Loader
//!
//! Reads a JSON array of raw entries and parses each into a `TransactionRecord`.
//! Strict mode fails the whole batch on the first bad entry.
//! Entries are kept as raw text until parsed one by one, so only the array
//! structure itself can fail the batch in lenient mode.

use std::fs;
use std::path::Path;

use serde_json::value::RawValue;

use super::types::{Address, RawEntry, RawNumber, TransactionRecord, TransactionType};
use crate::error::{ClusterError, ClusterResult};

/// How malformed entries are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Any malformed entry aborts the batch
    #[default]
    Strict,
    /// Malformed entries are skipped and counted
    Lenient,
}

/// Result of a batch load, order preserved
#[derive(Debug, Clone, Default)]
pub struct LoadedBatch {
    pub records: Vec<TransactionRecord>,
    pub skipped: usize,
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Load and parse a batch file
pub fn load_transactions(path: &Path, mode: LoadMode) -> ClusterResult<LoadedBatch> {
    let document = fs::read_to_string(path).map_err(|source| ClusterError::Load {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Read {} bytes from {}", document.len(), path.display());
    parse_batch(&document, mode)
}

/// Parse an in-memory batch document
pub fn parse_batch(document: &str, mode: LoadMode) -> ClusterResult<LoadedBatch> {
    let entries: Vec<Box<RawValue>> = serde_json::from_str(document)?;

    let mut batch = LoadedBatch {
        records: Vec::with_capacity(entries.len()),
        skipped: 0,
    };

    for (index, entry) in entries.into_iter().enumerate() {
        match parse_entry(index, entry.get()) {
            Ok(record) => batch.records.push(record),
            Err(e) if mode == LoadMode::Lenient => {
                tracing::warn!("Skipping entry: {}", e);
                batch.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(batch)
}

/// Parse a single entry's JSON text at `index` in the batch
pub fn parse_entry(index: usize, entry: &str) -> ClusterResult<TransactionRecord> {
    let raw: RawEntry = serde_json::from_str(entry).map_err(|e| ClusterError::Parse {
        index,
        field: "entry",
        reason: e.to_string(),
    })?;

    let value = parse_value(&raw.value).map_err(|reason| ClusterError::Parse {
        index,
        field: "value",
        reason,
    })?;

    let timestamp = parse_timestamp(&raw.timestamp).map_err(|reason| ClusterError::Parse {
        index,
        field: "timestamp",
        reason,
    })?;

    Ok(TransactionRecord {
        from: Address(raw.from),
        to: Address(raw.to),
        value,
        timestamp,
        tx_type: TransactionType::classify(raw.input.as_deref()),
    })
}

// ============================================================================
// NUMERIC FIELDS
// ============================================================================

fn hex_digits(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}

/// Decimal / scientific text, `0x` hex quantity, or a JSON number. Must be finite and >= 0.
pub fn parse_value(raw: &RawNumber) -> Result<f64, String> {
    let value = match raw {
        RawNumber::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("{} is not representable as a float", n))?,
        RawNumber::Text(text) => {
            let text = text.trim();
            match hex_digits(text) {
                Some(digits) => u128::from_str_radix(digits, 16)
                    .map(|v| v as f64)
                    .map_err(|e| format!("invalid hex quantity {:?}: {}", text, e))?,
                None => text
                    .parse::<f64>()
                    .map_err(|e| format!("invalid number {:?}: {}", text, e))?,
            }
        }
    };

    if !value.is_finite() {
        return Err(format!("value {} is not finite", value));
    }
    if value < 0.0 {
        return Err(format!("value {} is negative", value));
    }
    // "-0" parses to -0.0
    Ok(value + 0.0)
}

/// Unsigned integer, decimal text or `0x` hex quantity
pub fn parse_timestamp(raw: &RawNumber) -> Result<u64, String> {
    match raw {
        RawNumber::Number(n) => n
            .as_u64()
            .ok_or_else(|| format!("{} is not a non-negative integer", n)),
        RawNumber::Text(text) => {
            let text = text.trim();
            match hex_digits(text) {
                Some(digits) => u64::from_str_radix(digits, 16)
                    .map_err(|e| format!("invalid hex timestamp {:?}: {}", text, e)),
                None => text
                    .parse::<u64>()
                    .map_err(|e| format!("invalid timestamp {:?}: {}", text, e)),
            }
        }
    }
}
