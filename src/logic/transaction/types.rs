//! Transaction Types
//!
//! Parsed transaction records and the raw entry shape they come from.
//! No I/O here - see `loader.rs`.

use serde::{Deserialize, Serialize};

/// Marker the chain uses for a call with no payload
pub const EMPTY_INPUT_MARKER: &str = "0x";

// ============================================================================
// TRANSACTION TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Plain value transfer (no payload)
    Transfer,
    /// Carries call data
    ContractCall,
    #[default]
    Unknown,
}

impl TransactionType {
    /// Classify from the optional "input" payload
    pub fn classify(input: Option<&str>) -> Self {
        match input {
            Some(payload) if !payload.is_empty() && payload != EMPTY_INPUT_MARKER => {
                TransactionType::ContractCall
            }
            _ => TransactionType::Transfer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Transfer => "transfer",
            TransactionType::ContractCall => "contract_call",
            TransactionType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// TRANSACTION RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(pub String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One parsed transaction. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub from: Address,
    pub to: Address,
    /// Finite, >= 0
    pub value: f64,
    pub timestamp: u64,
    pub tx_type: TransactionType,
}

// ============================================================================
// RAW ENTRY (wire shape)
// ============================================================================

/// Numeric field as it appears in the batch: quoted or bare
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Text(String),
    Number(serde_json::Number),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEntry {
    pub from: String,
    pub to: String,
    pub value: RawNumber,
    pub timestamp: RawNumber,
    #[serde(default)]
    pub input: Option<String>,
}
