//! Transaction Module - Raw batch ingestion
//!
//! # Architecture
//! - `types.rs`: `TransactionRecord`, `TransactionType`, raw wire shape
//! - `loader.rs`: file/document parsing with strict or lenient entry handling

pub mod types;
pub mod loader;

#[cfg(test)]
mod tests;

pub use types::{Address, TransactionRecord, TransactionType, EMPTY_INPUT_MARKER};
pub use loader::{load_transactions, parse_batch, LoadMode, LoadedBatch};
