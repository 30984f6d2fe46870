//! Error handling

use std::path::PathBuf;
use thiserror::Error;

pub type ClusterResult<T> = Result<T, ClusterError>;

/// Fatal pipeline errors. Every variant stops the run at the stage that raised it.
#[derive(Debug, Error)]
pub enum ClusterError {
    // Source errors
    #[error("failed to read transaction source {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Batch / entry errors
    #[error("malformed transaction batch: {0}")]
    MalformedBatch(String),

    #[error("malformed transaction entry #{index} ({field}): {reason}")]
    Parse {
        index: usize,
        field: &'static str,
        reason: String,
    },

    // Initialization errors
    #[error("insufficient data: requested {requested} centroids from {available} feature vectors")]
    InsufficientData { requested: usize, available: usize },

    // Configuration errors
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClusterError {
    /// Stable short label for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            ClusterError::Load { .. } => "load",
            ClusterError::MalformedBatch(_) | ClusterError::Parse { .. } => "parse",
            ClusterError::InsufficientData { .. } => "insufficient_data",
            ClusterError::InvalidConfig(_) => "config",
        }
    }

    /// One-line stderr message, labelled with the error kind
    pub fn diagnostic(&self) -> String {
        format!("[!] Error ({}): {}", self.kind(), self)
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            ClusterError::InvalidConfig(_) => 2,
            _ => 1,
        }
    }
}

impl From<serde_json::Error> for ClusterError {
    fn from(err: serde_json::Error) -> Self {
        ClusterError::MalformedBatch(err.to_string())
    }
}
