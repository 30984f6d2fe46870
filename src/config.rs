//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::error::{ClusterError, ClusterResult};

pub const DEFAULT_INPUT: &str = "eth_tx_data.json";
pub const DEFAULT_CLUSTERS: usize = 7;
pub const DEFAULT_ITERATIONS: usize = 15;

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Transaction batch (JSON array)
    pub input: PathBuf,

    /// Number of clusters (k)
    pub clusters: usize,

    /// Refinement iterations, always run in full
    pub iterations: usize,

    /// Fixed seed for centroid sampling; entropy-seeded when absent
    pub seed: Option<u64>,

    /// Skip malformed entries instead of failing the batch
    pub lenient: bool,

    pub format: OutputFormat,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            clusters: DEFAULT_CLUSTERS,
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            lenient: false,
            format: OutputFormat::Text,
        }
    }
}

/// Command-line values layered over the environment. `None` / `false` keeps the lower layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input: Option<PathBuf>,
    pub clusters: Option<usize>,
    pub iterations: Option<usize>,
    pub seed: Option<u64>,
    pub lenient: bool,
    pub format: Option<OutputFormat>,
}

/// Parse a present variable, warning and falling back when it doesn't parse
fn parse_or_warn<T: std::str::FromStr>(name: &str, value: Option<String>) -> Option<T> {
    let raw = value?;
    match raw.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!("Ignoring {}={:?}: not a valid number", name, raw);
            None
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

impl ClusterConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let format = match lookup("CHAIN_CLUSTER_FORMAT") {
            Some(raw) => OutputFormat::parse(&raw).unwrap_or_else(|| {
                tracing::warn!("Ignoring CHAIN_CLUSTER_FORMAT={:?}: expected text or json", raw);
                defaults.format
            }),
            None => defaults.format,
        };

        Self {
            input: lookup("CHAIN_CLUSTER_INPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.input),

            clusters: parse_or_warn("CHAIN_CLUSTER_K", lookup("CHAIN_CLUSTER_K"))
                .unwrap_or(defaults.clusters),

            iterations: parse_or_warn("CHAIN_CLUSTER_ITERATIONS", lookup("CHAIN_CLUSTER_ITERATIONS"))
                .unwrap_or(defaults.iterations),

            seed: parse_or_warn("CHAIN_CLUSTER_SEED", lookup("CHAIN_CLUSTER_SEED")),

            lenient: lookup("CHAIN_CLUSTER_LENIENT")
                .map(|v| is_truthy(&v))
                .unwrap_or(defaults.lenient),

            format,
        }
    }

    /// Apply command-line values on top of this configuration
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(input) = overrides.input {
            self.input = input;
        }
        if let Some(k) = overrides.clusters {
            self.clusters = k;
        }
        if let Some(n) = overrides.iterations {
            self.iterations = n;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if overrides.lenient {
            self.lenient = true;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        self
    }

    /// Reject parameters the pipeline cannot run with
    pub fn validate(&self) -> ClusterResult<()> {
        if self.clusters == 0 {
            return Err(ClusterError::InvalidConfig(
                "cluster count must be a positive integer".to_string(),
            ));
        }
        if self.iterations == 0 {
            return Err(ClusterError::InvalidConfig(
                "iteration count must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}
