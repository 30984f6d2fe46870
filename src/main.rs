//! Chain Cluster CLI
//!
//! Clusters a JSON batch of transactions and prints the final centroids.
//!
//! Exit codes: 0 success, 1 load/parse/data error, 2 invalid configuration.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use chain_cluster::config::ConfigOverrides;
use chain_cluster::{run_pipeline, ClusterConfig, ClusterError, OutputFormat};

/// Chain Cluster - k-means clustering of blockchain transactions
#[derive(Parser)]
#[command(name = "chain-cluster")]
#[command(version)]
#[command(about = "Group blockchain transactions by behavioral similarity (k-means)")]
struct Cli {
    /// Transaction batch file (JSON array) [env: CHAIN_CLUSTER_INPUT]
    input: Option<PathBuf>,

    /// Number of clusters [env: CHAIN_CLUSTER_K, default: 7]
    #[arg(short = 'k', long = "clusters")]
    clusters: Option<usize>,

    /// Refinement iterations [env: CHAIN_CLUSTER_ITERATIONS, default: 15]
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Fixed seed for centroid sampling [env: CHAIN_CLUSTER_SEED]
    #[arg(long)]
    seed: Option<u64>,

    /// Skip malformed entries instead of failing the batch
    #[arg(long)]
    lenient: bool,

    /// Output format: text | json [env: CHAIN_CLUSTER_FORMAT]
    #[arg(long, value_parser = parse_format)]
    format: Option<OutputFormat>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_format(value: &str) -> Result<OutputFormat, String> {
    OutputFormat::parse(value).ok_or_else(|| format!("unknown format {:?} (text | json)", value))
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input: self.input.clone(),
            clusters: self.clusters,
            iterations: self.iterations,
            seed: self.seed,
            lenient: self.lenient,
            format: self.format,
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("chain_cluster=info")),
        1 => EnvFilter::new("chain_cluster=debug"),
        _ => EnvFilter::new("chain_cluster=trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(config: &ClusterConfig) -> anyhow::Result<()> {
    let report = run_pipeline(config)?;

    let rendered = match config.format {
        OutputFormat::Text => report.render_text(),
        OutputFormat::Json => {
            let mut json = report.to_json_pretty().context("failed to serialize report")?;
            json.push('\n');
            json
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(rendered.as_bytes())
        .and_then(|_| out.flush())
        .context("failed to write report")?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    init_logging(cli.verbose);

    // Environment first, flags on top
    let config = ClusterConfig::from_env().with_overrides(cli.overrides());

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<ClusterError>() {
                Some(err) => {
                    eprintln!("{}", err.diagnostic());
                    ExitCode::from(err.exit_code())
                }
                None => {
                    eprintln!("[!] Error: {:#}", e);
                    ExitCode::from(1)
                }
            }
        }
    }
}
