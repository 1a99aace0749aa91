#![forbid(unsafe_code)]
//! CLI surface for mailforge.
//!
//! Argument parsing and exit-code mapping only; all pipeline behavior
//! lives in `mailforge-pipeline`. Exit is zero even when individual
//! records failed to transform (those are reported, not fatal); non-zero
//! only on load or write failures.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mailforge_core::Config;
use mailforge_core::config::{
    DEFAULT_LIMIT, DEFAULT_OUTPUT_DIR, DEFAULT_OWNER, DEFAULT_PRIMARY_ADDRESS,
};
use mailforge_pipeline::RunParams;

/// Number of per-record errors echoed to the log; the stats artifact
/// always carries the complete list.
const LOGGED_ERROR_CAP: usize = 5;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Pipeline(#[from] mailforge_core::Error),
}

pub type CliResult<T> = Result<T, CliError>;

#[derive(Parser, Debug)]
#[command(
    name = "mailforge",
    version,
    about = "Transform a raw mail archive into a synthetic message-API fixture corpus"
)]
pub struct Cli {
    /// Root directory of the source mail archive.
    #[arg(long = "source-root")]
    pub source_root: PathBuf,

    /// Owner sub-directory to process.
    #[arg(long, default_value = DEFAULT_OWNER)]
    pub owner: String,

    /// Identity fragment matching the owner's own addresses.
    /// Defaults to the owner id up to the first '-'.
    #[arg(long = "owner-fragment")]
    pub owner_fragment: Option<String>,

    /// Maximum number of records to process.
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Output directory for the artifact set.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Primary output identity address for the owner.
    #[arg(long = "primary-address", default_value = DEFAULT_PRIMARY_ADDRESS)]
    pub primary_address: String,
}

/// Entry point for the binary; returns the process exit code.
pub fn run() -> i32 {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match execute(&cli) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}

fn execute(cli: &Cli) -> CliResult<()> {
    let cfg = Config::default();
    let params = RunParams {
        source_root: cli.source_root.clone(),
        owner: cli.owner.clone(),
        owner_fragment: cli.owner_fragment.clone(),
        limit: cli.limit,
        output_dir: cli.output.clone(),
        primary_address: cli.primary_address.clone(),
    };

    let stats = mailforge_pipeline::run(&cfg, &params)?;

    info!(
        processed = stats.total_processed,
        transformed = stats.total_transformed,
        threads = stats.thread_count,
        personas = stats.persona_map.len(),
        output = %cli.output.display(),
        "run complete"
    );

    if !stats.errors.is_empty() {
        warn!(total = stats.errors.len(), "records failed to transform");
        for err in stats.errors.iter().take(LOGGED_ERROR_CAP) {
            warn!("  {err}");
        }
        if stats.errors.len() > LOGGED_ERROR_CAP {
            warn!(
                "  ... {} more (full list in {})",
                stats.errors.len() - LOGGED_ERROR_CAP,
                mailforge_pipeline::artifacts::STATS_FILE
            );
        }
    }

    Ok(())
}
