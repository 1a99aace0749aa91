#![forbid(unsafe_code)]
//! Corpus transformation pipeline for mailforge.
//!
//! Stages, each depending only on the previous stage's output:
//! - [`loader`]: priority-folder scan, dedup, record limit
//! - [`parser`]: header folding + typed fields + date fallback
//! - [`personas`]: frequency-ranked identity re-mapping
//! - [`transform`]: per-record rewriting, date shift, IDs
//! - [`threads`]: normalized-key thread reconstruction
//! - [`labels`]: heuristic label inference
//! - [`snippet`]: preview snippet generation
//! - [`artifacts`]: output artifact serialization
//!
//! The pipeline is a single-threaded batch job: one pass, no shared
//! mutable state, each stage's output handed to the next by ownership
//! transfer. [`run`] wires the stages together for the CLI and tests.

use std::path::PathBuf;

use tracing::info;

use mailforge_core::{Config, Result, RunStatistics};

pub mod artifacts;
pub mod labels;
pub mod loader;
pub mod parser;
pub mod personas;
pub mod snippet;
pub mod threads;
pub mod transform;

pub use loader::LoadOutcome;
pub use parser::ParseError;
pub use transform::{TransformError, Transformer};

/// Parameters for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunParams {
    /// Root directory of the source archive.
    pub source_root: PathBuf,
    /// Owner sub-directory under the root.
    pub owner: String,
    /// Identity fragment matching the owner's own addresses. Defaults to
    /// the owner id up to the first `-`.
    pub owner_fragment: Option<String>,
    /// Maximum number of records to load.
    pub limit: usize,
    /// Directory receiving the artifact set.
    pub output_dir: PathBuf,
    /// Primary output identity for the owner's addresses.
    pub primary_address: String,
}

/// Runs the full pipeline: load, transform, serialize.
///
/// Per-record failures are reported in the returned statistics; only
/// load/write failures are fatal.
pub fn run(cfg: &Config, params: &RunParams) -> Result<RunStatistics> {
    let fragment = params
        .owner_fragment
        .clone()
        .unwrap_or_else(|| default_owner_fragment(&params.owner));

    let LoadOutcome {
        records,
        parse_errors,
    } = loader::load_records(cfg, &params.source_root, &params.owner, params.limit)?;
    info!(
        owner = %params.owner,
        loaded = records.len(),
        parse_skipped = parse_errors.len(),
        "records loaded"
    );

    let mut transformer = Transformer::new(cfg, &fragment, &params.primary_address);
    let messages = transformer.transform_corpus(records);
    let mut stats = transformer.into_stats();
    stats.parse_skipped = parse_errors.len();
    // Loader failures precede transform failures in the reported list.
    let transform_errors = std::mem::replace(&mut stats.errors, parse_errors);
    stats.errors.extend(transform_errors);
    info!(
        transformed = stats.total_transformed,
        threads = stats.thread_count,
        personas = stats.persona_map.len(),
        errors = stats.errors.len(),
        "corpus transformed"
    );

    artifacts::write_artifacts(&params.output_dir, &messages, &stats)?;
    Ok(stats)
}

/// Owner id up to the first `-`, lowercased: `kaminski-v` -> `kaminski`.
#[must_use]
pub fn default_owner_fragment(owner: &str) -> String {
    owner.split('-').next().unwrap_or(owner).to_lowercase()
}
