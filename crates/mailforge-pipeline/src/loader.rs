//! Record loader: walks the owner's folder hierarchy and produces the
//! in-memory record set.
//!
//! Folders are scanned in a fixed priority order so the corpus is biased
//! toward interesting mail first; the catch-all archive folder is only
//! consulted when the priority folders did not fill the limit. Records are
//! deduplicated by source identifier across folders. Missing folders are
//! skipped silently; files that fail to parse are skipped and counted,
//! never counted toward the limit.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use mailforge_core::{Config, Error, RawRecord, Result};

use crate::parser;

/// Loader output: the record set plus a note per skipped file for the
/// run's error list.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub records: Vec<RawRecord>,
    pub parse_errors: Vec<String>,
}

/// Loads at most `limit` records for `owner` under `source_root`.
///
/// # Errors
///
/// [`Error::SourceNotFound`] when the owner directory does not exist; any
/// other I/O failure while reading an existing folder is fatal.
pub fn load_records(
    cfg: &Config,
    source_root: &Path,
    owner: &str,
    limit: usize,
) -> Result<LoadOutcome> {
    let owner_path = source_root.join(owner);
    if !owner_path.is_dir() {
        return Err(Error::SourceNotFound(owner_path));
    }

    let mut outcome = LoadOutcome::default();
    let mut seen: HashSet<String> = HashSet::new();

    for folder in &cfg.priority_folders {
        if outcome.records.len() >= limit {
            return Ok(outcome);
        }
        scan_folder(cfg, &owner_path, folder, limit, false, &mut seen, &mut outcome);
    }

    if outcome.records.len() < limit {
        scan_folder(
            cfg,
            &owner_path,
            &cfg.catchall_folder,
            limit,
            true,
            &mut seen,
            &mut outcome,
        );
    }

    Ok(outcome)
}

fn scan_folder(
    cfg: &Config,
    owner_path: &Path,
    folder: &str,
    limit: usize,
    numeric_names_only: bool,
    seen: &mut HashSet<String>,
    outcome: &mut LoadOutcome,
) {
    let folder_path = owner_path.join(folder);
    if !folder_path.is_dir() {
        debug!(folder, "source folder missing, skipping");
        return;
    }

    // Sorted, depth-1 walk: the limit cutoff depends on scan order, so the
    // order must not vary with the filesystem's directory layout.
    let walker = WalkDir::new(&folder_path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        if outcome.records.len() >= limit {
            return;
        }
        let Ok(entry) = entry else {
            debug!(folder, "unreadable directory entry, skipping");
            continue;
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if numeric_names_only && !has_numeric_name(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let Ok(bytes) = fs::read(entry.path()) else {
            debug!(path = %entry.path().display(), "unreadable file, skipping");
            outcome
                .parse_errors
                .push(format!("error reading {}", entry.path().display()));
            continue;
        };
        let text = String::from_utf8_lossy(&bytes);

        match parser::parse_record(cfg, entry.path(), &text) {
            Ok(mut record) => {
                if seen.insert(record.message_id.clone()) {
                    record.folder = folder.to_string();
                    outcome.records.push(record);
                }
            }
            Err(err) => {
                debug!(path = %entry.path().display(), %err, "parse failed, skipping");
                outcome.parse_errors.push(format!("error parsing: {err}"));
            }
        }
    }
}

/// Archive files are named `1.`, `2.`, ...; anything else in the
/// catch-all folder is not a record.
fn has_numeric_name(name: &str) -> bool {
    let trimmed = name.trim_end_matches('.');
    !trimmed.is_empty() && trimmed.parse::<u64>().is_ok()
}
