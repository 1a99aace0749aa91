//! Thread reconstruction via normalized-key grouping.
//!
//! The source has no thread identifiers, so records are grouped by a key
//! built from the normalized subject and a capped, sorted participant set.
//! The key maps to a hash-derived thread ID, memoized for the run: repeated
//! keys always resolve to the same ID, and the ID is a pure function of the
//! key alone.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use mailforge_core::{RawRecord, addr, ident};

/// Participant cap after sorting, bounding key size regardless of
/// recipient-list length.
const PARTICIPANT_CAP: usize = 3;

static REPLY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)(re|fwd|fw):\s*").unwrap());

/// Per-run thread key -> thread ID cache.
#[derive(Debug, Default)]
pub struct ThreadResolver {
    cache: HashMap<String, String>,
}

impl ThreadResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves (or creates) the thread ID for a record.
    pub fn resolve(&mut self, record: &RawRecord) -> String {
        let key = thread_key(record);
        self.cache
            .entry(key)
            .or_insert_with_key(|key| ident::thread_id(key))
            .clone()
    }

    /// Number of distinct threads seen so far.
    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.cache.len()
    }
}

/// Grouping key: `normalized-subject|first-3-sorted-participants`.
#[must_use]
pub fn thread_key(record: &RawRecord) -> String {
    let subject = normalize_subject(&record.subject);

    let mut participants: Vec<String> = std::iter::once(&record.from)
        .chain(&record.to)
        .chain(&record.cc)
        .chain(&record.bcc)
        .filter_map(|raw| addr::extract_address(raw))
        .collect();
    participants.sort();
    participants.dedup();
    participants.truncate(PARTICIPANT_CAP);

    format!("{subject}|{}", participants.join(","))
}

/// Strips one leading reply/forward prefix (case-insensitive), trims, and
/// lowercases.
#[must_use]
pub fn normalize_subject(subject: &str) -> String {
    REPLY_PREFIX.replace(subject, "").trim().to_lowercase()
}
