//! Data models for mailforge.
//!
//! Two families live here: the in-memory [`RawRecord`] produced by the
//! parser, and the wire-shaped output types serialized into the fixture
//! artifacts. Wire types rename to `camelCase` and mirror the message-API
//! schema the serving layer expects; they are explicit typed records rather
//! than ad hoc JSON maps so the output schema stays testable.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// RawRecord
// =============================================================================

/// One email record as loaded from the source archive.
///
/// # Constraints
/// - `message_id`: MUST be unique within a run; the loader deduplicates on it.
/// - `date`: parsed from the `Date` header; when no format matched,
///   `date_is_fallback` is set and `date` holds the run's recorded fallback
///   instant.
///
/// Immutable after parsing; held in memory for the run only.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    pub message_id: String,
    pub date: DateTime<Utc>,
    pub date_is_fallback: bool,
    pub from: String,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub subject: String,
    pub body: String,

    // Source-internal metadata, used only for label inference.
    pub x_from: String,
    pub x_to: String,
    pub x_cc: String,
    pub x_bcc: String,
    pub x_folder: String,
    pub x_origin: String,
    pub x_filename: String,

    /// Name of the scan folder the record was loaded from (e.g. "inbox").
    pub folder: String,
    /// Path of the source file.
    pub path: PathBuf,
}

// =============================================================================
// Persona
// =============================================================================

/// A fictitious identity substituted for a real correspondent.
///
/// Keyed by the original lowercase address in the persona map; read-only
/// once assigned. The mapping is a pure function of the input set and the
/// roster, so identical inputs yield identical mappings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl Persona {
    /// Roster entry constructor.
    #[must_use]
    pub fn new(name: &str, email: &str, role: &str, company: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            company: company.map(str::to_string),
        }
    }
}

// =============================================================================
// Output message (wire shape)
// =============================================================================

/// A single transformed message in the output corpus.
///
/// # Invariants
/// - `id` is a pure function of the source identifier alone.
/// - `thread_id` is a pure function of normalized subject + participant set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputMessage {
    pub id: String,
    pub thread_id: String,
    pub label_ids: Vec<String>,
    pub snippet: String,
    /// Shifted timestamp as epoch seconds, stringified.
    pub history_id: String,
    /// Shifted timestamp as epoch milliseconds, stringified.
    pub internal_date: String,
    pub size_estimate: usize,
    pub payload: MessagePart,
}

impl OutputMessage {
    /// Typed lookup of a payload header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.payload
            .headers
            .iter()
            .find(|h| h.name == name)
            .map(|h| h.value.as_str())
    }
}

/// MIME part carrying the transformed headers and body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePart {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub part_id: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub filename: String,
    pub headers: Vec<MessageHeader>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<MessageBody>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<MessagePart>,
}

/// Base64-encoded body payload with its decoded size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    pub size: usize,
    pub data: String,
}

/// One transformed header name/value pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageHeader {
    pub name: String,
    pub value: String,
}

// =============================================================================
// List view
// =============================================================================

/// Reduced id/thread-id reference, mirroring the list-response shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRef {
    pub id: String,
    pub thread_id: String,
}

/// The "list" response artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMessagesResponse {
    pub messages: Vec<MessageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    pub result_size_estimate: usize,
}

// =============================================================================
// Metadata
// =============================================================================

/// First/last transformed dates by processing order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Aggregate corpus metadata artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusMetadata {
    pub total_messages: usize,
    pub date_range: DateRange,
    /// Label id -> message count. `BTreeMap` keeps serialized key order stable.
    pub label_distribution: BTreeMap<String, usize>,
    pub thread_count: usize,
}

// =============================================================================
// Run statistics
// =============================================================================

/// Transformation statistics, finalized after the transform stage and
/// written read-only to the stats artifact.
///
/// `errors` always carries the complete list; any first-N cap is
/// presentation-only in the CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStatistics {
    pub total_processed: usize,
    pub total_transformed: usize,
    /// Files skipped by the loader because they failed to parse.
    pub parse_skipped: usize,
    /// Records whose date required the recorded fallback instant.
    pub date_fallbacks: usize,
    pub errors: Vec<String>,
    /// Original lowercase address -> assigned persona.
    pub persona_map: BTreeMap<String, Persona>,
    pub thread_count: usize,
}
