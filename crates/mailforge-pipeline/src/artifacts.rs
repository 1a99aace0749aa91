//! Artifact serialization: the output files the serving layer consumes.
//!
//! Four artifacts, written in order: the full message corpus, the reduced
//! list view, aggregate metadata, and run statistics. File names are part
//! of the downstream contract. Any create/write failure is fatal.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use mailforge_core::{
    CorpusMetadata, DateRange, ListMessagesResponse, MessageRef, OutputMessage, Result,
    RunStatistics,
};

pub const MESSAGES_FILE: &str = "gmail_messages.json";
pub const LIST_RESPONSE_FILE: &str = "list_messages_response.json";
pub const METADATA_FILE: &str = "test_metadata.json";
pub const STATS_FILE: &str = "transform_stats.json";

/// Writes the full artifact set into `output_dir`, creating it if needed.
pub fn write_artifacts(
    output_dir: &Path,
    messages: &[OutputMessage],
    stats: &RunStatistics,
) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    write_json(&output_dir.join(MESSAGES_FILE), &messages)?;

    let list = ListMessagesResponse {
        messages: messages
            .iter()
            .map(|m| MessageRef {
                id: m.id.clone(),
                thread_id: m.thread_id.clone(),
            })
            .collect(),
        next_page_token: None,
        result_size_estimate: messages.len(),
    };
    write_json(&output_dir.join(LIST_RESPONSE_FILE), &list)?;

    write_json(&output_dir.join(METADATA_FILE), &build_metadata(messages))?;
    write_json(&output_dir.join(STATS_FILE), stats)?;

    info!(dir = %output_dir.display(), "artifact set written");
    Ok(())
}

/// Builds aggregate metadata from the transformed corpus.
///
/// The date range comes from the first and last message in processing
/// order (which is chronological order, records having been sorted before
/// transformation), read via typed header lookup.
#[must_use]
pub fn build_metadata(messages: &[OutputMessage]) -> CorpusMetadata {
    let mut label_distribution: BTreeMap<String, usize> = BTreeMap::new();
    let mut threads: HashSet<&str> = HashSet::new();
    for message in messages {
        for label in &message.label_ids {
            *label_distribution.entry(label.clone()).or_insert(0) += 1;
        }
        threads.insert(message.thread_id.as_str());
    }

    let date_of = |m: &OutputMessage| m.header("Date").unwrap_or_default().to_string();
    let date_range = match (messages.first(), messages.last()) {
        (Some(first), Some(last)) => DateRange {
            start: date_of(first),
            end: date_of(last),
        },
        _ => DateRange::default(),
    };

    CorpusMetadata {
        total_messages: messages.len(),
        date_range,
        label_distribution,
        thread_count: threads.len(),
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailforge_core::{MessageBody, MessageHeader, MessagePart};

    fn message(id: &str, thread_id: &str, labels: &[&str], date: &str) -> OutputMessage {
        OutputMessage {
            id: id.to_string(),
            thread_id: thread_id.to_string(),
            label_ids: labels.iter().map(|s| (*s).to_string()).collect(),
            snippet: String::new(),
            history_id: "0".to_string(),
            internal_date: "0".to_string(),
            size_estimate: 0,
            payload: MessagePart {
                part_id: String::new(),
                mime_type: "text/plain".to_string(),
                filename: String::new(),
                headers: vec![MessageHeader {
                    name: "Date".to_string(),
                    value: date.to_string(),
                }],
                body: Some(MessageBody {
                    size: 0,
                    data: String::new(),
                }),
                parts: Vec::new(),
            },
        }
    }

    #[test]
    fn metadata_aggregates_labels_and_threads() {
        let messages = vec![
            message("a", "t1", &["UNREAD", "INBOX"], "Mon, 1 Jan 2024 00:00:00 +0000"),
            message("b", "t1", &["UNREAD", "SENT"], "Tue, 2 Jan 2024 00:00:00 +0000"),
            message("c", "t2", &["UNREAD"], "Wed, 3 Jan 2024 00:00:00 +0000"),
        ];
        let meta = build_metadata(&messages);
        assert_eq!(meta.total_messages, 3);
        assert_eq!(meta.thread_count, 2);
        assert_eq!(meta.label_distribution["UNREAD"], 3);
        assert_eq!(meta.label_distribution["INBOX"], 1);
        assert_eq!(meta.date_range.start, "Mon, 1 Jan 2024 00:00:00 +0000");
        assert_eq!(meta.date_range.end, "Wed, 3 Jan 2024 00:00:00 +0000");
    }

    #[test]
    fn empty_corpus_metadata_is_well_formed() {
        let meta = build_metadata(&[]);
        assert_eq!(meta.total_messages, 0);
        assert_eq!(meta.thread_count, 0);
        assert!(meta.date_range.start.is_empty());
        assert!(meta.date_range.end.is_empty());
    }

    #[test]
    fn writes_all_four_artifacts() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("corpus");
        let messages =
            vec![message("a", "t1", &["UNREAD"], "Mon, 1 Jan 2024 00:00:00 +0000")];
        let stats = RunStatistics::default();

        write_artifacts(&out, &messages, &stats).unwrap();

        for file in [MESSAGES_FILE, LIST_RESPONSE_FILE, METADATA_FILE, STATS_FILE] {
            assert!(out.join(file).is_file(), "missing artifact {file}");
        }

        let list: ListMessagesResponse = serde_json::from_str(
            &std::fs::read_to_string(out.join(LIST_RESPONSE_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(list.result_size_estimate, 1);
        assert_eq!(list.messages[0].id, "a");
    }
}
