//! Rule-based label inference.
//!
//! Ordered, non-exclusive rules: a message can carry several labels. Only
//! the folder heuristic is first-match-wins internally; the importance and
//! promotional/automated rules are evaluated independently.

use mailforge_core::{LabelRules, RawRecord};

pub const LABEL_UNREAD: &str = "UNREAD";
pub const LABEL_SENT: &str = "SENT";
pub const LABEL_INBOX: &str = "INBOX";
pub const LABEL_TRASH: &str = "TRASH";
pub const LABEL_PERSONAL: &str = "CATEGORY_PERSONAL";
pub const LABEL_TRAVEL: &str = "Label_Travel";
pub const LABEL_MEETINGS: &str = "Label_Meetings";
pub const LABEL_IMPORTANT: &str = "IMPORTANT";
pub const LABEL_PROMOTIONS: &str = "CATEGORY_PROMOTIONS";
pub const LABEL_UPDATES: &str = "CATEGORY_UPDATES";

/// Length of the body prefix scanned by the importance rule.
const IMPORTANT_BODY_PREFIX: usize = 200;

/// Infers the ordered label set for a record.
#[must_use]
pub fn infer_labels(rules: &LabelRules, record: &RawRecord, owner_fragment: &str) -> Vec<String> {
    let mut labels = vec![LABEL_UNREAD.to_string()];

    let from = record.from.to_lowercase();
    if from.contains(owner_fragment) {
        labels.push(LABEL_SENT.to_string());
    } else {
        labels.push(LABEL_INBOX.to_string());
    }

    if let Some(folder_label) = folder_label(record) {
        labels.push(folder_label.to_string());
    }

    let subject = record.subject.to_lowercase();
    let body = record.body.to_lowercase();
    if is_important(rules, &subject, &body, &from) {
        labels.push(LABEL_IMPORTANT.to_string());
    }

    if is_promotional(rules, &subject, &body) {
        labels.push(LABEL_PROMOTIONS.to_string());
    } else if is_automated(rules, &from) {
        labels.push(LABEL_UPDATES.to_string());
    }

    labels
}

/// Folder-name heuristic, first match wins. The source's own folder
/// metadata is preferred over the scan folder, which is drawn from a fixed
/// set that never contains these names.
fn folder_label(record: &RawRecord) -> Option<&'static str> {
    let folder = if record.x_folder.is_empty() {
        record.folder.to_lowercase()
    } else {
        record.x_folder.to_lowercase()
    };

    if folder.contains("trash") || folder.contains("deleted") {
        Some(LABEL_TRASH)
    } else if folder.contains("personal") {
        Some(LABEL_PERSONAL)
    } else if folder.contains("travel") {
        Some(LABEL_TRAVEL)
    } else if folder.contains("conferences") || folder.contains("meetings") {
        Some(LABEL_MEETINGS)
    } else {
        None
    }
}

fn is_important(rules: &LabelRules, subject: &str, body: &str, from: &str) -> bool {
    let body_prefix: String = body.chars().take(IMPORTANT_BODY_PREFIX).collect();
    rules
        .important_keywords
        .iter()
        .any(|kw| subject.contains(kw.as_str()) || body_prefix.contains(kw.as_str()))
        || rules
            .important_sender_fragments
            .iter()
            .any(|fragment| from.contains(fragment.as_str()))
}

fn is_promotional(rules: &LabelRules, subject: &str, body: &str) -> bool {
    rules
        .promotional_keywords
        .iter()
        .any(|kw| subject.contains(kw.as_str()) || body.contains(kw.as_str()))
}

fn is_automated(rules: &LabelRules, from: &str) -> bool {
    rules
        .automated_sender_fragments
        .iter()
        .any(|fragment| from.contains(fragment.as_str()))
}
