//! Record parser: raw file text -> [`RawRecord`].
//!
//! The source format is `Header-Name: value` lines terminated by a blank
//! line, followed by a free-text body. Continuation lines (leading
//! whitespace) fold into the previous header's value joined by a single
//! space; downstream address and date parsing assumes unfolded values.

use std::path::Path;

use thiserror::Error;

use mailforge_core::{Config, RawRecord, dates};

/// Recoverable per-record parse failure. The loader skips the file and
/// counts it; the run continues.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing Message-ID header in {path}")]
    MissingMessageId { path: String },
}

/// Parses one source file's text into a record.
///
/// The record's `folder` is filled in by the loader; the date fallback
/// instant comes from `cfg` so identical inputs parse identically.
pub fn parse_record(cfg: &Config, path: &Path, text: &str) -> Result<RawRecord, ParseError> {
    let mut record = RawRecord {
        path: path.to_path_buf(),
        ..RawRecord::default()
    };

    let mut raw_date: Option<String> = None;
    let mut body = String::new();
    let mut in_headers = true;
    let mut current_name = String::new();
    let mut current_value = String::new();

    for line in text.lines() {
        if !in_headers {
            body.push_str(line);
            body.push('\n');
            continue;
        }

        if line.is_empty() {
            if !current_name.is_empty() {
                apply_header(&mut record, &mut raw_date, &current_name, &current_value);
            }
            in_headers = false;
            continue;
        }

        if line.starts_with(' ') || line.starts_with('\t') {
            // Folded continuation line.
            current_value.push(' ');
            current_value.push_str(line.trim());
            continue;
        }

        if !current_name.is_empty() {
            apply_header(&mut record, &mut raw_date, &current_name, &current_value);
            current_name.clear();
            current_value.clear();
        }
        if let Some((name, value)) = line.split_once(':') {
            current_name = name.trim().to_string();
            current_value = value.trim().to_string();
        }
    }

    // A file may end while still in the header region.
    if in_headers && !current_name.is_empty() {
        apply_header(&mut record, &mut raw_date, &current_name, &current_value);
    }

    record.body = body;

    match raw_date.as_deref().and_then(dates::parse_date) {
        Some(date) => record.date = date,
        None => {
            record.date = cfg.date_fallback;
            record.date_is_fallback = true;
        }
    }

    if record.message_id.is_empty() {
        return Err(ParseError::MissingMessageId {
            path: path.display().to_string(),
        });
    }

    Ok(record)
}

fn apply_header(record: &mut RawRecord, raw_date: &mut Option<String>, name: &str, value: &str) {
    match name {
        "Message-ID" => record.message_id = value.to_string(),
        "Date" => *raw_date = Some(value.to_string()),
        "From" => record.from = value.to_string(),
        "To" => record.to = split_recipients(value),
        "Cc" => record.cc = split_recipients(value),
        "Bcc" => record.bcc = split_recipients(value),
        "Subject" => record.subject = value.to_string(),
        "X-From" => record.x_from = clean_directory_address(value),
        "X-To" => record.x_to = value.to_string(),
        "X-cc" => record.x_cc = value.to_string(),
        "X-bcc" => record.x_bcc = value.to_string(),
        "X-Folder" => record.x_folder = value.to_string(),
        "X-Origin" => record.x_origin = value.to_string(),
        "X-FileName" => record.x_filename = value.to_string(),
        // Unrecognized headers are dropped.
        _ => {}
    }
}

/// Splits an address-list header on commas, trimming entries and
/// discarding empties.
fn split_recipients(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strips the trailing X.400 directory-service junk the source appends to
/// display names, e.g. `Kaminski, Vince </O=ENRON/OU=NA/...>`.
fn clean_directory_address(value: &str) -> String {
    match value.find("</O=") {
        Some(idx) if idx > 0 => value[..idx].trim().to_string(),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn test_config() -> Config {
        Config {
            date_fallback: Utc.with_ymd_and_hms(2004, 6, 1, 12, 0, 0).unwrap(),
            ..Config::default()
        }
    }

    const SAMPLE: &str = "Message-ID: <100.202.JavaMail@host>\n\
Date: Mon, 5 Mar 2001 09:15:00 -0800 (PST)\n\
From: vince.kaminski@enron.com\n\
To: jane.doe@enron.com, bob@partner.com\n\
Subject: Budget review\n\
X-From: Kaminski, Vince </O=ENRON/OU=NA/CN=RECIPIENTS/CN=VKAMINS>\n\
X-Folder: \\Vince_Kaminski\\Sent Items\n\
\n\
First line of body.\n\
Second line.\n";

    #[test]
    fn parses_headers_and_body() {
        let cfg = test_config();
        let record = parse_record(&cfg, Path::new("1."), SAMPLE).unwrap();
        assert_eq!(record.message_id, "<100.202.JavaMail@host>");
        assert_eq!(record.from, "vince.kaminski@enron.com");
        assert_eq!(record.to, vec!["jane.doe@enron.com", "bob@partner.com"]);
        assert_eq!(record.subject, "Budget review");
        assert_eq!(record.x_from, "Kaminski, Vince");
        assert_eq!(record.x_folder, "\\Vince_Kaminski\\Sent Items");
        assert_eq!(record.body, "First line of body.\nSecond line.\n");
        assert!(!record.date_is_fallback);
        assert_eq!(
            record.date,
            Utc.with_ymd_and_hms(2001, 3, 5, 17, 15, 0).unwrap()
        );
    }

    #[test]
    fn folds_continuation_lines() {
        let cfg = test_config();
        let text =
            "Message-ID: <1@host>\nTo: a@x.com,\n\tb@x.com,\n c@x.com\n\nbody\n";
        let record = parse_record(&cfg, Path::new("f"), text).unwrap();
        assert_eq!(record.to, vec!["a@x.com", "b@x.com", "c@x.com"]);
    }

    #[test]
    fn missing_message_id_is_a_parse_error() {
        let cfg = test_config();
        let err = parse_record(&cfg, Path::new("f"), "From: a@x.com\n\nbody\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingMessageId { .. }));
    }

    #[test]
    fn unparseable_date_uses_recorded_fallback() {
        let cfg = test_config();
        let text = "Message-ID: <1@host>\nDate: whenever\n\nbody\n";
        let record = parse_record(&cfg, Path::new("f"), text).unwrap();
        assert!(record.date_is_fallback);
        assert_eq!(record.date, cfg.date_fallback);
    }

    #[test]
    fn missing_date_uses_recorded_fallback() {
        let cfg = test_config();
        let record = parse_record(&cfg, Path::new("f"), "Message-ID: <1@host>\n\nbody\n").unwrap();
        assert!(record.date_is_fallback);
    }

    #[test]
    fn empty_recipient_entries_are_discarded() {
        let cfg = test_config();
        let text = "Message-ID: <1@host>\nTo: a@x.com, , b@x.com,\n\nbody\n";
        let record = parse_record(&cfg, Path::new("f"), text).unwrap();
        assert_eq!(record.to, vec!["a@x.com", "b@x.com"]);
    }

    #[test]
    fn unrecognized_headers_are_dropped() {
        let cfg = test_config();
        let text = "Message-ID: <1@host>\nContent-Type: text/plain\n\nbody\n";
        let record = parse_record(&cfg, Path::new("f"), text).unwrap();
        assert_eq!(record.body, "body\n");
    }

    #[test]
    fn header_only_file_still_parses() {
        let cfg = test_config();
        let record = parse_record(&cfg, Path::new("f"), "Message-ID: <1@host>\n").unwrap();
        assert_eq!(record.message_id, "<1@host>");
        assert!(record.body.is_empty());
    }
}
