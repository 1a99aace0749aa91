//! Multi-format date parsing for source record headers.
//!
//! The source archive mixes RFC 2822 dates with and without trailing
//! zone-name comments (`Mon, 5 Mar 2001 09:15:00 -0800 (PST)`) and a bare
//! variant without the weekday. Formats are tried in order; the first match
//! wins. Failure is returned as `None`; the caller substitutes the run's
//! recorded fallback instant, never the wall clock.

use chrono::{DateTime, Utc};

/// Explicit patterns tried after the RFC 2822 parser.
const FORMATS: &[&str] = &[
    "%a, %d %b %Y %H:%M:%S %z",
    "%d %b %Y %H:%M:%S %z",
];

/// Parse a `Date` header value. Returns `None` when no format matches.
#[must_use]
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = strip_zone_comment(raw.trim());

    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    None
}

/// Drops a trailing parenthesized zone name, e.g. `... -0800 (PST)`.
fn strip_zone_comment(raw: &str) -> &str {
    if raw.ends_with(')') {
        if let Some(idx) = raw.rfind(" (") {
            return raw[..idx].trim_end();
        }
    }
    raw
}
