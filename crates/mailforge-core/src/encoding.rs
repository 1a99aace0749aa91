//! Transfer-encoding repair for raw body text.
//!
//! Source bodies carry leftover quoted-printable escapes and HTML entities.
//! This is a targeted repair of the sequences that actually occur in the
//! archive, not a general quoted-printable decoder.

/// Escape sequences in replacement order. `=3D` must decode after the
/// other `=XX` escapes so a literal `=3D20` becomes `=20`, not a space.
const REPLACEMENTS: &[(&str, &str)] = &[
    ("=20", " "),
    ("=09", "\t"),
    ("=0A", "\n"),
    ("=0D", "\r"),
    ("=3D", "="),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
];

/// Applies the repair table to a body.
#[must_use]
pub fn fix_transfer_encoding(text: &str) -> String {
    let mut out = text.to_string();
    for (from, to) in REPLACEMENTS {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_common_escapes() {
        assert_eq!(
            fix_transfer_encoding("hello=20world=09tab=0Anewline"),
            "hello world\ttab\nnewline"
        );
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(fix_transfer_encoding("a &amp; b &lt;c&gt;"), "a & b <c>");
    }

    #[test]
    fn escaped_equals_decodes_last() {
        // "=3D20" is an escaped "=" followed by "20", not an escaped space.
        assert_eq!(fix_transfer_encoding("x=3D20y"), "x=20y");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(fix_transfer_encoding("no escapes here"), "no escapes here");
    }
}
