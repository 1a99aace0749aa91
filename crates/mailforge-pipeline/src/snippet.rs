//! Preview snippet generation.
//!
//! The snippet is built from the body up to the first quoted-reply marker,
//! whitespace-collapsed, and capped at 100 characters with an ellipsis
//! suffix when truncated.

/// Maximum snippet length, ellipsis included.
pub const SNIPPET_MAX: usize = 100;

const ELLIPSIS: &str = "...";
const ORIGINAL_MESSAGE_DIVIDER: &str = "-----Original Message-----";

/// Builds the preview snippet for a (transformed) body.
#[must_use]
pub fn generate_snippet(body: &str) -> String {
    // Quote markers are line-structural, so detect them before collapsing
    // whitespace.
    let content: Vec<&str> = body
        .lines()
        .take_while(|line| !line.starts_with('>') && !line.contains(ORIGINAL_MESSAGE_DIVIDER))
        .collect();

    let collapsed = content
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if collapsed.chars().count() > SNIPPET_MAX {
        let head: String = collapsed.chars().take(SNIPPET_MAX - ELLIPSIS.len()).collect();
        format!("{head}{ELLIPSIS}")
    } else {
        collapsed
    }
}
