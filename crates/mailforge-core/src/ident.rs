//! Deterministic content-addressed identifiers.
//!
//! Output message IDs are a pure function of the source identifier; thread
//! IDs are a pure function of the thread key. Both are SHA-256 digests
//! truncated to 16 hex chars, which keeps them stable across runs and
//! independent of processing order.

use sha2::{Digest, Sha256};

/// Hex length of generated identifiers.
pub const ID_LEN: usize = 16;

/// Output message identifier for a source record identifier.
#[must_use]
pub fn message_id(source_id: &str) -> String {
    truncated_hex(Sha256::digest(source_id.as_bytes()).as_slice())
}

/// Thread identifier for a normalized thread key.
#[must_use]
pub fn thread_id(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"thread:");
    hasher.update(key.as_bytes());
    truncated_hex(hasher.finalize().as_slice())
}

fn truncated_hex(digest: &[u8]) -> String {
    let mut out = hex::encode(digest);
    out.truncate(ID_LEN);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_fixed_width() {
        assert_eq!(message_id("<123.JavaMail.evans@thyme>").len(), ID_LEN);
        assert_eq!(thread_id("budget|a@x.com,b@x.com").len(), ID_LEN);
    }

    #[test]
    fn message_ids_are_stable() {
        let a = message_id("<123.JavaMail.evans@thyme>");
        let b = message_id("<123.JavaMail.evans@thyme>");
        assert_eq!(a, b);
    }

    #[test]
    fn message_and_thread_namespaces_differ() {
        // Same input string must not collide across the two ID spaces.
        assert_ne!(message_id("budget"), thread_id("budget"));
    }

    #[test]
    fn distinct_sources_get_distinct_ids() {
        assert_ne!(message_id("<1@thyme>"), message_id("<2@thyme>"));
    }
}
