//! Fatal error types for mailforge.
//!
//! Only run-aborting failures live here. Per-record failures (parse and
//! transform errors) are defined next to the stages that produce them and
//! are reported through run statistics instead of aborting.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for mailforge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal pipeline errors. Any of these aborts the run with a non-zero exit.
#[derive(Debug, Error)]
pub enum Error {
    #[error("source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_not_found_names_the_path() {
        let err = Error::SourceNotFound(PathBuf::from("/data/maildir/kaminski-v"));
        assert_eq!(
            err.to_string(),
            "source directory not found: /data/maildir/kaminski-v"
        );
    }

    #[test]
    fn io_errors_convert() {
        fn fails() -> Result<()> {
            Err(std::io::Error::other("disk gone"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(Error::Io(_))));
    }
}
