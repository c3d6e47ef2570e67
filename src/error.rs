// File: src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by reference and trie persistence, configuration and scanning.
#[derive(Debug, Error)]
pub enum CheckerError {
    /// A persisted artifact was missing at load time.
    #[error("{what} not found: {}", .path.display())]
    NotFound { what: &'static str, path: PathBuf },

    /// Reading or writing a persisted artifact failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a valid artifact of the expected kind.
    #[error("invalid {what} file {}: {reason}", .path.display())]
    Format {
        what: &'static str,
        path: PathBuf,
        reason: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T, E = CheckerError> = std::result::Result<T, E>;

impl CheckerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Maps a failed open into `NotFound` when the file is absent.
    pub(crate) fn open(what: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { what, path }
        } else {
            Self::Io { path, source }
        }
    }

    pub(crate) fn format(what: &'static str, path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Format { what, path: path.into(), reason: reason.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_maps_missing_file_to_not_found() {
        let err = CheckerError::open(
            "trie",
            "data/trie.bin",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "trie not found: data/trie.bin");
    }

    #[test]
    fn test_open_keeps_other_io_errors() {
        let err = CheckerError::open(
            "vocabulary",
            "v.bin",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, CheckerError::Io { .. }));
    }
}
