//! Error types shared across Markex crates.

use std::path::PathBuf;

/// Top-level error type for Markex operations.
///
/// The first four variants form the export failure taxonomy. Each is local to
/// a single profile's manifest write and aborts only that profile.
#[derive(Debug, thiserror::Error)]
pub enum MarkexError {
    /// Content cannot be represented in the target text or byte encoding.
    #[error("Encoding error: {message}")]
    Encoding { message: String },

    /// A format-specific structural check failed (e.g. malformed SRT timestamps).
    #[error("Content validation failed: {message}")]
    ContentValidation { message: String },

    /// The destination write failed.
    #[error("Failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A format-specific transform (e.g. MIDI build) could not complete.
    #[error("Conversion error: {message}")]
    Conversion { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias using MarkexError.
pub type MarkexResult<T> = Result<T, MarkexError>;

impl MarkexError {
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding {
            message: msg.into(),
        }
    }

    pub fn content_validation(msg: impl Into<String>) -> Self {
        Self::ContentValidation {
            message: msg.into(),
        }
    }

    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    pub fn conversion(msg: impl Into<String>) -> Self {
        Self::Conversion {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether this error came out of a manifest write (as opposed to bad
    /// input or configuration).
    pub fn is_write_failure(&self) -> bool {
        matches!(
            self,
            Self::Encoding { .. }
                | Self::ContentValidation { .. }
                | Self::FileWrite { .. }
                | Self::Conversion { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_failures_are_classified() {
        assert!(MarkexError::encoding("bad").is_write_failure());
        assert!(MarkexError::content_validation("bad").is_write_failure());
        assert!(MarkexError::conversion("bad").is_write_failure());
        assert!(MarkexError::file_write(
            "/tmp/x.csv",
            std::io::Error::new(std::io::ErrorKind::Other, "disk full")
        )
        .is_write_failure());
        assert!(!MarkexError::invalid_input("bad").is_write_failure());
    }

    #[test]
    fn test_file_write_message_names_path() {
        let err = MarkexError::file_write(
            "/out/timeline.csv",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/out/timeline.csv"));
    }
}
