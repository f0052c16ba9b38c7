//! Error types for mdindex.
//!
//! Library crates use [`MdIndexError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all mdindex operations.
#[derive(Debug, thiserror::Error)]
pub enum MdIndexError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// The documentation source root does not exist.
    #[error("source root not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A structured index artifact cannot be turned into a tree.
    #[error("malformed index artifact: {message}")]
    MalformedArtifact { message: String },

    /// YAML/JSON emission error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MdIndexError>;

impl MdIndexError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a malformed-artifact error from any displayable message.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedArtifact {
            message: msg.into(),
        }
    }

    /// Source root missing at `path`.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_yaml::Error> for MdIndexError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Serialization(format!("yaml: {e}"))
    }
}

impl From<serde_json::Error> for MdIndexError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(format!("json: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = MdIndexError::config("no operation selected");
        assert_eq!(err.to_string(), "config error: no operation selected");

        let err = MdIndexError::malformed("root must be a mapping");
        assert!(err.to_string().contains("root must be a mapping"));

        let err = MdIndexError::not_found("/nope/docs");
        assert_eq!(err.to_string(), "source root not found: /nope/docs");
    }
}
