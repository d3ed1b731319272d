//! Error types for docsmith.
//!
//! Library crates use [`DocsmithError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all docsmith operations.
#[derive(Debug, thiserror::Error)]
pub enum DocsmithError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A content file has no `title: ` line before its front-matter terminator.
    #[error("missing title field in {path:?}")]
    MissingTitle { path: PathBuf },

    /// A content file has no closing front-matter delimiter.
    #[error("malformed front matter in {path:?}: no closing delimiter")]
    MalformedFrontMatter { path: PathBuf },

    /// The navigation document does not contain the marker line.
    #[error("navigation marker {marker:?} not found in {path:?}")]
    MarkerNotFound { path: PathBuf, marker: String },

    /// Notebook parsing or export error.
    #[error("notebook error in {path:?}: {message}")]
    Notebook { path: PathBuf, message: String },

    /// Data validation error.
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocsmithError>;

impl DocsmithError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a notebook error for the given file.
    pub fn notebook(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Notebook {
            path: path.into(),
            message: msg.into(),
        }
    }
}
