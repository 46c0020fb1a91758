//! Fatal setup errors.
//!
//! Per-file problems are never errors; they are recorded in the
//! [`FileVerdict`](crate::models::FileVerdict) of that file.

use std::path::PathBuf;

/// Result type alias for setup operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a run before any file is validated.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source directory cannot be listed.
    #[error("failed to read source directory '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stylesheet cannot be read.
    #[error("failed to read stylesheet '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config file exists but is not valid.
    #[error("invalid config '{path}': {message}")]
    Config { path: PathBuf, message: String },

    /// Browser target queries cannot be resolved.
    #[error("invalid browser targets: {0}")]
    Targets(String),
}

impl Error {
    pub fn read_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadDir {
            path: path.into(),
            source,
        }
    }

    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }
}
