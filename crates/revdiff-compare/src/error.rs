//! Error types for the comparison crate.

use std::path::PathBuf;

/// Errors that can occur while loading settings or revision documents.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// A settings or revision file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings document is not valid TOML or has the wrong shape.
    #[error("invalid settings: {0}")]
    Settings(#[from] toml::de::Error),

    /// The revision document is not valid JSON or has the wrong shape.
    #[error("invalid revision document: {0}")]
    Revision(#[from] serde_json::Error),
}

/// Convenience alias for comparison results.
pub type CompareResult<T> = Result<T, CompareError>;
