//! Error types for the diff crate.

use thiserror::Error;

/// Errors produced while configuring the differ or loading a script.
///
/// Diffing itself is total and never fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiffError {
    #[error("unknown diff algorithm: {0} (expected myers, patience, or lcs)")]
    UnknownAlgorithm(String),

    /// Operations that do not partition the old and new sequences.
    #[error("invalid edit script: {0}")]
    InvalidScript(String),
}
