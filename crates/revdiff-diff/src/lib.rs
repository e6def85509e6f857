//! Sequence differ for revdiff.
//!
//! Computes the edit script between two revisions of a line sequence: the
//! ordered copy, delete, insert, and change operations that transform the old
//! sequence into the new one.
//!
//! # Key Types
//!
//! - [`SequenceDiffer`] / [`Algorithm`] -- Alignment of two sequences
//! - [`EditScript`] / [`EditOp`] -- The resulting operations, with half-open ranges

pub mod differ;
pub mod error;
pub mod script;

pub use differ::{diff_lines, Algorithm, SequenceDiffer};
pub use error::DiffError;
pub use script::{EditKind, EditOp, EditScript};
