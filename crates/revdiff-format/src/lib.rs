//! Hunk formatter for revdiff.
//!
//! Turns an [`EditScript`](revdiff_diff::EditScript) into display-ready rows:
//! unchanged runs are windowed down to the configured context, changes are
//! paired old/new, and every non-blank cell carries its 1-based line number.
//!
//! # Key Types
//!
//! - [`HunkFormatter`] / [`FormatOptions`] -- Windowing and row generation
//! - [`Hunk`] / [`Row`] / [`FormattedRow`] / [`Side`] -- Two-column output
//! - [`LineCounter`] -- Line-number cursor threaded through a diff session
//! - [`UnifiedRow`] -- Single-column output

pub mod counter;
pub mod formatter;
pub mod inline;
pub mod row;
pub mod unified;

pub use counter::LineCounter;
pub use formatter::{FormatOptions, HunkFormatter};
pub use inline::word_highlights;
pub use row::{FormattedRow, Hunk, Marker, Row, Side};
pub use unified::{unified, UnifiedLine, UnifiedRow};
