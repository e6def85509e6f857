//! Revision comparison for revdiff.
//!
//! Turns two revisions of a structured document into per-field diff tables:
//! each field's items are rendered to comparable strings, multi-value fields
//! are combined into one text per side, and the two texts are diffed and
//! formatted line by line.
//!
//! # Key Types
//!
//! - [`Revision`] / [`Field`] / [`FieldItem`] -- Input documents
//! - [`DiffSettings`] -- TOML settings (context lines, algorithm, per-field options)
//! - [`EntityComparison`] -- Field pairing, row generation, comparison tables
//! - [`ComparisonTable`] / [`TableSection`] -- Output, one section per changed field

pub mod compare;
pub mod error;
pub mod field;
pub mod revision;
pub mod settings;

pub use compare::{
    combine_fields, process_state_line, split_lines, ComparisonTable, EntityComparison,
    FieldComparison, StateLines, TableSection, UnifiedSection,
};
pub use error::{CompareError, CompareResult};
pub use field::{build_field, build_item, FieldItem};
pub use revision::{Field, Revision};
pub use settings::{DiffSettings, FieldSettings, GeneralSettings, Layout, ListCompare};
