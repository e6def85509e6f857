//! Single-column layout.
//!
//! Collapses two-column rows into one column: context lines appear once, and
//! each changed row contributes its old line followed by its new line. Blank
//! padding cells are dropped.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::row::{Marker, Row};

/// One line of the single-column layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedLine {
    pub marker: Marker,
    pub old_line_no: Option<usize>,
    pub new_line_no: Option<usize>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<Range<usize>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnifiedRow {
    Header { old_line: usize, new_line: usize },
    Line(UnifiedLine),
}

/// Convert two-column rows into the single-column layout.
pub fn unified(rows: &[Row]) -> Vec<UnifiedRow> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let row = match row {
            Row::Header { old_line, new_line } => {
                out.push(UnifiedRow::Header {
                    old_line: *old_line,
                    new_line: *new_line,
                });
                continue;
            }
            Row::Line(row) => row,
        };

        if row.is_context() {
            out.push(UnifiedRow::Line(UnifiedLine {
                marker: Marker::Context,
                old_line_no: row.old.line_no,
                new_line_no: row.new.line_no,
                text: row.old.text.clone(),
                highlights: Vec::new(),
            }));
            continue;
        }
        if !row.old.is_blank() {
            out.push(UnifiedRow::Line(UnifiedLine {
                marker: Marker::Deleted,
                old_line_no: row.old.line_no,
                new_line_no: None,
                text: row.old.text.clone(),
                highlights: row.old.highlights.clone(),
            }));
        }
        if !row.new.is_blank() {
            out.push(UnifiedRow::Line(UnifiedLine {
                marker: Marker::Added,
                old_line_no: None,
                new_line_no: row.new.line_no,
                text: row.new.text.clone(),
                highlights: row.new.highlights.clone(),
            }));
        }
    }
    out
}
