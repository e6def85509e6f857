//! Field-by-field comparison of two revisions.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use revdiff_format::{unified, HunkFormatter, LineCounter, Row, UnifiedRow};

use crate::field::build_field;
use crate::revision::Revision;
use crate::settings::DiffSettings;

/// The combined text of one field on both sides of a comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldComparison {
    pub name: String,
    pub label: String,
    pub left: String,
    pub right: String,
}

/// Both sides of a field split into lines, with their counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateLines {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub count_left: usize,
    pub count_right: usize,
}

/// The rows of one changed field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSection {
    pub name: String,
    pub label: String,
    pub rows: Vec<Row>,
}

/// [`TableSection`] in the single-column layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedSection {
    pub name: String,
    pub label: String,
    pub rows: Vec<UnifiedRow>,
}

/// The full comparison: one section per field with visible changes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub sections: Vec<TableSection>,
}

impl ComparisonTable {
    /// Returns `true` if no field changed.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn unified(&self) -> Vec<UnifiedSection> {
        self.sections
            .iter()
            .map(|section| UnifiedSection {
                name: section.name.clone(),
                label: section.label.clone(),
                rows: unified(&section.rows),
            })
            .collect()
    }
}

/// Split a field's text into lines.
///
/// An empty string is "no lines", never one empty line, so that adding or
/// clearing a field shows up as a pure addition or removal. Trailing
/// newlines are kept as a final empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

/// Combine the deltas of a field on both sides into one string per side.
///
/// The parts of each delta are joined by newlines, then the deltas are.
pub fn combine_fields(left: &[Vec<String>], right: &[Vec<String>]) -> (String, String) {
    (join_deltas(left), join_deltas(right))
}

fn join_deltas(deltas: &[Vec<String>]) -> String {
    deltas
        .iter()
        .map(|parts| parts.join("\n"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl StateLines {
    /// Split both texts into lines and count them.
    pub fn new(left: &str, right: &str) -> Self {
        let left: Vec<String> = split_lines(left).into_iter().map(String::from).collect();
        let right: Vec<String> = split_lines(right).into_iter().map(String::from).collect();
        Self {
            count_left: left.len(),
            count_right: right.len(),
            left,
            right,
        }
    }
}

/// Split both sides of a compared field into lines and count them.
pub fn process_state_line(field: &FieldComparison) -> StateLines {
    StateLines::new(&field.left, &field.right)
}

/// Compares revisions field by field using one set of [`DiffSettings`].
#[derive(Clone, Debug, Default)]
pub struct EntityComparison {
    settings: DiffSettings,
}

impl EntityComparison {
    pub fn new(settings: DiffSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &DiffSettings {
        &self.settings
    }

    /// Pair up the fields of two revisions.
    ///
    /// Fields of the left revision come first, in name order, followed by
    /// fields that exist only on the right. A field missing on one side is
    /// compared against an empty text. Hidden fields are skipped.
    pub fn compare_revisions(&self, left: &Revision, right: &Revision) -> Vec<FieldComparison> {
        let mut result = Vec::new();

        for (name, field) in &left.fields {
            let settings = self.settings.field(name);
            if !settings.visible {
                debug!(field = %name, "skipping hidden field");
                continue;
            }
            let left_values = build_field(&field.items, &settings);
            let right_values = right
                .fields
                .get(name)
                .map(|other| build_field(&other.items, &settings))
                .unwrap_or_default();
            let (left_text, right_text) = combine_fields(&left_values, &right_values);
            result.push(FieldComparison {
                name: name.clone(),
                label: field.label.clone(),
                left: left_text,
                right: right_text,
            });
        }

        for (name, field) in &right.fields {
            if left.fields.contains_key(name) {
                continue;
            }
            let settings = self.settings.field(name);
            if !settings.visible {
                debug!(field = %name, "skipping hidden field");
                continue;
            }
            debug!(field = %name, "field exists only on the right");
            let (left_text, right_text) =
                combine_fields(&[], &build_field(&field.items, &settings));
            result.push(FieldComparison {
                name: name.clone(),
                label: field.label.clone(),
                left: left_text,
                right: right_text,
            });
        }

        result
    }

    /// Diff two texts line by line and lay out the rows.
    ///
    /// Line numbers continue from `counter`, which is advanced past both texts.
    pub fn get_rows(
        &self,
        left: &str,
        right: &str,
        show_header: bool,
        counter: &mut LineCounter,
    ) -> Vec<Row> {
        self.state_rows(&StateLines::new(left, right), show_header, counter)
    }

    /// Diff the split lines of a field and lay out the rows.
    pub fn state_rows(
        &self,
        state: &StateLines,
        show_header: bool,
        counter: &mut LineCounter,
    ) -> Vec<Row> {
        debug!(
            left = state.count_left,
            right = state.count_right,
            "diffing field lines"
        );
        let script = self.settings.differ().diff(&state.left, &state.right);
        HunkFormatter::new(self.settings.format_options(show_header))
            .format(&script, &state.left, &state.right, counter)
    }

    /// Compare two revisions and collect the rows of every changed field.
    pub fn build_table(&self, left: &Revision, right: &Revision) -> ComparisonTable {
        let mut counter = LineCounter::new();
        let mut sections = Vec::new();
        let fields = self.compare_revisions(left, right);

        for field in &fields {
            if !self.settings.general.continuous_line_numbers {
                counter.reset();
            }
            let show_header = self.settings.field(&field.name).show_header;
            let state = process_state_line(field);
            let rows = self.state_rows(&state, show_header, &mut counter);
            if rows.is_empty() {
                continue;
            }
            sections.push(TableSection {
                name: field.name.clone(),
                label: field.label.clone(),
                rows,
            });
        }

        info!(
            fields = fields.len(),
            changed = sections.len(),
            "built comparison table"
        );
        ComparisonTable { sections }
    }
}
