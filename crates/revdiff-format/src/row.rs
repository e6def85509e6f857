//! Rows produced by the hunk formatter.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// The marker shown next to one side of a row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    /// Padding cell with no line behind it.
    #[default]
    Blank,
    Deleted,
    Added,
    Context,
}

impl Marker {
    pub const fn symbol(self) -> &'static str {
        match self {
            Marker::Blank => "",
            Marker::Deleted => "-",
            Marker::Added => "+",
            Marker::Context => " ",
        }
    }
}

/// One side (old or new) of a formatted row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Side {
    pub marker: Marker,
    /// 1-based line number; `None` on blank cells.
    pub line_no: Option<usize>,
    pub text: String,
    /// Byte ranges of `text` that differ from the opposite side.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<Range<usize>>,
}

impl Side {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn context(line_no: usize, text: impl Into<String>) -> Self {
        Self::line(Marker::Context, line_no, text)
    }

    pub fn deleted(line_no: usize, text: impl Into<String>) -> Self {
        Self::line(Marker::Deleted, line_no, text)
    }

    pub fn added(line_no: usize, text: impl Into<String>) -> Self {
        Self::line(Marker::Added, line_no, text)
    }

    fn line(marker: Marker, line_no: usize, text: impl Into<String>) -> Self {
        Self {
            marker,
            line_no: Some(line_no),
            text: text.into(),
            highlights: Vec::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.marker == Marker::Blank
    }
}

/// A two-column row: the old line on the left, the new line on the right.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedRow {
    pub old: Side,
    pub new: Side,
}

impl FormattedRow {
    pub fn new(old: Side, new: Side) -> Self {
        Self { old, new }
    }

    /// Returns `true` for unchanged lines shown as context.
    pub fn is_context(&self) -> bool {
        self.old.marker == Marker::Context
    }
}

/// An entry of the formatter's flat output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Row {
    /// "Line N" label opening a hunk.
    Header { old_line: usize, new_line: usize },
    Line(FormattedRow),
}

impl Row {
    pub fn as_line(&self) -> Option<&FormattedRow> {
        match self {
            Row::Line(row) => Some(row),
            Row::Header { .. } => None,
        }
    }
}

/// A contiguous group of rows: one run of changes plus its context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunk {
    /// Line number in the old sequence where this hunk starts (1-based).
    pub old_start: usize,
    /// Number of old lines covered by this hunk.
    pub old_len: usize,
    /// Line number in the new sequence where this hunk starts (1-based).
    pub new_start: usize,
    /// Number of new lines covered by this hunk.
    pub new_len: usize,
    pub rows: Vec<FormattedRow>,
}

impl Hunk {
    pub fn header(&self) -> Row {
        Row::Header {
            old_line: self.old_start,
            new_line: self.new_start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_render_as_symbols() {
        assert_eq!(Marker::Deleted.symbol(), "-");
        assert_eq!(Marker::Added.symbol(), "+");
        assert_eq!(Marker::Blank.symbol(), "");
    }

    #[test]
    fn rows_serialize_with_kind_tag() {
        let row = Row::Line(FormattedRow::new(Side::blank(), Side::added(1, "Revision 1")));
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["kind"], "line");
        assert_eq!(json["new"]["marker"], "added");
        assert_eq!(json["new"]["line_no"], 1);
        assert!(json["old"]["line_no"].is_null());
        assert!(json["new"].get("highlights").is_none());

        let header = serde_json::to_value(Row::Header { old_line: 3, new_line: 4 }).unwrap();
        assert_eq!(header["kind"], "header");
        assert_eq!(header["new_line"], 4);
    }
}
