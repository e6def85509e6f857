//! Hunk formatter: context-windowed, line-numbered rows from an edit script.
//!
//! Changes are grouped into hunks. An unchanged run between two changes stays
//! inside one hunk when it is no longer than `leading_context +
//! trailing_context`; a longer run closes the hunk after `trailing_context`
//! lines and the next hunk reopens `leading_context` lines before the next
//! change. Unbounded context (`None`) shows every unchanged line.
//!
//! Callers must pass an empty sequence, not a single empty line, for an empty
//! field. A `[""]` side is one real line and renders as a change from an empty
//! line rather than as a pure addition or removal.

use serde::{Deserialize, Serialize};
use tracing::debug;

use revdiff_diff::{EditOp, EditScript};

use crate::counter::LineCounter;
use crate::inline::word_highlights;
use crate::row::{FormattedRow, Hunk, Row, Side};

/// Options controlling how an edit script is laid out.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Unchanged lines shown before each change; `None` shows all of them.
    pub leading_context: Option<usize>,
    /// Unchanged lines shown after each change; `None` shows all of them.
    pub trailing_context: Option<usize>,
    /// Emit a [`Row::Header`] before each hunk.
    pub show_header: bool,
    /// Highlight the differing words of paired change rows.
    pub word_level: bool,
}

impl FormatOptions {
    /// Show every unchanged line.
    pub fn full_context() -> Self {
        Self::default()
    }

    /// Show at most `leading` lines before and `trailing` lines after each change.
    pub fn windowed(leading: usize, trailing: usize) -> Self {
        Self {
            leading_context: Some(leading),
            trailing_context: Some(trailing),
            ..Self::default()
        }
    }
}

/// Lays out edit scripts as hunks of two-column rows.
#[derive(Clone, Debug, Default)]
pub struct HunkFormatter {
    options: FormatOptions,
}

impl HunkFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Group `script` into hunks, numbering lines from `counter`.
    ///
    /// `counter` is advanced by the full length of both sequences.
    ///
    /// # Panics
    ///
    /// Panics if `script` was not computed from sequences of the same lengths
    /// as `old` and `new`.
    pub fn hunks<T: AsRef<str>>(
        &self,
        script: &EditScript,
        old: &[T],
        new: &[T],
        counter: &mut LineCounter,
    ) -> Vec<Hunk> {
        assert_eq!(script.old_len(), old.len(), "edit script does not match old sequence");
        assert_eq!(script.new_len(), new.len(), "edit script does not match new sequence");

        let base = *counter;
        let lead = self.options.leading_context.unwrap_or(usize::MAX);
        let trail = self.options.trailing_context.unwrap_or(usize::MAX);

        let ops = script.merge_changes().into_ops();
        let mut hunks = Vec::new();
        let mut open: Option<Vec<EditOp>> = None;
        let mut last_copy: Option<EditOp> = None;

        for (i, op) in ops.iter().enumerate() {
            match op {
                EditOp::Copy { old: o, new: n } => {
                    if let Some(mut block) = open.take() {
                        let is_last = i + 1 == ops.len();
                        if !is_last && o.len() <= lead.saturating_add(trail) {
                            block.push(op.clone());
                            open = Some(block);
                        } else {
                            let keep = o.len().min(trail);
                            if keep > 0 {
                                block.push(EditOp::Copy {
                                    old: o.start..o.start + keep,
                                    new: n.start..n.start + keep,
                                });
                            }
                            hunks.push(self.build_hunk(&block, old, new, &base));
                        }
                    }
                    last_copy = Some(op.clone());
                }
                _ => {
                    let block = open.get_or_insert_with(|| {
                        let mut block = Vec::new();
                        if let Some(EditOp::Copy { old: o, new: n }) = last_copy.take() {
                            let keep = o.len().min(lead);
                            if keep > 0 {
                                block.push(EditOp::Copy {
                                    old: o.end - keep..o.end,
                                    new: n.end - keep..n.end,
                                });
                            }
                        }
                        block
                    });
                    block.push(op.clone());
                }
            }
        }
        if let Some(block) = open {
            hunks.push(self.build_hunk(&block, old, new, &base));
        }

        counter.advance(old.len(), new.len());
        debug!(
            hunks = hunks.len(),
            rows = hunks.iter().map(|h| h.rows.len()).sum::<usize>(),
            old_len = old.len(),
            new_len = new.len(),
            "formatted edit script"
        );
        hunks
    }

    /// Lay out `script` as a flat list of rows, numbering lines from `counter`.
    ///
    /// A script without changes yields no rows.
    pub fn format<T: AsRef<str>>(
        &self,
        script: &EditScript,
        old: &[T],
        new: &[T],
        counter: &mut LineCounter,
    ) -> Vec<Row> {
        let mut rows = Vec::new();
        for hunk in self.hunks(script, old, new, counter) {
            if self.options.show_header {
                rows.push(hunk.header());
            }
            rows.extend(hunk.rows.into_iter().map(Row::Line));
        }
        rows
    }

    /// Like [`format`](Self::format), numbering lines from 1.
    pub fn format_fresh<T: AsRef<str>>(
        &self,
        script: &EditScript,
        old: &[T],
        new: &[T],
    ) -> Vec<Row> {
        self.format(script, old, new, &mut LineCounter::new())
    }

    fn build_hunk<T: AsRef<str>>(
        &self,
        block: &[EditOp],
        old: &[T],
        new: &[T],
        base: &LineCounter,
    ) -> Hunk {
        let (first, last) = match (block.first(), block.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => unreachable!("hunks always contain at least one edit"),
        };
        let old_span = first.old_range().start..last.old_range().end;
        let new_span = first.new_range().start..last.new_range().end;

        let mut rows = Vec::new();
        for op in block {
            self.push_rows(op, old, new, base, &mut rows);
        }

        Hunk {
            old_start: base.old_line(old_span.start),
            old_len: old_span.len(),
            new_start: base.new_line(new_span.start),
            new_len: new_span.len(),
            rows,
        }
    }

    fn push_rows<T: AsRef<str>>(
        &self,
        op: &EditOp,
        old: &[T],
        new: &[T],
        base: &LineCounter,
        rows: &mut Vec<FormattedRow>,
    ) {
        match op {
            EditOp::Copy { old: o, new: n } => {
                for (i, j) in o.clone().zip(n.clone()) {
                    rows.push(FormattedRow::new(
                        Side::context(base.old_line(i), old[i].as_ref()),
                        Side::context(base.new_line(j), new[j].as_ref()),
                    ));
                }
            }
            EditOp::Delete { old: o, .. } => {
                for i in o.clone() {
                    rows.push(FormattedRow::new(
                        Side::deleted(base.old_line(i), old[i].as_ref()),
                        Side::blank(),
                    ));
                }
            }
            EditOp::Insert { new: n, .. } => {
                for j in n.clone() {
                    rows.push(FormattedRow::new(
                        Side::blank(),
                        Side::added(base.new_line(j), new[j].as_ref()),
                    ));
                }
            }
            EditOp::Change { old: o, new: n } => {
                for k in 0..o.len().max(n.len()) {
                    let mut left = match o.start + k {
                        i if i < o.end => Side::deleted(base.old_line(i), old[i].as_ref()),
                        _ => Side::blank(),
                    };
                    let mut right = match n.start + k {
                        j if j < n.end => Side::added(base.new_line(j), new[j].as_ref()),
                        _ => Side::blank(),
                    };
                    if self.options.word_level && !left.is_blank() && !right.is_blank() {
                        let (old_hl, new_hl) = word_highlights(&left.text, &right.text);
                        left.highlights = old_hl;
                        right.highlights = new_hl;
                    }
                    rows.push(FormattedRow::new(left, right));
                }
            }
        }
    }
}
