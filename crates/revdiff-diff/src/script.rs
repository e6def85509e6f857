//! Edit scripts: ordered copy/delete/insert/change operations that turn one
//! sequence into another.
//!
//! Every operation carries half-open index ranges into both sequences. Delete
//! and insert operations carry an empty range on the side they do not touch,
//! anchored at the position where the edit happens. Consecutive operations
//! partition both sequences with no gaps, overlaps, or reordering.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::DiffError;

/// The kind of an [`EditOp`], without its ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    Copy,
    Delete,
    Insert,
    Change,
}

/// A single operation of an [`EditScript`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    /// Lines present on both sides.
    Copy { old: Range<usize>, new: Range<usize> },
    /// Lines present only in the old sequence, removed before `new_index`.
    Delete { old: Range<usize>, new_index: usize },
    /// Lines present only in the new sequence, inserted before `old_index`.
    Insert { old_index: usize, new: Range<usize> },
    /// Old lines replaced by new lines.
    Change { old: Range<usize>, new: Range<usize> },
}

impl EditOp {
    pub fn kind(&self) -> EditKind {
        match self {
            EditOp::Copy { .. } => EditKind::Copy,
            EditOp::Delete { .. } => EditKind::Delete,
            EditOp::Insert { .. } => EditKind::Insert,
            EditOp::Change { .. } => EditKind::Change,
        }
    }

    /// The span of the old sequence covered by this operation.
    pub fn old_range(&self) -> Range<usize> {
        match self {
            EditOp::Copy { old, .. } | EditOp::Delete { old, .. } | EditOp::Change { old, .. } => {
                old.clone()
            }
            EditOp::Insert { old_index, .. } => *old_index..*old_index,
        }
    }

    /// The span of the new sequence covered by this operation.
    pub fn new_range(&self) -> Range<usize> {
        match self {
            EditOp::Copy { new, .. } | EditOp::Insert { new, .. } | EditOp::Change { new, .. } => {
                new.clone()
            }
            EditOp::Delete { new_index, .. } => *new_index..*new_index,
        }
    }

    /// Returns `true` for anything other than a copy.
    pub fn is_edit(&self) -> bool {
        !matches!(self, EditOp::Copy { .. })
    }
}

/// The ordered list of operations transforming an old sequence into a new one.
///
/// Deserialized scripts are checked the same way as [`EditScript::new`] and
/// rejected if they do not partition both sequences.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScript")]
pub struct EditScript {
    ops: Vec<EditOp>,
    old_len: usize,
    new_len: usize,
}

#[derive(Deserialize)]
struct RawScript {
    ops: Vec<EditOp>,
    old_len: usize,
    new_len: usize,
}

impl TryFrom<RawScript> for EditScript {
    type Error = DiffError;

    fn try_from(raw: RawScript) -> Result<Self, DiffError> {
        check_partition(&raw.ops, raw.old_len, raw.new_len)?;
        Ok(Self {
            ops: raw.ops,
            old_len: raw.old_len,
            new_len: raw.new_len,
        })
    }
}

fn check_partition(ops: &[EditOp], old_len: usize, new_len: usize) -> Result<(), DiffError> {
    let (mut x, mut y) = (0, 0);
    for op in ops {
        let (old, new) = (op.old_range(), op.new_range());
        if old.start != x || new.start != y || old.start > old.end || new.start > new.end {
            return Err(DiffError::InvalidScript(format!(
                "edit op {op:?} does not continue at old {x}, new {y}"
            )));
        }
        if matches!(op, EditOp::Copy { .. }) && old.len() != new.len() {
            return Err(DiffError::InvalidScript(format!(
                "copy {op:?} spans unequal ranges"
            )));
        }
        x = old.end;
        y = new.end;
    }
    if x != old_len || y != new_len {
        return Err(DiffError::InvalidScript(format!(
            "edit script ends at old {x}, new {y}; expected {old_len}, {new_len}"
        )));
    }
    Ok(())
}

impl EditScript {
    /// Build a script from raw operations.
    ///
    /// # Panics
    ///
    /// Panics if the operations do not partition `0..old_len` and `0..new_len`
    /// in order, or if a copy spans ranges of different lengths.
    pub fn new(ops: Vec<EditOp>, old_len: usize, new_len: usize) -> Self {
        if let Err(err) = check_partition(&ops, old_len, new_len) {
            panic!("{err}");
        }
        Self {
            ops,
            old_len,
            new_len,
        }
    }

    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<EditOp> {
        self.ops
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if there are no operations (both sequences empty).
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Length of the old sequence.
    pub fn old_len(&self) -> usize {
        self.old_len
    }

    /// Length of the new sequence.
    pub fn new_len(&self) -> usize {
        self.new_len
    }

    /// Returns `true` if the two sequences are identical.
    pub fn is_identity(&self) -> bool {
        !self.has_changes()
    }

    /// Returns `true` if at least one line was inserted, deleted, or changed.
    pub fn has_changes(&self) -> bool {
        self.ops.iter().any(EditOp::is_edit)
    }

    /// Total number of lines added (inserted or changed-to).
    pub fn additions(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| op.is_edit())
            .map(|op| op.new_range().len())
            .sum()
    }

    /// Total number of lines removed (deleted or changed-from).
    pub fn deletions(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| op.is_edit())
            .map(|op| op.old_range().len())
            .sum()
    }

    /// Concatenate the old-side spans of every operation.
    ///
    /// For a script produced from `old`, this yields every element of `old`
    /// in order.
    pub fn old_side<'a, T>(&self, old: &'a [T]) -> Vec<&'a T> {
        self.ops.iter().flat_map(|op| &old[op.old_range()]).collect()
    }

    /// Concatenate the new-side spans of every operation.
    pub fn new_side<'a, T>(&self, new: &'a [T]) -> Vec<&'a T> {
        self.ops.iter().flat_map(|op| &new[op.new_range()]).collect()
    }

    /// Fold every maximal run of non-copy operations into one operation.
    ///
    /// A run touching both sides becomes a [`EditOp::Change`]; a run touching
    /// only one side stays a delete or an insert.
    pub fn merge_changes(&self) -> EditScript {
        let mut ops = Vec::with_capacity(self.ops.len());
        let mut run: Option<(Range<usize>, Range<usize>)> = None;

        for op in &self.ops {
            if op.is_edit() {
                let (old, new) = (op.old_range(), op.new_range());
                run = Some(match run.take() {
                    Some((o, n)) => (o.start..old.end, n.start..new.end),
                    None => (old, new),
                });
            } else {
                if let Some((old, new)) = run.take() {
                    ops.push(fold_run(old, new));
                }
                ops.push(op.clone());
            }
        }
        if let Some((old, new)) = run {
            ops.push(fold_run(old, new));
        }

        EditScript {
            ops,
            old_len: self.old_len,
            new_len: self.new_len,
        }
    }

    /// Split every change into a delete followed by an insert.
    pub fn split_changes(&self) -> EditScript {
        let mut ops = Vec::with_capacity(self.ops.len());
        for op in &self.ops {
            match op {
                EditOp::Change { old, new } => {
                    ops.push(EditOp::Delete {
                        old: old.clone(),
                        new_index: new.start,
                    });
                    ops.push(EditOp::Insert {
                        old_index: old.end,
                        new: new.clone(),
                    });
                }
                other => ops.push(other.clone()),
            }
        }

        EditScript {
            ops,
            old_len: self.old_len,
            new_len: self.new_len,
        }
    }
}

fn fold_run(old: Range<usize>, new: Range<usize>) -> EditOp {
    match (old.is_empty(), new.is_empty()) {
        (false, false) => EditOp::Change { old, new },
        (false, true) => EditOp::Delete {
            new_index: new.start,
            old,
        },
        _ => EditOp::Insert {
            old_index: old.start,
            new,
        },
    }
}

/// Accumulates operations, coalescing adjacent operations of the same kind
/// into maximal runs and dropping empty ones.
#[derive(Debug, Default)]
pub(crate) struct ScriptBuilder {
    ops: Vec<EditOp>,
}

impl ScriptBuilder {
    pub(crate) fn push_copy(&mut self, old: Range<usize>, new: Range<usize>) {
        if old.is_empty() {
            return;
        }
        if let Some(EditOp::Copy { old: o, new: n }) = self.ops.last_mut() {
            if o.end == old.start && n.end == new.start {
                o.end = old.end;
                n.end = new.end;
                return;
            }
        }
        self.ops.push(EditOp::Copy { old, new });
    }

    pub(crate) fn push_delete(&mut self, old: Range<usize>, new_index: usize) {
        if old.is_empty() {
            return;
        }
        if let Some(EditOp::Delete { old: o, .. }) = self.ops.last_mut() {
            if o.end == old.start {
                o.end = old.end;
                return;
            }
        }
        self.ops.push(EditOp::Delete { old, new_index });
    }

    pub(crate) fn push_insert(&mut self, old_index: usize, new: Range<usize>) {
        if new.is_empty() {
            return;
        }
        if let Some(EditOp::Insert { new: n, .. }) = self.ops.last_mut() {
            if n.end == new.start {
                n.end = new.end;
                return;
            }
        }
        self.ops.push(EditOp::Insert { old_index, new });
    }

    pub(crate) fn finish(self, old_len: usize, new_len: usize) -> EditScript {
        EditScript::new(self.ops, old_len, new_len)
    }
}
