//! Sequence differ: line-by-line alignment of two revisions.
//!
//! Uses the `similar` crate to align the two sequences and normalizes its
//! output into an [`EditScript`] of maximal copy/delete/insert runs.

use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use similar::algorithms::{diff_slices, DiffHook};
use tracing::{debug, trace};

use crate::error::DiffError;
use crate::script::{EditOp, EditScript, ScriptBuilder};

/// Alignment algorithm used by the [`SequenceDiffer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Myers' O(ND) difference algorithm.
    #[default]
    Myers,
    /// Patience diff, anchored on lines unique to both sides.
    Patience,
    /// Classic dynamic-programming longest common subsequence.
    Lcs,
}

impl Algorithm {
    pub const fn as_similar(self) -> similar::Algorithm {
        match self {
            Algorithm::Myers => similar::Algorithm::Myers,
            Algorithm::Patience => similar::Algorithm::Patience,
            Algorithm::Lcs => similar::Algorithm::Lcs,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Myers => "myers",
            Algorithm::Patience => "patience",
            Algorithm::Lcs => "lcs",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "myers" => Ok(Algorithm::Myers),
            "patience" => Ok(Algorithm::Patience),
            "lcs" => Ok(Algorithm::Lcs),
            _ => Err(DiffError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Computes edit scripts between two sequences.
///
/// Lines are compared by exact equality. The common prefix and suffix of the
/// two sequences are always matched first, so when several alignments are
/// equally short the earliest lines are paired. The differ never emits
/// [`EditOp::Change`]; see [`EditScript::merge_changes`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SequenceDiffer {
    algorithm: Algorithm,
}

impl SequenceDiffer {
    pub fn new(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Compute the edit script turning `old` into `new`.
    pub fn diff<T: Eq + Hash + Ord>(&self, old: &[T], new: &[T]) -> EditScript {
        let (old_len, new_len) = (old.len(), new.len());
        let mut builder = ScriptBuilder::default();

        if old.is_empty() || new.is_empty() || old == new {
            builder.push_copy(0..old_len.min(new_len), 0..old_len.min(new_len));
            if old_len > new_len {
                builder.push_delete(0..old_len, 0);
            } else if new_len > old_len {
                builder.push_insert(0, 0..new_len);
            }
        } else if let Err(never) =
            diff_slices(self.algorithm.as_similar(), &mut builder, old, new)
        {
            match never {}
        }

        let script = builder.finish(old_len, new_len);
        debug!(
            algorithm = %self.algorithm,
            old_len,
            new_len,
            ops = script.len(),
            additions = script.additions(),
            deletions = script.deletions(),
            "computed edit script"
        );
        script
    }
}

impl DiffHook for ScriptBuilder {
    type Error = Infallible;

    fn equal(&mut self, old_index: usize, new_index: usize, len: usize) -> Result<(), Infallible> {
        trace!(old_index, new_index, len, "equal run");
        self.push_copy(old_index..old_index + len, new_index..new_index + len);
        Ok(())
    }

    fn delete(
        &mut self,
        old_index: usize,
        old_len: usize,
        new_index: usize,
    ) -> Result<(), Infallible> {
        trace!(old_index, old_len, new_index, "delete run");
        self.push_delete(old_index..old_index + old_len, new_index);
        Ok(())
    }

    fn insert(
        &mut self,
        old_index: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Infallible> {
        trace!(old_index, new_index, new_len, "insert run");
        self.push_insert(old_index, new_index..new_index + new_len);
        Ok(())
    }
}

/// Diff two line sequences with the default algorithm.
pub fn diff_lines<S: AsRef<str>>(old: &[S], new: &[S]) -> EditScript {
    let old: Vec<&str> = old.iter().map(AsRef::as_ref).collect();
    let new: Vec<&str> = new.iter().map(AsRef::as_ref).collect();
    SequenceDiffer::default().diff(&old, &new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    fn kinds(script: &EditScript) -> Vec<crate::EditKind> {
        script.ops().iter().map(EditOp::kind).collect()
    }

    #[test]
    fn both_empty_is_empty_script() {
        let script = diff_lines::<&str>(&[], &[]);
        assert!(script.is_empty());
        assert!(script.is_identity());
    }

    #[test]
    fn empty_old_is_single_insert() {
        let script = diff_lines(&[], &["Revision 1", "more"]);
        assert_eq!(script.ops(), &[EditOp::Insert { old_index: 0, new: 0..2 }]);
    }

    #[test]
    fn empty_new_is_single_delete() {
        let script = diff_lines(&["a", "b", "c"], &[]);
        assert_eq!(script.ops(), &[EditOp::Delete { old: 0..3, new_index: 0 }]);
    }

    #[test]
    fn identical_is_single_copy() {
        let lines = ["line", "another", "line"];
        let script = diff_lines(&lines, &lines);
        assert_eq!(script.ops(), &[EditOp::Copy { old: 0..3, new: 0..3 }]);
    }

    #[test]
    fn empty_string_line_is_a_line() {
        let script = diff_lines(&[""], &["Revision 1"]);
        assert_eq!(
            script.merge_changes().ops(),
            &[EditOp::Change { old: 0..1, new: 0..1 }]
        );
    }

    #[test]
    fn single_line_change() {
        let script = diff_lines(&["Revision 1"], &["Revision 2"]);
        assert_eq!(script.additions(), 1);
        assert_eq!(script.deletions(), 1);
        assert!(!script.ops().iter().any(|op| op.kind() == crate::EditKind::Change));
        assert_eq!(
            script.merge_changes().ops(),
            &[EditOp::Change { old: 0..1, new: 0..1 }]
        );
    }

    #[test]
    fn middle_line_change_keeps_context() {
        let script = diff_lines(&["a", "b", "c"], &["a", "x", "c"]);
        assert_eq!(
            script.merge_changes().ops(),
            &[
                EditOp::Copy { old: 0..1, new: 0..1 },
                EditOp::Change { old: 1..2, new: 1..2 },
                EditOp::Copy { old: 2..3, new: 2..3 },
            ]
        );
    }

    #[test]
    fn appended_duplicate_binds_to_earliest_line() {
        let script = diff_lines(&["a"], &["a", "a"]);
        assert_eq!(
            script.ops(),
            &[
                EditOp::Copy { old: 0..1, new: 0..1 },
                EditOp::Insert { old_index: 1, new: 1..2 },
            ]
        );
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let script = diff_lines(&["Title"], &["title"]);
        assert!(script.has_changes());
    }

    #[test]
    fn pure_insertion_in_the_middle() {
        let script = diff_lines(&["a", "c"], &["a", "b", "c"]);
        assert_eq!(
            script.ops(),
            &[
                EditOp::Copy { old: 0..1, new: 0..1 },
                EditOp::Insert { old_index: 1, new: 1..2 },
                EditOp::Copy { old: 1..2, new: 2..3 },
            ]
        );
    }

    #[test]
    fn every_algorithm_handles_a_block_move() {
        let old = ["fn a()", "{", "}", "fn b()", "{", "}"];
        let new = ["fn b()", "{", "}", "fn a()", "{", "}"];
        for algorithm in [Algorithm::Myers, Algorithm::Patience, Algorithm::Lcs] {
            let script = SequenceDiffer::new(algorithm).diff(&old, &new);
            assert_eq!(script.old_side(&old), old.iter().collect::<Vec<_>>());
            assert_eq!(script.new_side(&new), new.iter().collect::<Vec<_>>());
            assert!(script.has_changes(), "{algorithm} found no changes");
        }
    }

    #[test]
    fn algorithm_parses_case_insensitively() {
        assert_eq!("Patience".parse::<Algorithm>().unwrap(), Algorithm::Patience);
        assert_eq!("lcs".parse::<Algorithm>().unwrap(), Algorithm::Lcs);
        assert!(matches!(
            "histogram".parse::<Algorithm>(),
            Err(DiffError::UnknownAlgorithm(name)) if name == "histogram"
        ));
        assert_eq!(Algorithm::Myers.to_string(), "myers");
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn captured_logs(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn every_path_logs_a_summary() {
        let logs = captured_logs(|| {
            diff_lines(&["same"], &["same"]);
            diff_lines::<&str>(&[], &["added"]);
            diff_lines(&["a"], &["b"]);
        });
        assert_eq!(logs.matches("computed edit script").count(), 3);
        assert!(logs.contains("new_len=1"));
    }

    fn lines() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[abc]{0,1}", 0..16)
    }

    proptest! {
        #[test]
        fn sides_reconstruct_inputs(old in lines(), new in lines()) {
            for algorithm in [Algorithm::Myers, Algorithm::Patience, Algorithm::Lcs] {
                let script = SequenceDiffer::new(algorithm).diff(&old, &new);
                prop_assert_eq!(script.old_side(&old), old.iter().collect::<Vec<_>>());
                prop_assert_eq!(script.new_side(&new), new.iter().collect::<Vec<_>>());

                let merged = script.merge_changes();
                prop_assert_eq!(merged.old_side(&old), old.iter().collect::<Vec<_>>());
                prop_assert_eq!(merged.new_side(&new), new.iter().collect::<Vec<_>>());
            }
        }

        #[test]
        fn self_diff_is_one_copy(seq in lines()) {
            let script = SequenceDiffer::default().diff(&seq, &seq);
            prop_assert!(script.is_identity());
            prop_assert!(script.len() <= 1);
        }

        #[test]
        fn emptiness_is_symmetric(seq in prop::collection::vec("[abc]", 1..8)) {
            let empty: Vec<String> = Vec::new();
            let differ = SequenceDiffer::default();
            prop_assert_eq!(kinds(&differ.diff(&empty, &seq)), vec![crate::EditKind::Insert]);
            prop_assert_eq!(kinds(&differ.diff(&seq, &empty)), vec![crate::EditKind::Delete]);
        }

        #[test]
        fn diff_is_deterministic(old in lines(), new in lines()) {
            let differ = SequenceDiffer::default();
            prop_assert_eq!(differ.diff(&old, &new), differ.diff(&old, &new));
        }

        #[test]
        fn runs_are_maximal(old in lines(), new in lines()) {
            let script = SequenceDiffer::default().diff(&old, &new);
            for pair in script.ops().windows(2) {
                prop_assert_ne!(pair[0].kind(), pair[1].kind());
            }
        }
    }
}
