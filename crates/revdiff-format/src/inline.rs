//! Word-level highlighting inside changed lines.

use std::ops::Range;

use similar::{ChangeTag, TextDiff};

/// Byte ranges of the words that differ between `old` and `new`.
///
/// Returns `(old_ranges, new_ranges)`. Adjacent ranges are merged, so a run
/// of changed words and the whitespace between them is one range.
pub fn word_highlights(old: &str, new: &str) -> (Vec<Range<usize>>, Vec<Range<usize>>) {
    let diff = TextDiff::from_words(old, new);
    let (mut old_pos, mut new_pos) = (0, 0);
    let (mut old_ranges, mut new_ranges) = (Vec::new(), Vec::new());

    for change in diff.iter_all_changes() {
        let len = change.value().len();
        match change.tag() {
            ChangeTag::Equal => {
                old_pos += len;
                new_pos += len;
            }
            ChangeTag::Delete => {
                push_range(&mut old_ranges, old_pos..old_pos + len);
                old_pos += len;
            }
            ChangeTag::Insert => {
                push_range(&mut new_ranges, new_pos..new_pos + len);
                new_pos += len;
            }
        }
    }

    (old_ranges, new_ranges)
}

fn push_range(ranges: &mut Vec<Range<usize>>, range: Range<usize>) {
    if range.is_empty() {
        return;
    }
    match ranges.last_mut() {
        Some(last) if last.end == range.start => last.end = range.end,
        _ => ranges.push(range),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlights_only_the_changed_word() {
        let (old, new) = word_highlights("Revision 1", "Revision 2");
        assert_eq!(old, vec![9..10]);
        assert_eq!(new, vec![9..10]);
    }

    #[test]
    fn identical_lines_have_no_highlights() {
        let (old, new) = word_highlights("same text", "same text");
        assert!(old.is_empty());
        assert!(new.is_empty());
    }

    #[test]
    fn insertion_only_highlights_new_side() {
        let (old, new) = word_highlights("", "added");
        assert!(old.is_empty());
        assert_eq!(new, vec![0..5]);
    }

    #[test]
    fn ranges_slice_on_char_boundaries() {
        let (old_line, new_line) = ("grüße an alle", "grüße an niemand");
        let (old, new) = word_highlights(old_line, new_line);
        for range in &old {
            assert!(old_line.get(range.clone()).is_some());
        }
        for range in &new {
            assert!(new_line.get(range.clone()).is_some());
        }
        assert_eq!(&new_line[new[0].clone()], "niemand");
    }
}
