use serde::{Deserialize, Serialize};

/// Line-number cursor for one diff session.
///
/// `x` and `y` count the old and new lines consumed so far. A formatter call
/// numbers its rows from this position and advances it by the full length of
/// both sequences, elided lines included. Share one counter across calls for
/// continuous numbering, or reset it between fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineCounter {
    pub x: usize,
    pub y: usize,
}

impl LineCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 1-based display number of the old line at `index`.
    pub fn old_line(&self, index: usize) -> usize {
        self.x + index + 1
    }

    /// 1-based display number of the new line at `index`.
    pub fn new_line(&self, index: usize) -> usize {
        self.y + index + 1
    }

    pub fn advance(&mut self, old_lines: usize, new_lines: usize) {
        self.x += old_lines;
        self.y += new_lines;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_one_based_and_offset() {
        let mut counter = LineCounter::new();
        assert_eq!(counter.old_line(0), 1);
        counter.advance(3, 5);
        assert_eq!(counter.old_line(0), 4);
        assert_eq!(counter.new_line(2), 8);
        counter.reset();
        assert_eq!(counter, LineCounter { x: 0, y: 0 });
    }
}
