//! Turning a failed match into a human-readable location.
//!
//! A failed match still knows how far it got: `direct_end` is where the
//! committed match stopped and `greedy_end` is the farthest any alternative
//! examined. The farthest attempt is usually the best guess at where the input
//! went wrong.

use std::fmt;

use ropey::Rope;

use crate::record::Record;

/// A position in a text, as line and column.
///
/// Both `line` and `column` are 0-indexed and count characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Create a position at the start of the text.
    pub fn zero() -> Self {
        Self { line: 0, column: 0 }
    }

    /// The line/column of character index `char_idx` in `rope`.
    ///
    /// Indices past the end are clamped to the end of the text.
    pub fn of_char(rope: &Rope, char_idx: usize) -> Self {
        let idx = char_idx.min(rope.len_chars());
        let line = rope.char_to_line(idx);
        Self::new(line, idx - rope.line_to_char(line))
    }
}

impl fmt::Display for Position {
    /// 1-based, as editors and compilers print them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Where a match attempt stopped and how far it looked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// End of the committed match.
    pub stopped: Position,
    /// Farthest position examined by any sub-attempt.
    pub reached: Position,
    /// The character at the farthest attempt, `None` at end of input.
    pub found: Option<char>,
    /// Character index of the farthest examined character.
    pub reached_at: usize,
}

impl Diagnostic {
    /// Locate `record` within `rope`.
    ///
    /// An attempt that got past `direct_end` ends one past the character it
    /// examined last, so that character is the one reported.
    pub fn from_record(record: &Record, rope: &Rope) -> Self {
        let examined = if record.greedy_end > record.direct_end {
            record.greedy_end - 1
        } else {
            record.direct_end
        };
        Self {
            stopped: Position::of_char(rope, record.direct_end),
            reached: Position::of_char(rope, examined),
            found: rope.get_char(examined),
            reached_at: examined,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no match: stopped at {}, reached {}", self.stopped, self.reached)?;
        match self.found {
            Some(ch) => write!(f, " (found {ch:?})"),
            None => write!(f, " (found end of input)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::*;
    use crate::search::match_whole;

    #[test]
    fn position_of_char_counts_lines() {
        let rope = Rope::from_str("ab\ncd\n");
        assert_eq!(Position::of_char(&rope, 0), Position::zero());
        assert_eq!(Position::of_char(&rope, 4), Position::new(1, 1));
        assert_eq!(Position::of_char(&rope, 6), Position::new(2, 0));
        assert_eq!(Position::of_char(&rope, 99), Position::new(2, 0));
    }

    #[test]
    fn position_displays_one_based() {
        assert_eq!(Position::new(0, 4).to_string(), "1:5");
    }

    #[test]
    fn diagnostic_points_at_offending_char() {
        // words separated by single spaces; the '!' breaks it
        let word = one_or_more(range('a', 'z'));
        let line = concat([word.clone(), kleene(concat([one(' '), word]))]);
        let rope = Rope::from_str("abc de!f");
        let result = match_whole(&*line, &rope);
        assert!(!result.success);

        let diag = Diagnostic::from_record(&result.record, &rope);
        assert_eq!(diag.stopped, Position::new(0, 6));
        assert_eq!(diag.reached, Position::new(0, 6));
        assert_eq!(diag.found, Some('!'));
        assert_eq!(
            diag.to_string(),
            "no match: stopped at 1:7, reached 1:7 (found '!')"
        );
    }

    #[test]
    fn diagnostic_at_end_of_input() {
        let p = text("abc");
        let rope = Rope::from_str("ab");
        let result = match_whole(&*p, &rope);
        let diag = Diagnostic::from_record(&result.record, &rope);
        assert_eq!(diag.found, None);
        assert_eq!(diag.reached, Position::new(0, 2));
        assert!(diag.to_string().ends_with("(found end of input)"));
    }

    #[test]
    fn diagnostic_across_lines() {
        let p = kleene(choice([range('a', 'z'), one('\n')]));
        let rope = Rope::from_str("ab\ncD");
        let result = match_whole(&*p, &rope);
        let diag = Diagnostic::from_record(&result.record, &rope);
        assert_eq!(diag.stopped, Position::new(1, 1));
        assert_eq!(diag.found, Some('D'));
    }
}
