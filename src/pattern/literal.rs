//! Single-character matchers.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use super::Pattern;
use crate::input::{Input, Symbol};
use crate::record::{MatchResult, Record};

/// Matches zero-width anywhere, including at end of input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

impl<C: Symbol> Pattern<C> for Empty {
    fn match_at(&self, _input: &dyn Input<C>, begin: usize, _end: usize) -> MatchResult {
        MatchResult::matched(Record::empty(begin))
    }
}

/// An arbitrary labelled predicate over one character.
#[derive(Clone)]
pub struct Predicate<C> {
    pub label: Cow<'static, str>,
    pub test: Arc<dyn Fn(C) -> bool + Send + Sync>,
}

impl<C> fmt::Debug for Predicate<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({})", self.label)
    }
}

/// A test applied to one character.
#[derive(Debug, Clone)]
pub enum CharTest<C> {
    Equals(C),
    /// Inclusive on both ends.
    Range(C, C),
    Set(Vec<C>),
    Predicate(Predicate<C>),
    /// Passes when any sub-test passes.
    Any(Vec<CharTest<C>>),
    /// Passes when every sub-test passes.
    All(Vec<CharTest<C>>),
    /// Nested exclusion: `[a, b, c]` reads "a but not (b but not c)".
    ///
    /// Folded right to left (`acc = t(ch) && !acc`, starting from `false`),
    /// then XORed with `negate`. A single test with `negate` set is plain
    /// negation.
    Signed { tests: Vec<CharTest<C>>, negate: bool },
}

impl<C: Symbol> CharTest<C> {
    pub fn test(&self, ch: C) -> bool {
        match self {
            CharTest::Equals(c) => *c == ch,
            CharTest::Range(lo, hi) => *lo <= ch && ch <= *hi,
            CharTest::Set(set) => set.contains(&ch),
            CharTest::Predicate(p) => (p.test)(ch),
            CharTest::Any(tests) => tests.iter().any(|t| t.test(ch)),
            CharTest::All(tests) => tests.iter().all(|t| t.test(ch)),
            CharTest::Signed { tests, negate } => {
                let folded = tests.iter().rev().fold(false, |acc, t| t.test(ch) && !acc);
                folded ^ *negate
            }
        }
    }

    /// The complement of this test.
    pub fn negated(self) -> Self {
        CharTest::Signed {
            tests: vec![self],
            negate: true,
        }
    }
}

/// Matches exactly one character that passes a [`CharTest`].
///
/// A failed literal still reports the position one past `begin` (when there
/// is input left), so callers can see how far the cursor could have gone.
#[derive(Debug, Clone)]
pub struct Literal<C> {
    test: CharTest<C>,
}

impl<C: Symbol> Literal<C> {
    pub fn new(test: CharTest<C>) -> Self {
        Self { test }
    }

    pub fn test(&self) -> &CharTest<C> {
        &self.test
    }
}

impl<C: Symbol> Pattern<C> for Literal<C> {
    fn match_at(&self, input: &dyn Input<C>, begin: usize, end: usize) -> MatchResult {
        let ch = if begin < end { input.char_at(begin) } else { None };
        match ch {
            None => MatchResult::failed(Record::empty(begin)),
            Some(ch) => MatchResult::new(self.test.test(ch), Record::span(begin, begin + 1, begin + 1)),
        }
    }
}
