//! Scanning helpers built on [`Pattern::match_at`].
//!
//! All positions are character indices into the input. A pattern may match
//! zero-width at the end of the input, so the candidate starts run over
//! `0..=len`.

use crate::input::{Input, Symbol};
use crate::pattern::Pattern;
use crate::record::{MatchResult, Record};

/// A successful match found by a scan.
#[derive(Debug, Clone, PartialEq)]
pub struct Found {
    /// Where the match starts.
    pub start: usize,
    /// The match record; its span is `start..record.direct_end`.
    pub record: Record,
}

impl Found {
    pub fn end(&self) -> usize {
        self.record.direct_end
    }
}

/// Match anchored at `pos`, free to run to the end of the input.
pub fn match_prefix<C: Symbol>(
    pattern: &dyn Pattern<C>,
    input: &dyn Input<C>,
    pos: usize,
) -> MatchResult {
    pattern.match_at(input, pos, input.len())
}

/// Match the whole input: the pattern must succeed and consume everything.
///
/// The record is returned unchanged either way, so a failure still carries the
/// diagnostic reach.
pub fn match_whole<C: Symbol>(pattern: &dyn Pattern<C>, input: &dyn Input<C>) -> MatchResult {
    let len = input.len();
    let result = pattern.match_at(input, 0, len);
    let success = result.success && result.record.direct_end == len;
    MatchResult::new(success, result.record)
}

/// Find the leftmost match starting at or after `start`.
pub fn find_forward<C: Symbol>(
    pattern: &dyn Pattern<C>,
    input: &dyn Input<C>,
    start: usize,
) -> Option<Found> {
    let len = input.len();
    let found = (start..=len).find_map(|pos| attempt(pattern, input, pos, len));
    log::debug!(
        "find_forward from {start}: {:?}",
        found.as_ref().map(|f| f.start..f.end())
    );
    found
}

/// Find the rightmost match starting at or before `start`.
pub fn find_backward<C: Symbol>(
    pattern: &dyn Pattern<C>,
    input: &dyn Input<C>,
    start: usize,
) -> Option<Found> {
    let len = input.len();
    let upper = start.min(len);
    let found = (0..=upper).rev().find_map(|pos| attempt(pattern, input, pos, len));
    log::debug!(
        "find_backward from {start}: {:?}",
        found.as_ref().map(|f| f.start..f.end())
    );
    found
}

/// Successive non-overlapping matches, left to right.
///
/// After a zero-width match the scan moves on by one character.
pub fn find_iter<'a, C: Symbol>(
    pattern: &'a dyn Pattern<C>,
    input: &'a dyn Input<C>,
) -> FindIter<'a, C> {
    FindIter {
        pattern,
        input,
        pos: 0,
    }
}

pub struct FindIter<'a, C: Symbol> {
    pattern: &'a dyn Pattern<C>,
    input: &'a dyn Input<C>,
    pos: usize,
}

impl<C: Symbol> Iterator for FindIter<'_, C> {
    type Item = Found;

    fn next(&mut self) -> Option<Found> {
        let len = self.input.len();
        if self.pos > len {
            return None;
        }
        let found = find_forward(self.pattern, self.input, self.pos);
        self.pos = match &found {
            Some(f) if f.end() > f.start => f.end(),
            Some(f) => f.start + 1,
            None => len + 1,
        };
        found
    }
}

fn attempt<C: Symbol>(
    pattern: &dyn Pattern<C>,
    input: &dyn Input<C>,
    pos: usize,
    len: usize,
) -> Option<Found> {
    let result = pattern.match_at(input, pos, len);
    result.success.then(|| Found {
        start: pos,
        record: result.record,
    })
}
