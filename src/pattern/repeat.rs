use super::{Pattern, PatternRef};
use crate::input::{Input, Symbol};
use crate::record::{MatchResult, Reach, Record, RecordKind};

/// Repetition, taken greedily and never given back.
///
/// Plain Kleene repetition has no bounds. [`Kleene::bounded`] stops after
/// `max` repetitions and fails short of `min`. Repetition also stops at the
/// first attempt that fails or makes no progress, so an inner pattern that
/// can match empty cannot loop forever; a zero-width success counts as
/// meeting whatever minimum is left.
///
/// A failure short of `min` reports the failing attempt's `direct_end`, the
/// way a concatenation does.
#[derive(Debug, Clone)]
pub struct Kleene<C: Symbol> {
    inner: PatternRef<C>,
    min: usize,
    max: Option<usize>,
}

impl<C: Symbol> Kleene<C> {
    pub fn new(inner: PatternRef<C>) -> Self {
        Self::bounded(inner, 0, None)
    }

    /// Between `min` and `max` repetitions; a `max` below `min` is raised to
    /// `min`.
    pub fn bounded(inner: PatternRef<C>, min: usize, max: Option<usize>) -> Self {
        Self {
            inner,
            min,
            max: max.map(|m| m.max(min)),
        }
    }
}

impl<C: Symbol> Pattern<C> for Kleene<C> {
    fn match_at(&self, input: &dyn Input<C>, begin: usize, end: usize) -> MatchResult {
        let mut reach = Reach::new(begin);
        let mut cursor = begin;
        let mut repetitions = Vec::new();
        let mut satisfied = self.min == 0;
        let mut stop = cursor;
        while self.max.is_none_or(|max| repetitions.len() < max) {
            let result = self.inner.match_at(input, cursor, end);
            reach.absorb(&result.record);
            if !result.success {
                stop = result.record.direct_end;
                break;
            }
            if result.record.direct_end <= cursor {
                satisfied = true;
                break;
            }
            cursor = result.record.direct_end;
            repetitions.push(result.record);
            satisfied = repetitions.len() >= self.min;
        }
        let direct_end = if satisfied { cursor } else { stop.max(cursor) };
        MatchResult::new(
            satisfied,
            Record::composite(begin, direct_end, reach, RecordKind::Repeat(repetitions)),
        )
    }
}
