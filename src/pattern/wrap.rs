//! Wrappers that reshape a sub-pattern's record.

use std::fmt;
use std::sync::Arc;

use super::{Pattern, PatternRef};
use crate::input::{Input, Symbol};
use crate::record::{MatchResult, Record};

/// Hides a sub-grammar's structure, keeping only its span.
#[derive(Debug, Clone)]
pub struct Collapse<C: Symbol> {
    inner: PatternRef<C>,
}

impl<C: Symbol> Collapse<C> {
    pub fn new(inner: PatternRef<C>) -> Self {
        Self { inner }
    }
}

impl<C: Symbol> Pattern<C> for Collapse<C> {
    fn match_at(&self, input: &dyn Input<C>, begin: usize, end: usize) -> MatchResult {
        let result = self.inner.match_at(input, begin, end);
        let record = Record::span(begin, result.record.direct_end, result.record.greedy_end);
        MatchResult::new(result.success, record)
    }
}

/// Post-processing applied to a record. The success flag is left alone.
pub type Transform = Arc<dyn Fn(Record) -> Record + Send + Sync>;

/// Runs a base pattern, then rewrites its record.
///
/// The transform is trusted to keep `begin <= direct_end <= greedy_end`.
#[derive(Clone)]
pub struct Custom<C: Symbol> {
    base: PatternRef<C>,
    transform: Transform,
}

impl<C: Symbol> Custom<C> {
    pub fn new(base: PatternRef<C>, transform: Transform) -> Self {
        Self { base, transform }
    }
}

impl<C: Symbol> fmt::Debug for Custom<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom").field("base", &self.base).finish_non_exhaustive()
    }
}

impl<C: Symbol> Pattern<C> for Custom<C> {
    fn match_at(&self, input: &dyn Input<C>, begin: usize, end: usize) -> MatchResult {
        let result = self.base.match_at(input, begin, end);
        MatchResult::new(result.success, (self.transform)(result.record))
    }
}
