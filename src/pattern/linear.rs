//! Combinators over an ordered list of keyed items.

use super::{Item, Pattern};
use crate::input::{Input, Symbol};
use crate::record::{AllRecord, ChoiceRecord, MatchResult, Reach, Record, RecordKind};

/// Ordered choice: the first alternative that matches wins.
///
/// Alternatives after the winner are never tried. On failure the record
/// holds the last alternative tried's record and `direct_end == begin`.
#[derive(Debug, Clone)]
pub struct Choice<C: Symbol> {
    items: Vec<Item<C>>,
}

impl<C: Symbol> Choice<C> {
    pub fn new(items: Vec<Item<C>>) -> Self {
        Self { items }
    }
}

impl<C: Symbol> Pattern<C> for Choice<C> {
    fn match_at(&self, input: &dyn Input<C>, begin: usize, end: usize) -> MatchResult {
        let mut reach = Reach::new(begin);
        let mut last = None;
        for (index, item) in self.items.iter().enumerate() {
            let result = item.pattern.match_at(input, begin, end);
            reach.absorb(&result.record);
            if result.success {
                let direct_end = result.record.direct_end;
                let kind = RecordKind::Choice(ChoiceRecord {
                    index: Some(index),
                    key: item.key.clone(),
                    child: Some(Box::new(result.record)),
                });
                return MatchResult::matched(Record::composite(begin, direct_end, reach, kind));
            }
            last = Some(result.record);
        }
        let kind = RecordKind::Choice(ChoiceRecord {
            index: None,
            key: None,
            child: last.map(Box::new),
        });
        MatchResult::failed(Record::composite(begin, begin, reach, kind))
    }
}

/// Sequential concatenation: each item starts where the previous one ended.
///
/// Stops at the first failing item. That item's record is still kept and its
/// `direct_end` becomes the sequence's, showing how far the sequence got.
#[derive(Debug, Clone)]
pub struct Concat<C: Symbol> {
    items: Vec<Item<C>>,
}

impl<C: Symbol> Concat<C> {
    pub fn new(items: Vec<Item<C>>) -> Self {
        Self { items }
    }
}

impl<C: Symbol> Pattern<C> for Concat<C> {
    fn match_at(&self, input: &dyn Input<C>, begin: usize, end: usize) -> MatchResult {
        let mut all = AllRecord::new();
        let mut reach = Reach::new(begin);
        let mut cursor = begin;
        let mut success = true;
        for item in &self.items {
            let result = item.pattern.match_at(input, cursor, end);
            reach.absorb(&result.record);
            cursor = result.record.direct_end;
            all.push(item.key.clone(), result.record);
            if !result.success {
                success = false;
                break;
            }
        }
        MatchResult::new(
            success,
            Record::composite(begin, cursor, reach, RecordKind::All(all)),
        )
    }
}

/// Every item must match the same span, all anchored at `begin`.
///
/// The span is set by the first item; the first item to fail or to end
/// elsewhere aborts the scan. With no items this matches zero-width.
#[derive(Debug, Clone)]
pub struct Intersection<C: Symbol> {
    items: Vec<Item<C>>,
}

impl<C: Symbol> Intersection<C> {
    pub fn new(items: Vec<Item<C>>) -> Self {
        Self { items }
    }
}

impl<C: Symbol> Pattern<C> for Intersection<C> {
    fn match_at(&self, input: &dyn Input<C>, begin: usize, end: usize) -> MatchResult {
        let mut all = AllRecord::new();
        let mut reach = Reach::new(begin);
        let mut anchor: Option<usize> = None;
        let mut success = true;
        for item in &self.items {
            let result = item.pattern.match_at(input, begin, end);
            reach.absorb(&result.record);
            let item_end = result.record.direct_end;
            let agrees = result.success && anchor.is_none_or(|a| a == item_end);
            anchor.get_or_insert(item_end);
            all.push(item.key.clone(), result.record);
            if !agrees {
                success = false;
                break;
            }
        }
        let direct_end = anchor.unwrap_or(begin);
        MatchResult::new(
            success,
            Record::composite(begin, direct_end, reach, RecordKind::All(all)),
        )
    }
}

/// Set subtraction over patterns: "the first item, unless a later one
/// reproduces its span".
///
/// Later items are matched from `begin`, bounded by the base's end, and are
/// scanned last to first. An item "vetoes" when it matches exactly the base
/// span and the item after it did not veto (`vetoed = hit && !vetoed`). With
/// `exclude` set the construct succeeds when the fold does not veto; with it
/// cleared, only when it does.
///
/// A failing base is returned as-is. With no items at all the construct fails
/// zero-width.
#[derive(Debug, Clone)]
pub struct Difference<C: Symbol> {
    items: Vec<Item<C>>,
    exclude: bool,
}

impl<C: Symbol> Difference<C> {
    pub fn new(items: Vec<Item<C>>, exclude: bool) -> Self {
        Self { items, exclude }
    }
}

impl<C: Symbol> Pattern<C> for Difference<C> {
    fn match_at(&self, input: &dyn Input<C>, begin: usize, end: usize) -> MatchResult {
        let Some((base, rest)) = self.items.split_first() else {
            return MatchResult::failed(Record::empty(begin));
        };
        let base_result = base.pattern.match_at(input, begin, end);
        if !base_result.success {
            return base_result;
        }
        let span_end = base_result.record.direct_end;
        let mut reach = Reach::new(begin);
        reach.absorb(&base_result.record);

        let mut vetoed = false;
        let mut attempts = Vec::with_capacity(rest.len());
        for item in rest.iter().rev() {
            let result = item.pattern.match_at(input, begin, span_end);
            reach.absorb(&result.record);
            let hit = result.success && result.record.direct_end == span_end;
            vetoed = hit && !vetoed;
            attempts.push((item.key.clone(), result.record));
        }

        let mut all = AllRecord::new();
        all.push(base.key.clone(), base_result.record);
        for (key, record) in attempts.into_iter().rev() {
            all.push(key, record);
        }
        MatchResult::new(
            self.exclude != vetoed,
            Record::composite(begin, span_end, reach, RecordKind::All(all)),
        )
    }
}
