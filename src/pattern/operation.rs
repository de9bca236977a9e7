use super::{Pattern, PatternRef};
use crate::input::{Input, Symbol};
use crate::record::{MatchResult, Reach, Record, RecordKind};

/// Conditional pair: match `first`, then check `second` against the span
/// `first` consumed.
///
/// `second` "covers" when it matches from the same start and ends exactly
/// where `first` ended. The pair succeeds when `covered == require`, so
/// `require = true` is a positive span check and `require = false` a negative
/// one. A failing `first` is returned as-is.
#[derive(Debug, Clone)]
pub struct Operation<C: Symbol> {
    first: PatternRef<C>,
    second: PatternRef<C>,
    require: bool,
}

impl<C: Symbol> Operation<C> {
    pub fn new(first: PatternRef<C>, second: PatternRef<C>, require: bool) -> Self {
        Self {
            first,
            second,
            require,
        }
    }
}

impl<C: Symbol> Pattern<C> for Operation<C> {
    fn match_at(&self, input: &dyn Input<C>, begin: usize, end: usize) -> MatchResult {
        let first = self.first.match_at(input, begin, end);
        if !first.success {
            return first;
        }
        let span_end = first.record.direct_end;
        let second = self.second.match_at(input, begin, span_end);
        let covered = second.success && second.record.direct_end == span_end;

        let mut reach = Reach::new(begin);
        reach.absorb(&first.record);
        reach.absorb(&second.record);
        let kind = RecordKind::Binary(Box::new([first.record, second.record]));
        MatchResult::new(
            covered == self.require,
            Record::composite(begin, span_end, reach, kind),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::build::*;
    use crate::pattern::PatternRef;
    use crate::record::MatchResult;

    fn run(p: &PatternRef<char>, s: &str) -> MatchResult {
        let input: Vec<char> = s.chars().collect();
        p.match_at(&input, 0, input.len())
    }

    fn word() -> PatternRef<char> {
        one_or_more(range('a', 'z'))
    }

    #[test]
    fn when_requires_second_to_cover_first() {
        let p = when(word(), text("let"));
        assert!(run(&p, "let").success);
        assert!(!run(&p, "letter").success);
        assert!(!run(&p, "var").success);
    }

    #[test]
    fn unless_rejects_covered_span() {
        let p = unless(word(), text("let"));
        assert!(!run(&p, "let").success);
        let result = run(&p, "letter");
        assert!(result.success);
        assert_eq!(result.record.direct_end, 6);
    }

    #[test]
    fn second_is_bounded_by_first() {
        // "ab" alone cannot see the 'c' that follows it
        let p = when(text("ab"), text("abc"));
        let result = run(&p, "abc");
        assert!(!result.success);
        assert!(result.record.greedy_end <= 2);
    }

    #[test]
    fn record_holds_both_halves() {
        let p = when(word(), word());
        let result = run(&p, "abc");
        let [first, second] = result.record.as_binary().unwrap();
        assert_eq!(first.span_range(), 0..3);
        assert_eq!(second.span_range(), 0..3);
    }

    #[test]
    fn failing_first_is_returned_directly() {
        let p = unless(text("ab"), text("a"));
        let result = run(&p, "xb");
        assert!(!result.success);
        assert!(result.record.as_binary().is_none());
        assert!(result.record.as_all().is_some());
    }
}
