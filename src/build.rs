//! Factory functions for assembling pattern trees.
//!
//! Every factory returns a shared [`PatternRef`], so a sub-pattern can be
//! built once and reused under several parents:
//!
//! ```rust
//! use strand::build::*;
//! use strand::keyed;
//!
//! let digits = one_or_more(range('0', '9'));
//! let number = concat([
//!     keyed("sign", optional(one_of("+-".chars()))),
//!     keyed("digits", digits.clone()),
//! ]);
//!
//! let input: Vec<char> = "-123abc".chars().collect();
//! let result = number.match_at(&input, 0, input.len());
//! assert!(result.success);
//! assert_eq!(result.record.direct_end, 4);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::input::Symbol;
use crate::pattern::char_class;
use crate::pattern::{
    CharTest, Choice, Collapse, Concat, Custom, Difference, Empty, Intersection, Item, Kleene,
    Literal, Operation, PatternRef, Placeholder, Predicate,
};
use crate::record::Record;

/// Errors raised while assembling a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    UnknownClass(String),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownClass(name) => write!(
                f,
                "Unknown character class {name:?} (known: {})",
                char_class::names().join(", ")
            ),
        }
    }
}

impl std::error::Error for BuildError {}

fn items<C, I>(items: I) -> Vec<Item<C>>
where
    C: Symbol,
    I: IntoIterator,
    I::Item: Into<Item<C>>,
{
    items.into_iter().map(Into::into).collect()
}

// ─── Leaves ─────────────────────────────────────────────────────────────────

/// Matches zero-width anywhere.
pub fn empty<C: Symbol>() -> PatternRef<C> {
    Arc::new(Empty)
}

/// A single-character matcher from any [`CharTest`].
pub fn literal<C: Symbol>(test: CharTest<C>) -> PatternRef<C> {
    Arc::new(Literal::new(test))
}

/// A single-character matcher from a closure.
pub fn predicate<C, F>(label: &'static str, f: F) -> PatternRef<C>
where
    C: Symbol,
    F: Fn(C) -> bool + Send + Sync + 'static,
{
    literal(predicate_test(label, f))
}

/// The [`CharTest`] behind [`predicate`], for use inside [`any`] and friends.
pub fn predicate_test<C, F>(label: &'static str, f: F) -> CharTest<C>
where
    C: Symbol,
    F: Fn(C) -> bool + Send + Sync + 'static,
{
    CharTest::Predicate(Predicate {
        label: label.into(),
        test: Arc::new(f),
    })
}

/// Exactly the character `c`.
pub fn one<C: Symbol>(c: C) -> PatternRef<C> {
    literal(CharTest::Equals(c))
}

/// Any one of the given characters.
pub fn one_of<C: Symbol>(chars: impl IntoIterator<Item = C>) -> PatternRef<C> {
    literal(CharTest::Set(chars.into_iter().collect()))
}

/// Any character in `lo..=hi`.
pub fn range<C: Symbol>(lo: C, hi: C) -> PatternRef<C> {
    literal(CharTest::Range(lo, hi))
}

/// A character passing any of `tests`.
pub fn any<C: Symbol>(tests: impl IntoIterator<Item = CharTest<C>>) -> PatternRef<C> {
    literal(CharTest::Any(tests.into_iter().collect()))
}

/// A character passing all of `tests`.
pub fn all<C: Symbol>(tests: impl IntoIterator<Item = CharTest<C>>) -> PatternRef<C> {
    literal(CharTest::All(tests.into_iter().collect()))
}

/// A character passing the nested exclusion `tests`, see [`CharTest::Signed`].
pub fn signed<C: Symbol>(tests: impl IntoIterator<Item = CharTest<C>>, negate: bool) -> PatternRef<C> {
    literal(CharTest::Signed {
        tests: tests.into_iter().collect(),
        negate,
    })
}

/// The test for a named class such as `"digit"` or `"alpha"`.
pub fn class_test(name: &str) -> Result<CharTest<char>, BuildError> {
    let (name, info) =
        char_class::by_name(name).ok_or_else(|| BuildError::UnknownClass(name.to_string()))?;
    Ok(CharTest::Predicate(Predicate {
        label: name.into(),
        test: Arc::new(info.test),
    }))
}

/// A character in the named class.
pub fn class(name: &str) -> Result<PatternRef<char>, BuildError> {
    Ok(literal(class_test(name)?))
}

// ─── Sequences of literals ──────────────────────────────────────────────────

/// One literal per character, concatenated.
pub fn sequence<C: Symbol>(chars: impl IntoIterator<Item = C>) -> PatternRef<C> {
    concat(chars.into_iter().map(one))
}

/// The exact text `s`.
pub fn text(s: &str) -> PatternRef<char> {
    sequence(s.chars())
}

/// The text `s`, ignoring ASCII case.
pub fn text_ignore_case(s: &str) -> PatternRef<char> {
    concat(s.chars().map(|c| {
        let (lower, upper) = (c.to_ascii_lowercase(), c.to_ascii_uppercase());
        if lower == upper {
            one(c)
        } else {
            one_of([lower, upper])
        }
    }))
}

// ─── Combinators ────────────────────────────────────────────────────────────

/// Ordered choice; the first alternative to match wins.
pub fn choice<C, I>(alternatives: I) -> PatternRef<C>
where
    C: Symbol,
    I: IntoIterator,
    I::Item: Into<Item<C>>,
{
    Arc::new(Choice::new(items(alternatives)))
}

/// Sequential concatenation.
pub fn concat<C, I>(parts: I) -> PatternRef<C>
where
    C: Symbol,
    I: IntoIterator,
    I::Item: Into<Item<C>>,
{
    Arc::new(Concat::new(items(parts)))
}

/// Every item must match the same span.
pub fn intersection<C, I>(parts: I) -> PatternRef<C>
where
    C: Symbol,
    I: IntoIterator,
    I::Item: Into<Item<C>>,
{
    Arc::new(Intersection::new(items(parts)))
}

/// The first item, unless a later item matches exactly the same span.
pub fn difference<C, I>(parts: I) -> PatternRef<C>
where
    C: Symbol,
    I: IntoIterator,
    I::Item: Into<Item<C>>,
{
    difference_with(parts, true)
}

/// [`difference`] with an explicit sign; see [`Difference`].
pub fn difference_with<C, I>(parts: I, exclude: bool) -> PatternRef<C>
where
    C: Symbol,
    I: IntoIterator,
    I::Item: Into<Item<C>>,
{
    Arc::new(Difference::new(items(parts), exclude))
}

/// Zero or more repetitions.
pub fn kleene<C: Symbol>(p: PatternRef<C>) -> PatternRef<C> {
    Arc::new(Kleene::new(p))
}

/// `p`, or nothing.
pub fn optional<C: Symbol>(p: PatternRef<C>) -> PatternRef<C> {
    choice([p, empty()])
}

/// One or more repetitions.
pub fn one_or_more<C: Symbol>(p: PatternRef<C>) -> PatternRef<C> {
    concat([p.clone(), kleene(p)])
}

/// Between `min` and `max` repetitions (unbounded when `max` is `None`).
///
/// Like [`kleene`], the repetitions are possessive. A `max` below `min` is
/// treated as `min`.
pub fn repeat<C: Symbol>(p: PatternRef<C>, min: usize, max: Option<usize>) -> PatternRef<C> {
    Arc::new(Kleene::bounded(p, min, max))
}

/// A late-bound pattern for recursive rules.
pub fn placeholder<C: Symbol>() -> Arc<Placeholder<C>> {
    Arc::new(Placeholder::new())
}

/// `p` with its internal structure dropped from the record.
pub fn collapse<C: Symbol>(p: PatternRef<C>) -> PatternRef<C> {
    Arc::new(Collapse::new(p))
}

/// `base` with its record rewritten by `transform`.
pub fn custom<C, F>(base: PatternRef<C>, transform: F) -> PatternRef<C>
where
    C: Symbol,
    F: Fn(Record) -> Record + Send + Sync + 'static,
{
    Arc::new(Custom::new(base, Arc::new(transform)))
}

/// Conditional pair; see [`Operation`].
pub fn operation<C: Symbol>(first: PatternRef<C>, second: PatternRef<C>, require: bool) -> PatternRef<C> {
    Arc::new(Operation::new(first, second, require))
}

/// `first`, provided `second` matches exactly the same span.
pub fn when<C: Symbol>(first: PatternRef<C>, second: PatternRef<C>) -> PatternRef<C> {
    operation(first, second, true)
}

/// `first`, provided `second` does not match exactly the same span.
pub fn unless<C: Symbol>(first: PatternRef<C>, second: PatternRef<C>) -> PatternRef<C> {
    operation(first, second, false)
}
