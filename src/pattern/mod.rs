//! The matcher family.
//!
//! A [`Pattern`] is an immutable node in a tree of matchers. Matching is a
//! single top-down recursive walk: a composite calls its children, combines
//! their [`Record`]s and returns its own. Nodes are shared through
//! [`PatternRef`] so that one sub-pattern can sit under several parents.
//!
//! | Node             | Succeeds when                                          |
//! |------------------|--------------------------------------------------------|
//! | [`Empty`]        | always, zero-width                                     |
//! | [`Literal`]      | the next character passes its [`CharTest`]             |
//! | [`Choice`]       | the first alternative that matches (PEG, left-biased)  |
//! | [`Concat`]       | every item matches, each starting where the last ended |
//! | [`Intersection`] | every item matches the same span from the same start   |
//! | [`Difference`]   | the base matches and no later item reproduces its span |
//! | [`Kleene`]       | it reaches its minimum; takes as many non-empty repetitions as it can |
//! | [`Operation`]    | the first matches and the second does (or does not) cover it |
//! | [`Placeholder`]  | its bound target matches                               |
//! | [`Collapse`]     | its inner pattern matches; children are dropped        |
//! | [`Custom`]       | its base matches; the record is then transformed       |

use std::fmt::Debug;
use std::sync::Arc;

use crate::input::{Input, Symbol};
use crate::record::{Key, MatchResult};

pub mod char_class;
mod linear;
mod literal;
mod operation;
mod placeholder;
mod repeat;
mod wrap;

pub use linear::{Choice, Concat, Difference, Intersection};
pub use literal::{CharTest, Empty, Literal, Predicate};
pub use operation::Operation;
pub use placeholder::{BindError, Placeholder};
pub use repeat::Kleene;
pub use wrap::{Collapse, Custom, Transform};

/// A composable matcher over characters of type `C`.
///
/// Implementations never panic on malformed input: "no match" is reported as
/// `success = false` together with a best-effort record starting at `begin`.
pub trait Pattern<C: Symbol>: Debug + Send + Sync {
    /// Match against `input[begin..end)`.
    ///
    /// The returned record never reaches past `end`.
    fn match_at(&self, input: &dyn Input<C>, begin: usize, end: usize) -> MatchResult;
}

/// Shared handle to a pattern node.
pub type PatternRef<C> = Arc<dyn Pattern<C>>;

/// One entry of a keyed combinator.
#[derive(Debug, Clone)]
pub struct Item<C: Symbol> {
    pub key: Option<Key>,
    pub pattern: PatternRef<C>,
}

impl<C: Symbol> Item<C> {
    pub fn new(key: Option<&str>, pattern: PatternRef<C>) -> Self {
        Self {
            key: key.map(Key::from),
            pattern,
        }
    }
}

impl<C: Symbol> From<PatternRef<C>> for Item<C> {
    fn from(pattern: PatternRef<C>) -> Self {
        Self { key: None, pattern }
    }
}

/// A keyed item, for use in [`Choice`], [`Concat`] and friends.
pub fn keyed<C: Symbol>(key: &str, pattern: PatternRef<C>) -> Item<C> {
    Item::new(Some(key), pattern)
}

/// An item without a key, for lists that also hold [`keyed`] items.
///
/// A list made only of patterns can pass them bare.
pub fn unkeyed<C: Symbol>(pattern: PatternRef<C>) -> Item<C> {
    Item::new(None, pattern)
}
