use std::fmt;
use std::sync::{Arc, OnceLock};

use super::{Pattern, PatternRef};
use crate::input::{Input, Symbol};
use crate::record::{MatchResult, Record};

/// A late-bound reference to another pattern, for recursive grammars.
///
/// Build the placeholder first, use it inside the rules that need it, then
/// [`bind`](Placeholder::bind) it to the finished rule. Binding happens once,
/// before any matching starts; a second bind is rejected.
///
/// The placeholder owns its target, so a rule defined later and reachable
/// only through the placeholder lives as long as the grammar does. A rule
/// that reaches itself through its own placeholder is therefore a reference
/// cycle and is never freed; build recursive grammars once and share them.
/// An unbound placeholder fails zero-width.
///
/// Nothing guards against left recursion: a rule that reaches itself again
/// without consuming input recurses until the stack overflows.
pub struct Placeholder<C: Symbol> {
    slot: OnceLock<PatternRef<C>>,
}

/// Why a [`Placeholder::bind`] was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindError {
    AlreadyBound,
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyBound => write!(f, "Placeholder is already bound"),
        }
    }
}

impl std::error::Error for BindError {}

impl<C: Symbol> Default for Placeholder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Symbol> Placeholder<C> {
    pub fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Point this placeholder at `target`.
    pub fn bind(&self, target: &PatternRef<C>) -> Result<(), BindError> {
        self.slot
            .set(target.clone())
            .map_err(|_| BindError::AlreadyBound)
    }

    pub fn is_bound(&self) -> bool {
        self.slot.get().is_some()
    }

    /// This placeholder as a shareable pattern handle.
    pub fn handle(self: &Arc<Self>) -> PatternRef<C> {
        self.clone()
    }

    fn target(&self) -> Option<&PatternRef<C>> {
        self.slot.get()
    }
}

impl<C: Symbol> fmt::Debug for Placeholder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The target is not printed; it usually contains this placeholder.
        let state = if self.is_bound() { "bound" } else { "unbound" };
        write!(f, "Placeholder({state})")
    }
}

impl<C: Symbol> Pattern<C> for Placeholder<C> {
    fn match_at(&self, input: &dyn Input<C>, begin: usize, end: usize) -> MatchResult {
        match self.target() {
            Some(target) => target.match_at(input, begin, end),
            None => {
                log::trace!("unbound placeholder at {begin}");
                MatchResult::failed(Record::empty(begin))
            }
        }
    }
}
