//! Character domain: the sequences patterns are matched against.
//!
//! A cursor is a plain character index. Two cursors `begin..end` delimit the
//! region a pattern may look at; advancing a cursor is `+ 1`.

use std::fmt::Debug;

use ropey::{Rope, RopeSlice};

/// An opaque, comparable character unit.
///
/// Anything `Copy` and ordered qualifies: `char`, `u8`, `u16` and so on. No
/// Unicode awareness is implied; each unit is matched on its own.
pub trait Symbol: Copy + PartialEq + PartialOrd + Debug + Send + Sync + 'static {}

impl<T> Symbol for T where T: Copy + PartialEq + PartialOrd + Debug + Send + Sync + 'static {}

/// Random access to a sequence of characters.
pub trait Input<C> {
    /// The character at `pos`, or `None` past the end.
    fn char_at(&self, pos: usize) -> Option<C>;

    /// Number of characters in the sequence.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C: Copy> Input<C> for [C] {
    fn char_at(&self, pos: usize) -> Option<C> {
        self.get(pos).copied()
    }

    fn len(&self) -> usize {
        <[C]>::len(self)
    }
}

impl<C: Copy> Input<C> for &[C] {
    fn char_at(&self, pos: usize) -> Option<C> {
        self.get(pos).copied()
    }

    fn len(&self) -> usize {
        <[C]>::len(self)
    }
}

impl<C: Copy> Input<C> for Vec<C> {
    fn char_at(&self, pos: usize) -> Option<C> {
        self.get(pos).copied()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl Input<char> for Rope {
    fn char_at(&self, pos: usize) -> Option<char> {
        self.get_char(pos)
    }

    fn len(&self) -> usize {
        self.len_chars()
    }
}

impl Input<char> for RopeSlice<'_> {
    fn char_at(&self, pos: usize) -> Option<char> {
        self.get_char(pos)
    }

    fn len(&self) -> usize {
        self.len_chars()
    }
}

/// Collect `begin..end` of `input` into a vector.
///
/// Positions past the end of the input are silently dropped.
pub fn slice<C>(input: &dyn Input<C>, begin: usize, end: usize) -> Vec<C> {
    (begin..end).map_while(|pos| input.char_at(pos)).collect()
}

/// Collect `begin..end` of a character input into a `String`.
pub fn slice_string(input: &dyn Input<char>, begin: usize, end: usize) -> String {
    (begin..end).map_while(|pos| input.char_at(pos)).collect()
}
