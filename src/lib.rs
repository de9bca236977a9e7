//! Composable character-level pattern combinators with introspectable match
//! records.
//!
//! Patterns are built from leaves (single-character tests and the empty
//! pattern) and combinators (choice, concatenation, intersection, difference,
//! repetition, conditional pairs). Matching always produces a [`Record`],
//! successful or not, that mirrors the shape of the pattern and remembers how
//! far each attempt got.
//!
//! # Example
//!
//! ```rust
//! use strand::build::*;
//! use strand::{keyed, match_whole, unkeyed};
//!
//! let word = one_or_more(range('a', 'z'));
//! let pair = concat([keyed("key", word.clone()), unkeyed(one('=')), keyed("value", word)]);
//!
//! let input: Vec<char> = "name=value".chars().collect();
//! let result = match_whole(&*pair, &input);
//! assert!(result.success);
//!
//! let parts = result.record.as_all().unwrap();
//! assert_eq!(parts.get("value").unwrap().text(&input), "value");
//! ```
//!
//! Patterns can also be written in a compact notation:
//!
//! ```rust
//! let p = strand::compile("+N ?(\".\" +N)").unwrap();
//! let input: Vec<char> = "3.14".chars().collect();
//! assert!(strand::match_whole(&*p, &input).success);
//! ```

pub mod build;
mod diagnostic;
mod input;
pub mod notation;
pub mod pattern;
mod record;
mod search;
pub mod tagging;

pub use diagnostic::{Diagnostic, Position};
pub use input::{Input, Symbol, slice, slice_string};
pub use notation::{NotationError, compile};
pub use pattern::{Item, Pattern, PatternRef, keyed, unkeyed};
pub use record::{AllRecord, ChoiceRecord, Key, MatchResult, Reach, Record, RecordKind};
pub use search::{FindIter, Found, find_backward, find_forward, find_iter, match_prefix, match_whole};
