//! Compact textual notation for character patterns.
//!
//! | Token         | Meaning                                       |
//! |---------------|-----------------------------------------------|
//! | `A`           | One alphabetic character                      |
//! | `U`           | One uppercase letter                          |
//! | `L`           | One lowercase letter                          |
//! | `N`           | One ASCII digit                               |
//! | `S`           | One space character                           |
//! | `P`           | One punctuation character                     |
//! | `C`           | One printable character (0x20–0x7E)           |
//! | `D/…/`        | Custom character set (`a..z` for ranges)      |
//! | `-X`          | Negated character set                         |
//! | `"text"`      | Literal (exact case)                          |
//! | `'text'`      | Literal (ASCII case-folded)                   |
//! | `(…)`         | Grouping                                      |
//! | `X\|Y`        | Ordered choice                                |
//! | `*X`          | Zero or more                                  |
//! | `+X`          | One or more                                   |
//! | `?X`          | Optional                                      |
//! | `nX`, `[n]X`  | Exactly n                                     |
//! | `[n,]X`       | At least n                                    |
//! | `[n,m]X`      | Between n and m                               |
//!
//! Notation compiles to ordinary combinators, so choice is first-match and
//! repetition is possessive: `*A"a"` never matches, because `*A` keeps every
//! letter it takes.

pub mod ast;
pub mod parser;

pub use parser::{NotationError, parse};

use ast::*;

use crate::build::{self, BuildError};
use crate::pattern::{CharTest, PatternRef};

/// Parse and compile notation into a pattern.
pub fn compile(notation: &str) -> Result<PatternRef<char>, NotationError> {
    compile_compound(&parse(notation)?)
}

fn compile_compound(compound: &Compound) -> Result<PatternRef<char>, NotationError> {
    Ok(match compound.alternatives.as_slice() {
        [] => build::empty(),
        [single] => compile_sequence(single)?,
        alternatives => build::choice(
            alternatives
                .iter()
                .map(compile_sequence)
                .collect::<Result<Vec<_>, _>>()?,
        ),
    })
}

fn compile_sequence(seq: &Sequence) -> Result<PatternRef<char>, NotationError> {
    Ok(match seq.items.as_slice() {
        [single] => compile_item(single)?,
        items => build::concat(items.iter().map(compile_item).collect::<Result<Vec<_>, _>>()?),
    })
}

fn compile_item(item: &Item) -> Result<PatternRef<char>, NotationError> {
    let p = compile_element(&item.element)?;
    Ok(match item.quantifier {
        Quantifier::Once => p,
        Quantifier::Optional => build::optional(p),
        Quantifier::ZeroOrMore => build::kleene(p),
        Quantifier::OneOrMore => build::one_or_more(p),
        Quantifier::Exactly(n) => build::repeat(p, n, Some(n)),
        Quantifier::AtLeast(n) => build::repeat(p, n, None),
        Quantifier::Between(lo, hi) => build::repeat(p, lo, Some(hi)),
    })
}

fn compile_element(element: &Element) -> Result<PatternRef<char>, NotationError> {
    Ok(match element {
        Element::CharSet(cs) => build::literal(charset_test(cs)?),
        Element::Group(compound) => compile_compound(compound)?,
        Element::Literal { text, case_fold } => {
            if *case_fold {
                build::text_ignore_case(text)
            } else {
                build::text(text)
            }
        }
    })
}

fn charset_test(cs: &CharSet) -> Result<CharTest<char>, NotationError> {
    let base = match &cs.kind {
        CharSetKind::Named(name) => build::class_test(name)
            .map_err(|BuildError::UnknownClass(name)| NotationError::UnknownClass(name))?,
        CharSetKind::Custom(classes) => CharTest::Any(
            classes
                .iter()
                .map(|class| match class {
                    CharClass::Single(c) => CharTest::Equals(*c),
                    CharClass::Range(lo, hi) => CharTest::Range(*lo, *hi),
                })
                .collect(),
        ),
    };
    Ok(if cs.negated { base.negated() } else { base })
}
