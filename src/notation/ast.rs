//! AST types for pattern notation.

/// An alternation of one or more sequences (`|`-separated).
///
/// An empty `alternatives` vec is the canonical empty compound; it matches
/// the empty string at any position.
#[derive(Debug, PartialEq)]
pub struct Compound {
    pub alternatives: Vec<Sequence>,
}

impl Compound {
    pub fn empty() -> Self {
        Self {
            alternatives: vec![],
        }
    }

    pub fn is_empty_pattern(&self) -> bool {
        self.alternatives.is_empty()
    }
}

/// A concatenation of items.
#[derive(Debug, PartialEq)]
pub struct Sequence {
    pub items: Vec<Item>,
}

/// One quantified element.
#[derive(Debug, PartialEq)]
pub struct Item {
    pub quantifier: Quantifier,
    pub element: Element,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Quantifier {
    Once,
    Optional,
    ZeroOrMore,
    OneOrMore,
    Exactly(usize),
    AtLeast(usize),
    Between(usize, usize),
}

#[derive(Debug, PartialEq)]
pub enum Element {
    CharSet(CharSet),
    Group(Box<Compound>),
    /// `case_fold = true` for single-quote strings (case-insensitive).
    Literal {
        text: String,
        case_fold: bool,
    },
}

#[derive(Debug, PartialEq)]
pub struct CharSet {
    pub negated: bool,
    pub kind: CharSetKind,
}

#[derive(Debug, PartialEq)]
pub enum CharSetKind {
    /// A class from the named-class table, by notation letter.
    Named(&'static str),
    Custom(Vec<CharClass>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CharClass {
    Single(char),
    Range(char, char),
}
