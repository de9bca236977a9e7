//! Recursive descent parser for pattern notation.

use std::iter::Peekable;
use std::str::Chars;

use super::ast::*;
use crate::pattern::char_class;

/// Errors that can occur while parsing pattern notation.
#[derive(Debug, Clone, PartialEq)]
pub enum NotationError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidNumber,
    UnclosedGroup,
    UnclosedString,
    UnclosedCustomSet,
    InvalidQuantifierRange,
    UnknownClass(String),
}

impl std::fmt::Display for NotationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedChar(c) => write!(f, "Unexpected character in pattern: {c:?}"),
            Self::UnexpectedEnd => write!(f, "Unexpected end of pattern"),
            Self::InvalidNumber => write!(f, "Invalid number in pattern"),
            Self::UnclosedGroup => write!(f, "Unclosed group '(' in pattern"),
            Self::UnclosedString => write!(f, "Unclosed string literal in pattern"),
            Self::UnclosedCustomSet => write!(f, "Unclosed custom character set"),
            Self::InvalidQuantifierRange => write!(f, "Invalid quantifier range [n,m]"),
            Self::UnknownClass(name) => write!(f, "Unknown character class {name:?}"),
        }
    }
}

impl std::error::Error for NotationError {}

/// Parse pattern notation into a [`Compound`].
pub fn parse(input: &str) -> Result<Compound, NotationError> {
    let mut parser = Parser {
        chars: input.chars().peekable(),
    };
    let compound = parser.parse_compound()?;
    parser.skip_space();
    match parser.chars.next() {
        None => Ok(compound),
        Some(c) => Err(NotationError::UnexpectedChar(c)),
    }
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
}

impl Parser<'_> {
    fn parse_compound(&mut self) -> Result<Compound, NotationError> {
        let mut alternatives = Vec::new();
        loop {
            let seq = self.parse_sequence()?;
            alternatives.push(seq);
            self.skip_space();
            if self.chars.peek() == Some(&'|') {
                self.chars.next(); // consume '|'
            } else {
                break;
            }
        }
        // Normalise: a single empty-sequence alternative is the canonical empty compound.
        if alternatives.len() == 1 && alternatives[0].items.is_empty() {
            return Ok(Compound::empty());
        }
        Ok(Compound { alternatives })
    }

    fn parse_sequence(&mut self) -> Result<Sequence, NotationError> {
        let mut items = Vec::new();
        while let Some(item) = self.parse_item()? {
            items.push(item);
        }
        Ok(Sequence { items })
    }

    /// Parse one item (optional quantifier + element).
    ///
    /// Returns `None` at sequence terminators: `|`, `)`, end-of-input.
    fn parse_item(&mut self) -> Result<Option<Item>, NotationError> {
        self.skip_space();
        if self.at_terminator() {
            return Ok(None);
        }

        let quantifier = self.parse_quantifier()?;

        self.skip_space();
        if self.at_terminator() {
            // A quantifier with no following element is an error
            return match quantifier {
                Some(_) => Err(NotationError::UnexpectedEnd),
                None => Ok(None),
            };
        }

        let element = self.parse_element()?;
        Ok(Some(Item {
            quantifier: quantifier.unwrap_or(Quantifier::Once),
            element,
        }))
    }

    fn at_terminator(&mut self) -> bool {
        matches!(self.chars.peek(), None | Some('|') | Some(')'))
    }

    /// Try to parse a quantifier prefix.  Returns `None` if the next token is
    /// not a quantifier.
    fn parse_quantifier(&mut self) -> Result<Option<Quantifier>, NotationError> {
        match self.chars.peek() {
            Some('*') => {
                self.chars.next();
                Ok(Some(Quantifier::ZeroOrMore))
            }
            Some('+') => {
                self.chars.next();
                Ok(Some(Quantifier::OneOrMore))
            }
            Some('?') => {
                self.chars.next();
                Ok(Some(Quantifier::Optional))
            }
            Some('[') => {
                self.chars.next();
                Ok(Some(self.parse_bracket_quantifier()?))
            }
            Some(&c) if c.is_ascii_digit() => Ok(Some(Quantifier::Exactly(self.parse_number()?))),
            _ => Ok(None),
        }
    }

    /// Parse a `[n,m]`-style quantifier (the opening `[` has already been consumed).
    fn parse_bracket_quantifier(&mut self) -> Result<Quantifier, NotationError> {
        let first = if matches!(self.chars.peek(), Some(',') | Some(']')) {
            None
        } else {
            Some(self.parse_number()?)
        };

        // Single-number form: [n] = Exactly(n)
        if self.chars.peek() == Some(&']') {
            self.chars.next();
            return Ok(Quantifier::Exactly(
                first.ok_or(NotationError::InvalidQuantifierRange)?,
            ));
        }

        match self.chars.next() {
            Some(',') => {}
            _ => return Err(NotationError::InvalidQuantifierRange),
        }

        let second = if self.chars.peek() == Some(&']') {
            None
        } else {
            Some(self.parse_number()?)
        };

        match self.chars.next() {
            Some(']') => {}
            _ => return Err(NotationError::InvalidQuantifierRange),
        }

        match (first, second) {
            (None, None) => Ok(Quantifier::ZeroOrMore),       // [,]
            (Some(n), None) => Ok(Quantifier::AtLeast(n)),    // [n,]
            (None, Some(m)) => Ok(Quantifier::Between(0, m)), // [,m]
            (Some(n), Some(m)) if n <= m => Ok(Quantifier::Between(n, m)),
            _ => Err(NotationError::InvalidQuantifierRange),
        }
    }

    fn parse_number(&mut self) -> Result<usize, NotationError> {
        let mut s = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() {
                s.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        if s.is_empty() {
            return Err(NotationError::InvalidNumber);
        }
        s.parse::<usize>().map_err(|_| NotationError::InvalidNumber)
    }

    fn parse_element(&mut self) -> Result<Element, NotationError> {
        match self.chars.peek() {
            None => Err(NotationError::UnexpectedEnd),
            Some(&'(') => {
                self.chars.next();
                let compound = self.parse_compound()?;
                match self.chars.next() {
                    Some(')') => {}
                    _ => return Err(NotationError::UnclosedGroup),
                }
                Ok(Element::Group(Box::new(compound)))
            }
            Some(&'\'') | Some(&'"') => {
                let (text, case_fold) = self.parse_string()?;
                Ok(Element::Literal { text, case_fold })
            }
            Some(&'-') => {
                self.chars.next();
                let kind = self.parse_charset_kind()?;
                Ok(Element::CharSet(CharSet {
                    negated: true,
                    kind,
                }))
            }
            Some(&c) if c.is_ascii_alphabetic() => {
                let kind = self.parse_charset_kind()?;
                Ok(Element::CharSet(CharSet {
                    negated: false,
                    kind,
                }))
            }
            Some(&c) => Err(NotationError::UnexpectedChar(c)),
        }
    }

    fn parse_charset_kind(&mut self) -> Result<CharSetKind, NotationError> {
        match self.chars.next() {
            None => Err(NotationError::UnexpectedEnd),
            Some(c) if c.eq_ignore_ascii_case(&'D') => Ok(CharSetKind::Custom(self.parse_custom_set()?)),
            Some(c) => match char_class::by_letter(c) {
                Some((name, _)) => Ok(CharSetKind::Named(name)),
                None => Err(NotationError::UnexpectedChar(c)),
            },
        }
    }

    /// Parse a custom set `D<dlm>...<dlm>` (the `D` has already been consumed).
    fn parse_custom_set(&mut self) -> Result<Vec<CharClass>, NotationError> {
        let dlm = self.chars.next().ok_or(NotationError::UnexpectedEnd)?;
        let mut classes = Vec::new();
        let mut pending: Option<char> = None;

        loop {
            match self.chars.next() {
                None => return Err(NotationError::UnclosedCustomSet),
                Some(c) if c == dlm => {
                    if let Some(p) = pending.take() {
                        classes.push(CharClass::Single(p));
                    }
                    break;
                }
                Some('.') if self.chars.peek() == Some(&'.') => {
                    self.chars.next(); // consume second '.'
                    match self.chars.next() {
                        Some(c) if c != dlm => {
                            if let Some(lo) = pending.take() {
                                classes.push(CharClass::Range(lo, c));
                            } else {
                                // No preceding char: all three are singles
                                classes.push(CharClass::Single('.'));
                                classes.push(CharClass::Single('.'));
                                classes.push(CharClass::Single(c));
                            }
                        }
                        _ => return Err(NotationError::UnclosedCustomSet),
                    }
                }
                Some(c) => {
                    if let Some(p) = pending.take() {
                        classes.push(CharClass::Single(p));
                    }
                    pending = Some(c);
                }
            }
        }
        Ok(classes)
    }

    /// Parse a `'...'` or `"..."` string literal.
    ///
    /// Returns `(text, case_fold)` where `case_fold = true` for single-quote.
    fn parse_string(&mut self) -> Result<(String, bool), NotationError> {
        let delim = self.chars.next().ok_or(NotationError::UnexpectedEnd)?;
        let case_fold = delim == '\'';
        let mut text = String::new();
        loop {
            match self.chars.next() {
                Some(c) if c == delim => break,
                Some(c) => text.push(c),
                None => return Err(NotationError::UnclosedString),
            }
        }
        Ok((text, case_fold))
    }

    fn skip_space(&mut self) {
        while matches!(self.chars.peek(), Some(' ') | Some('\t')) {
            self.chars.next();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(s: &str) -> Compound {
        parse(s).expect("parse should succeed")
    }
    fn parse_err(s: &str) -> NotationError {
        parse(s).expect_err("parse should fail")
    }

    fn items(p: Compound) -> Vec<Item> {
        assert_eq!(p.alternatives.len(), 1, "expected single alternative");
        p.alternatives.into_iter().next().unwrap().items
    }

    fn quantifier(s: &str) -> Quantifier {
        items(parse_ok(s)).remove(0).quantifier
    }

    // --- Literals ---

    #[test]
    fn test_double_quote_literal() {
        let items = items(parse_ok(r#""hello""#));
        assert_eq!(
            items[0].element,
            Element::Literal {
                text: "hello".to_string(),
                case_fold: false
            }
        );
    }

    #[test]
    fn test_single_quote_literal_case_fold() {
        let items = items(parse_ok("'hello'"));
        match &items[0].element {
            Element::Literal { text, case_fold } => {
                assert_eq!(text, "hello");
                assert!(*case_fold, "single-quote should be case-insensitive");
            }
            _ => panic!("expected Literal"),
        }
    }

    // --- Named charsets ---

    #[test]
    fn test_alpha_charset() {
        let items = items(parse_ok("A"));
        assert_eq!(
            items[0].element,
            Element::CharSet(CharSet {
                negated: false,
                kind: CharSetKind::Named("alpha")
            })
        );
    }

    #[test]
    fn test_charset_lowercase() {
        let items = items(parse_ok("n"));
        match &items[0].element {
            Element::CharSet(cs) => assert_eq!(cs.kind, CharSetKind::Named("digit")),
            _ => panic!("expected CharSet"),
        }
    }

    #[test]
    fn test_negated_charset() {
        let items = items(parse_ok("-S"));
        match &items[0].element {
            Element::CharSet(cs) => {
                assert!(cs.negated);
                assert_eq!(cs.kind, CharSetKind::Named("space"));
            }
            _ => panic!("expected CharSet"),
        }
    }

    #[test]
    fn test_custom_set_range() {
        let items = items(parse_ok("D/a..z/"));
        match &items[0].element {
            Element::CharSet(cs) => {
                assert_eq!(cs.kind, CharSetKind::Custom(vec![CharClass::Range('a', 'z')]))
            }
            _ => panic!("expected CharSet"),
        }
    }

    #[test]
    fn test_custom_set_singles() {
        let items = items(parse_ok("D|xy.|"));
        match &items[0].element {
            Element::CharSet(cs) => assert_eq!(
                cs.kind,
                CharSetKind::Custom(vec![
                    CharClass::Single('x'),
                    CharClass::Single('y'),
                    CharClass::Single('.'),
                ])
            ),
            _ => panic!("expected CharSet"),
        }
    }

    // --- Quantifiers ---

    #[test]
    fn test_prefix_quantifiers() {
        assert_eq!(quantifier("*A"), Quantifier::ZeroOrMore);
        assert_eq!(quantifier("+A"), Quantifier::OneOrMore);
        assert_eq!(quantifier("?A"), Quantifier::Optional);
        assert_eq!(quantifier("3A"), Quantifier::Exactly(3));
    }

    #[test]
    fn test_bracket_quantifiers() {
        assert_eq!(quantifier("[2]A"), Quantifier::Exactly(2));
        assert_eq!(quantifier("[2,]A"), Quantifier::AtLeast(2));
        assert_eq!(quantifier("[2,5]A"), Quantifier::Between(2, 5));
        assert_eq!(quantifier("[,]A"), Quantifier::ZeroOrMore);
        assert_eq!(quantifier("[,4]A"), Quantifier::Between(0, 4));
    }

    // --- Structure ---

    #[test]
    fn test_alternation() {
        let p = parse_ok("A|N");
        assert_eq!(p.alternatives.len(), 2);
    }

    #[test]
    fn test_group() {
        let items = items(parse_ok("+(A|N)"));
        assert_eq!(items[0].quantifier, Quantifier::OneOrMore);
        match &items[0].element {
            Element::Group(inner) => assert_eq!(inner.alternatives.len(), 2),
            _ => panic!("expected Group"),
        }
    }

    #[test]
    fn test_empty_pattern() {
        assert!(parse_ok("").is_empty_pattern());
        assert!(parse_ok("  ").is_empty_pattern());
    }

    #[test]
    fn test_whitespace_between_items() {
        let items = items(parse_ok("A  N\tS"));
        assert_eq!(items.len(), 3);
    }

    // --- Errors ---

    #[test]
    fn test_unclosed_group() {
        assert_eq!(parse_err("(A"), NotationError::UnclosedGroup);
    }

    #[test]
    fn test_unclosed_string() {
        assert_eq!(parse_err("'hello"), NotationError::UnclosedString);
    }

    #[test]
    fn test_unclosed_custom_set() {
        assert_eq!(parse_err("D/abc"), NotationError::UnclosedCustomSet);
    }

    #[test]
    fn test_invalid_bracket_range() {
        assert_eq!(parse_err("[5,2]A"), NotationError::InvalidQuantifierRange);
    }

    #[test]
    fn test_dangling_quantifier() {
        assert_eq!(parse_err("A*"), NotationError::UnexpectedEnd);
    }

    #[test]
    fn test_stray_close_paren() {
        assert_eq!(parse_err("A)"), NotationError::UnexpectedChar(')'));
    }

    #[test]
    fn test_unknown_class_letter() {
        assert_eq!(parse_err("Q"), NotationError::UnexpectedChar('Q'));
    }
}
