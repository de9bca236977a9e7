//! A small document grammar for labelled text.
//!
//! A document is a run of tokens:
//!
//! - whitespace
//! - numbers: `[+-]? digit+`
//! - tagged labels: `word/TAG`, where a tag is uppercase letters, digits,
//!   `-`, `_` or `$`
//! - words: anything else up to whitespace or `/`
//!
//! [`tokens`] walks a document record and pulls the tokens back out.

use std::fmt;
use std::ops::Range;

use crate::build::*;
use crate::input::Input;
use crate::pattern::{CharTest, PatternRef, keyed, unkeyed};
use crate::record::Record;

/// The rules of the document grammar, each usable on its own.
pub struct DocumentGrammar {
    pub whitespace: PatternRef<char>,
    pub number: PatternRef<char>,
    pub word: PatternRef<char>,
    pub label: PatternRef<char>,
    pub token: PatternRef<char>,
    pub document: PatternRef<char>,
}

impl Default for DocumentGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentGrammar {
    pub fn new() -> Self {
        let whitespace = collapse(one_or_more(predicate("whitespace", char::is_whitespace)));
        let digit = range('0', '9');
        let number = concat([
            keyed("sign", optional(one_of("+-".chars()))),
            keyed("digits", collapse(one_or_more(digit.clone()))),
        ]);
        let word_char = signed(
            [CharTest::Any(vec![
                predicate_test("whitespace", char::is_whitespace),
                CharTest::Equals('/'),
            ])],
            true,
        );
        let word = collapse(one_or_more(word_char));
        let tag_char = any([
            CharTest::Range('A', 'Z'),
            CharTest::Range('0', '9'),
            CharTest::Set(vec!['-', '_', '$']),
        ]);
        let label = concat([
            keyed("word", word.clone()),
            unkeyed(one('/')),
            keyed("tag", collapse(one_or_more(tag_char))),
        ]);
        let token = choice([
            keyed("whitespace", whitespace.clone()),
            keyed("label", label.clone()),
            keyed("number", number.clone()),
            keyed("word", word.clone()),
        ]);
        let document = kleene(token.clone());
        Self {
            whitespace,
            number,
            word,
            label,
            token,
            document,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Whitespace,
    Number,
    Word,
    Label,
}

impl TokenKind {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "whitespace" => Some(Self::Whitespace),
            "number" => Some(Self::Number),
            "word" => Some(Self::Word),
            "label" => Some(Self::Label),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Whitespace => "WS",
            Self::Number => "NUM",
            Self::Word => "WORD",
            Self::Label => "LABEL",
        };
        write!(f, "{name}")
    }
}

/// One token of a matched document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
    pub text: String,
    /// The tag of a label; `None` for other kinds.
    pub tag: Option<String>,
}

impl Token {
    /// Tab-separated `text\tTAG`, with the token kind standing in for a tag.
    pub fn to_tagged(&self) -> String {
        match &self.tag {
            Some(tag) => format!("{}\t{tag}", self.text),
            None => format!("{}\t{}", self.text, self.kind),
        }
    }
}

/// The tokens of a document record produced by [`DocumentGrammar::document`].
///
/// Repetitions whose choice record carries no recognised key are skipped.
pub fn tokens(document: &Record, input: &dyn Input<char>) -> Vec<Token> {
    let Some(repetitions) = document.as_repeat() else {
        return vec![];
    };
    repetitions
        .iter()
        .filter_map(|rep| {
            let choice = rep.as_choice()?;
            let kind = TokenKind::from_key(choice.key.as_deref()?)?;
            let child = choice.child.as_deref()?;
            let (text, tag) = match kind {
                TokenKind::Label => {
                    let parts = child.as_all()?;
                    (
                        parts.get("word")?.text(input),
                        Some(parts.get("tag")?.text(input)),
                    )
                }
                _ => (child.text(input), None),
            };
            Some(Token {
                kind,
                span: child.span_range(),
                text,
                tag,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::match_whole;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn kinds(s: &str) -> Vec<(TokenKind, String)> {
        let grammar = DocumentGrammar::new();
        let input = chars(s);
        let result = match_whole(&*grammar.document, &input);
        assert!(result.success, "document should match: {s:?}");
        tokens(&result.record, &input)
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn number_takes_sign_and_digits() {
        let grammar = DocumentGrammar::new();
        let input = chars("-123abc");
        let result = grammar.number.match_at(&input, 0, input.len());
        assert!(result.success);
        assert_eq!(result.record.direct_end, 4);
        let parts = result.record.as_all().unwrap();
        assert_eq!(parts.get("sign").unwrap().text(&input), "-");
        assert_eq!(parts.get("digits").unwrap().text(&input), "123");
    }

    #[test]
    fn word_on_empty_input_fails_in_place() {
        let grammar = DocumentGrammar::new();
        let input = chars("");
        let result = grammar.word.match_at(&input, 0, 0);
        assert!(!result.success);
        assert_eq!(result.record.direct_end, 0);
        assert_eq!(result.record.greedy_end, 0);
    }

    #[test]
    fn splits_mixed_tokens() {
        assert_eq!(
            kinds("-123abc the/DT"),
            vec![
                (TokenKind::Number, "-123".to_string()),
                (TokenKind::Word, "abc".to_string()),
                (TokenKind::Whitespace, " ".to_string()),
                (TokenKind::Label, "the".to_string()),
            ]
        );
    }

    #[test]
    fn label_carries_its_tag() {
        let grammar = DocumentGrammar::new();
        let input = chars("cats/NNS 3");
        let result = match_whole(&*grammar.document, &input);
        let toks = tokens(&result.record, &input);
        assert_eq!(toks[0].tag.as_deref(), Some("NNS"));
        assert_eq!(toks[0].span, 0..8);
        assert_eq!(toks[0].to_tagged(), "cats\tNNS");
        assert_eq!(toks[2].to_tagged(), "3\tNUM");
    }

    #[test]
    fn lowercase_tag_is_not_a_label() {
        let grammar = DocumentGrammar::new();
        let input = chars("cats/nns");
        let result = match_whole(&*grammar.document, &input);
        assert!(!result.success);
        assert_eq!(result.record.direct_end, 4);
        assert_eq!(result.record.greedy_end, 6);
    }

    #[test]
    fn lone_sign_is_a_word() {
        assert_eq!(kinds("+"), vec![(TokenKind::Word, "+".to_string())]);
    }
}
