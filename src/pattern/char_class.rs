//! Named character classes.
//!
//! Classes are looked up by name (`"digit"`) or by the single-letter code
//! used in pattern notation (`N`).

use phf::{Map, phf_map};

/// A named class: its notation letter and membership test.
pub struct ClassInfo {
    pub letter: Option<char>,
    pub test: fn(char) -> bool,
}

/// Keep names sorted alphabetically.
static CLASSES: Map<&'static str, ClassInfo> = phf_map! {
    "alnum" => ClassInfo { letter: None, test: is_alnum },
    "alpha" => ClassInfo { letter: Some('A'), test: is_alpha },
    "digit" => ClassInfo { letter: Some('N'), test: is_digit },
    "lower" => ClassInfo { letter: Some('L'), test: is_lower },
    "printable" => ClassInfo { letter: Some('C'), test: is_printable },
    "punct" => ClassInfo { letter: Some('P'), test: is_punct },
    "space" => ClassInfo { letter: Some('S'), test: is_space },
    "upper" => ClassInfo { letter: Some('U'), test: is_upper },
    "whitespace" => ClassInfo { letter: None, test: is_whitespace },
};

/// Look up a class by name (case-insensitive).
pub fn by_name(name: &str) -> Option<(&'static str, &'static ClassInfo)> {
    CLASSES.get_entry(name.to_ascii_lowercase().as_str()).map(|(k, v)| (*k, v))
}

/// Look up a class by its notation letter (case-insensitive).
pub fn by_letter(letter: char) -> Option<(&'static str, &'static ClassInfo)> {
    let letter = letter.to_ascii_uppercase();
    CLASSES
        .entries()
        .find(|(_, info)| info.letter == Some(letter))
        .map(|(k, v)| (*k, v))
}

/// All class names, sorted.
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = CLASSES.keys().copied().collect();
    names.sort();
    names
}

fn is_alnum(ch: char) -> bool {
    ch.is_alphanumeric()
}

fn is_alpha(ch: char) -> bool {
    ch.is_alphabetic()
}

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_lower(ch: char) -> bool {
    ch.is_lowercase()
}

fn is_upper(ch: char) -> bool {
    ch.is_uppercase()
}

/// ASCII space only.
fn is_space(ch: char) -> bool {
    ch == ' '
}

fn is_whitespace(ch: char) -> bool {
    ch.is_whitespace()
}

fn is_punct(ch: char) -> bool {
    "(),.;:\"'!?-`".contains(ch)
}

fn is_printable(ch: char) -> bool {
    ('\x20'..='\x7e').contains(&ch)
}
